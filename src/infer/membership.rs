//! Membership: which entity a comment belongs to, and in which scope.
//!
//! Recognized shapes, tried in order:
//!
//! ```text
//! Foo.bar = ...              memberof Foo, static
//! Foo.prototype.bar = ...    memberof Foo, instance
//! this.bar = ...             memberof <enclosing class or constructor>, instance
//! /** @lends Foo */ { bar }  memberof Foo
//! Foo = { bar }              memberof Foo, static
//! var Foo = { bar }          memberof Foo, static
//! export default { bar }     memberof <module>, static
//! class Foo { bar() {} }     memberof Foo, instance (static with `static`)
//! ```
//!
//! `exports.x` and `module.exports.x` resolve to the current module.

use super::finders::{class_name, file_stem, identifiers};
use super::{InferPass, InferState};
use crate::model::{Comment, Kind, Scope};
use crate::syntax::{FunctionFlavor, NodeId, NodeKind, SyntaxTree};

pub struct InferMembership;

/// Owner identifiers found for a node, plus the scope when the shape
/// determines it.
#[derive(Debug, PartialEq)]
struct MemberChain {
    identifiers: Vec<String>,
    scope: Option<Scope>,
}

impl MemberChain {
    fn new(identifiers: Vec<String>) -> MemberChain {
        MemberChain {
            identifiers,
            scope: None,
        }
    }
}

impl InferPass for InferMembership {
    fn name(&self) -> &'static str {
        "membership"
    }

    fn infer(&self, comment: &mut Comment, state: &mut InferState) {
        if comment.has_tag("name") || comment.lends.is_some() {
            return;
        }
        let Some(ast) = comment.ast().cloned() else {
            return;
        };
        let module = module_name(state, comment);
        let tree = &ast.tree;
        let node = subject(tree, ast.node);

        let chain = member_assignment(tree, node, &module)
            .or_else(|| object_member(tree, node, &module))
            .or_else(|| class_member(tree, node));
        if let Some(chain) = chain {
            apply(comment, chain, &module);
        }
    }
}

fn module_name(state: &InferState, comment: &Comment) -> String {
    if let Some(module) = &state.current_module {
        return module.clone();
    }
    match (&comment.kind, &comment.name) {
        (Some(Kind::Module), Some(name)) => name.clone(),
        _ => file_stem(&comment.context.file),
    }
}

/// The node whose shape decides membership: the left side of `a.b = ...`,
/// the key of `b: ...`.
fn subject(tree: &SyntaxTree, node: NodeId) -> NodeId {
    match tree.kind(node) {
        NodeKind::ExpressionStatement { expression } => match tree.kind(*expression) {
            NodeKind::Assignment { left, .. }
                if matches!(tree.kind(*left), NodeKind::Member { .. }) =>
            {
                *left
            }
            _ => node,
        },
        NodeKind::ObjectProperty { key, .. } if tree.identifier(*key).is_some() => *key,
        _ => node,
    }
}

fn apply(comment: &mut Comment, chain: MemberChain, module: &str) {
    let MemberChain {
        mut identifiers,
        scope,
    } = chain;

    if identifiers == ["module"] && comment.name.as_deref() == Some("exports") {
        comment.name = Some(module.to_string());
        return;
    }

    let exported = match identifiers.as_slice() {
        [first, ..] if first == "exports" => 1,
        [first, second, ..] if first == "module" && second == "exports" => 2,
        _ => 0,
    };
    if exported > 0 {
        identifiers.drain(..exported);
        identifiers.insert(0, module.to_string());
    }

    let scope = if identifiers.last().map(String::as_str) == Some("prototype") {
        identifiers.pop();
        Scope::Instance
    } else {
        scope.unwrap_or(Scope::Static)
    };
    if identifiers.is_empty() {
        return;
    }
    comment.set_membership(identifiers.join("."), scope);
}

// -- Shapes -------------------------------------------------------------------

/// `Foo.bar`, `Foo.prototype.bar`, `this.bar`.
fn member_assignment(tree: &SyntaxTree, node: NodeId, module: &str) -> Option<MemberChain> {
    if !matches!(tree.kind(node), NodeKind::Member { .. }) {
        return None;
    }
    let mut ids = this_owner(tree, node, module);
    ids.extend(identifiers(tree, node));
    if ids.len() < 2 {
        return None;
    }
    ids.pop();
    Some(MemberChain::new(ids))
}

/// What `this` refers to inside `node`: the enclosing class or constructor
/// function, as `[Name, "prototype"]`.
fn this_owner(tree: &SyntaxTree, node: NodeId, module: &str) -> Vec<String> {
    let Some(this) = std::iter::once(node)
        .chain(tree.descendants(node))
        .find(|&n| matches!(tree.kind(n), NodeKind::This))
    else {
        return Vec::new();
    };
    let prototype_of = |name: &str| vec![name.to_string(), "prototype".to_string()];

    let mut current = tree.parent(this);
    while let Some(n) = current {
        match tree.kind(n) {
            NodeKind::ClassMethod { .. } => {
                let class = tree.parent(n).and_then(|body| tree.parent(body));
                return class
                    .and_then(|c| class_name(tree, c))
                    .map(prototype_of)
                    .unwrap_or_default();
            }
            NodeKind::Function {
                flavor: FunctionFlavor::Declaration,
                id,
                ..
            } => {
                return match id.and_then(|id| tree.identifier(id)) {
                    Some(name) => prototype_of(name),
                    None => match tree.parent(n).map(|p| tree.kind(p)) {
                        Some(NodeKind::ExportDefault { .. }) => vec![module.to_string()],
                        _ => Vec::new(),
                    },
                };
            }
            NodeKind::Function {
                flavor: FunctionFlavor::Expression,
                ..
            } => {
                return match tree.parent(n).map(|p| tree.kind(p)) {
                    Some(NodeKind::VariableDeclarator { id, .. }) => tree
                        .identifier(*id)
                        .map(prototype_of)
                        .unwrap_or_default(),
                    Some(NodeKind::Assignment { left, .. }) => {
                        let mut ids = identifiers(tree, *left);
                        ids.push("prototype".to_string());
                        ids
                    }
                    _ => Vec::new(),
                };
            }
            NodeKind::Function { .. } | NodeKind::ObjectMethod { .. } => return Vec::new(),
            _ => current = tree.parent(n),
        }
    }
    Vec::new()
}

/// Properties and methods of object literals.
fn object_member(tree: &SyntaxTree, node: NodeId, module: &str) -> Option<MemberChain> {
    let object = object_parent(tree, node)?;

    let first_property = match tree.kind(object) {
        NodeKind::Object { properties } => properties.first().copied(),
        _ => None,
    };
    let lends = lends_target(tree, object).or_else(|| first_property.and_then(|p| lends_target(tree, p)));
    if let Some(lends) = lends {
        return Some(MemberChain::new(lends));
    }

    let owner = tree.parent(object)?;
    let ids = match tree.kind(owner) {
        NodeKind::Assignment { left, .. } => identifiers(tree, *left),
        NodeKind::VariableDeclarator { id, .. } => vec![tree.identifier(*id)?.to_string()],
        NodeKind::ExportDefault { .. } => vec![module.to_string()],
        _ => return None,
    };
    Some(MemberChain::new(ids))
}

fn object_parent(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let parent = tree.parent(node)?;
    match (tree.kind(node), tree.kind(parent)) {
        (NodeKind::Identifier { .. }, NodeKind::ObjectProperty { key, .. }) if *key == node => {
            let object = tree.parent(parent)?;
            matches!(tree.kind(object), NodeKind::Object { .. }).then_some(object)
        }
        (NodeKind::ObjectMethod { .. }, NodeKind::Object { .. }) => Some(parent),
        _ => None,
    }
}

/// Target of a `@lends` doc block right before `node`, split on `.`.
fn lends_target(tree: &SyntaxTree, node: NodeId) -> Option<Vec<String>> {
    tree.node(node)
        .leading
        .iter()
        .map(|&i| &tree.doc_blocks[i])
        .filter(|block| block.is_doc_comment())
        .flat_map(|block| &block.tags)
        .find(|tag| tag.title == "lends")
        .and_then(|tag| {
            [tag.description.as_deref(), tag.name.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .find(|target| !target.is_empty())
        })
        .map(|target| target.split('.').map(str::to_string).collect())
}

/// Methods and fields in a class body.
fn class_member(tree: &SyntaxTree, node: NodeId) -> Option<MemberChain> {
    let is_static = match tree.kind(node) {
        NodeKind::ClassMethod { is_static, .. } | NodeKind::ClassProperty { is_static, .. } => {
            *is_static
        }
        _ => return None,
    };
    let body = tree.parent(node)?;
    if !matches!(tree.kind(body), NodeKind::ClassBody { .. }) {
        return None;
    }
    let class = tree.parent(body)?;
    let NodeKind::Class { declaration, id, .. } = tree.kind(class) else {
        return None;
    };

    let ids = if !declaration {
        match tree.parent(class).map(|p| tree.kind(p)) {
            Some(NodeKind::Assignment { left, .. }) => identifiers(tree, *left),
            Some(NodeKind::VariableDeclarator { id, .. }) => vec![tree.identifier(*id)?.to_string()],
            _ => return None,
        }
    } else {
        match id.and_then(|id| tree.identifier(id)) {
            Some(name) => vec![name.to_string()],
            None => vec![file_stem(&tree.file)],
        }
    };
    Some(MemberChain {
        identifiers: ids,
        scope: Some(if is_static {
            Scope::Static
        } else {
            Scope::Instance
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::super::finders::testing::*;
    use super::super::test_support::attached;
    use super::*;
    use crate::syntax::raw::RawTag;
    use serde_json::{json, Value};

    fn membership(c: &Comment) -> (Option<&str>, Option<Scope>) {
        (c.memberof.as_deref(), c.scope)
    }

    fn infer_at(t: &std::sync::Arc<SyntaxTree>, node: NodeId) -> Comment {
        let mut c = attached(t, node);
        InferMembership.infer(&mut c, &mut InferState::default());
        c
    }

    fn infer_statement(body: Value) -> Comment {
        let t = program(vec![body]);
        infer_at(&t, statement(&t, 0))
    }

    #[test]
    fn static_member_assignment() {
        let c = infer_statement(assign(member(ident("Foo"), "bar"), num(1)));
        assert_eq!(membership(&c), (Some("Foo"), Some(Scope::Static)));
    }

    #[test]
    fn prototype_member_assignment() {
        let c = infer_statement(assign(
            member(member(ident("Foo"), "prototype"), "bar"),
            func_expr(vec![]),
        ));
        assert_eq!(membership(&c), (Some("Foo"), Some(Scope::Instance)));
    }

    #[test]
    fn nested_member_assignment() {
        let c = infer_statement(assign(member(member(ident("a"), "b"), "c"), num(1)));
        assert_eq!(membership(&c), (Some("a.b"), Some(Scope::Static)));
    }

    #[test]
    fn exports_resolve_to_file_module() {
        let c = infer_statement(assign(member(ident("exports"), "parse"), func_expr(vec![])));
        assert_eq!(membership(&c), (Some("widget"), Some(Scope::Static)));

        let c = infer_statement(assign(
            member(member(ident("module"), "exports"), "parse"),
            func_expr(vec![]),
        ));
        assert_eq!(membership(&c), (Some("widget"), Some(Scope::Static)));
    }

    #[test]
    fn exports_resolve_to_current_module() {
        let t = program(vec![assign(member(ident("exports"), "parse"), num(1))]);
        let mut c = attached(&t, statement(&t, 0));
        let mut state = InferState {
            current_module: Some("parser".into()),
        };
        InferMembership.infer(&mut c, &mut state);
        assert_eq!(membership(&c), (Some("parser"), Some(Scope::Static)));
    }

    #[test]
    fn module_exports_renames_comment() {
        let t = program(vec![assign(member(ident("module"), "exports"), func_expr(vec![]))]);
        let mut c = attached(&t, statement(&t, 0));
        c.name = Some("exports".into());
        InferMembership.infer(&mut c, &mut InferState::default());
        assert_eq!(c.name.as_deref(), Some("widget"));
        assert_eq!(c.memberof, None);
    }

    #[test]
    fn this_in_class_method() {
        let t = program(vec![class(
            Some("Counter"),
            vec![json!({
                "type": "ClassMethod", "key": ident("constructor"), "kind": "constructor",
                "params": [],
                "body": { "type": "BlockStatement", "body": [
                    assign(json!({ "type": "MemberExpression",
                                   "object": { "type": "ThisExpression" },
                                   "property": ident("count") }), num(0))
                ]}
            })],
        )]);
        let stmt = find(&t, |k| matches!(k, NodeKind::ExpressionStatement { .. }));
        let c = infer_at(&t, stmt);
        assert_eq!(membership(&c), (Some("Counter"), Some(Scope::Instance)));
    }

    #[test]
    fn this_in_constructor_function() {
        let t = program(vec![json!({
            "type": "FunctionDeclaration", "id": ident("Legacy"), "params": [],
            "body": { "type": "BlockStatement", "body": [
                assign(json!({ "type": "MemberExpression",
                               "object": { "type": "ThisExpression" },
                               "property": ident("size") }), num(0))
            ]}
        })]);
        let stmt = find(&t, |k| matches!(k, NodeKind::ExpressionStatement { .. }));
        let c = infer_at(&t, stmt);
        assert_eq!(membership(&c), (Some("Legacy"), Some(Scope::Instance)));
    }

    #[test]
    fn object_literal_in_declarator() {
        let t = program(vec![var("var", "config", object(vec![prop("depth", num(1))]))]);
        let property = find(&t, |k| matches!(k, NodeKind::ObjectProperty { .. }));
        let c = infer_at(&t, property);
        assert_eq!(membership(&c), (Some("config"), Some(Scope::Static)));
    }

    #[test]
    fn object_literal_assigned_to_prototype() {
        let t = program(vec![assign(
            member(ident("Foo"), "prototype"),
            object(vec![prop("bar", func_expr(vec![]))]),
        )]);
        let property = find(&t, |k| matches!(k, NodeKind::ObjectProperty { .. }));
        let c = infer_at(&t, property);
        assert_eq!(membership(&c), (Some("Foo"), Some(Scope::Instance)));
    }

    #[test]
    fn export_default_object() {
        let t = program(vec![json!({
            "type": "ExportDefaultDeclaration",
            "declaration": object(vec![prop("run", func_expr(vec![]))])
        })]);
        let property = find(&t, |k| matches!(k, NodeKind::ObjectProperty { .. }));
        let c = infer_at(&t, property);
        assert_eq!(membership(&c), (Some("widget"), Some(Scope::Static)));
    }

    #[test]
    fn lends_on_object_literal() {
        let lends = json!([{
            "type": "CommentBlock",
            "value": "* @lends Foo.prototype ",
            "tags": [{ "title": "lends", "description": "Foo.prototype" }]
        }]);
        let t = program(vec![json!({
            "type": "ExpressionStatement",
            "expression": { "type": "CallExpression",
                "callee": member(ident("Base"), "extend"),
                "arguments": [{
                    "type": "ObjectExpression",
                    "leadingComments": lends,
                    "properties": [prop("go", func_expr(vec![]))]
                }]
            }
        })]);
        let property = find(&t, |k| matches!(k, NodeKind::ObjectProperty { .. }));
        let c = infer_at(&t, property);
        assert_eq!(membership(&c), (Some("Foo"), Some(Scope::Instance)));
    }

    #[test]
    fn class_methods_and_fields() {
        let t = program(vec![class(
            Some("Shape"),
            vec![
                method("area", "method", false, vec![]),
                method("create", "method", true, vec![]),
            ],
        )]);
        let methods: Vec<NodeId> = t
            .preorder()
            .filter(|&n| matches!(t.kind(n), NodeKind::ClassMethod { .. }))
            .collect();
        assert_eq!(
            membership(&infer_at(&t, methods[0])),
            (Some("Shape"), Some(Scope::Instance))
        );
        assert_eq!(
            membership(&infer_at(&t, methods[1])),
            (Some("Shape"), Some(Scope::Static))
        );
    }

    #[test]
    fn class_expression_bound_to_variable() {
        let t = program(vec![var(
            "const",
            "Shape",
            json!({ "type": "ClassExpression",
                    "body": { "type": "ClassBody", "body": [method("area", "method", false, vec![])] } }),
        )]);
        let m = find(&t, |k| matches!(k, NodeKind::ClassMethod { .. }));
        assert_eq!(
            membership(&infer_at(&t, m)),
            (Some("Shape"), Some(Scope::Instance))
        );
    }

    #[test]
    fn anonymous_default_class_uses_file_stem() {
        let t = program(vec![json!({
            "type": "ExportDefaultDeclaration",
            "declaration": class(None, vec![method("area", "method", false, vec![])])
        })]);
        let m = find(&t, |k| matches!(k, NodeKind::ClassMethod { .. }));
        assert_eq!(
            membership(&infer_at(&t, m)),
            (Some("widget"), Some(Scope::Instance))
        );
    }

    #[test]
    fn skipped_for_name_tag_lends_and_detached() {
        let t = program(vec![assign(member(ident("Foo"), "bar"), num(1))]);
        let mut c = attached(&t, statement(&t, 0));
        c.tags.push(RawTag {
            title: "name".into(),
            ..Default::default()
        });
        InferMembership.infer(&mut c, &mut InferState::default());
        assert_eq!(c.memberof, None);

        let mut c = attached(&t, statement(&t, 0));
        c.lends = Some("Foo".into());
        InferMembership.infer(&mut c, &mut InferState::default());
        assert_eq!(c.memberof, None);

        let mut c = Comment::default();
        InferMembership.infer(&mut c, &mut InferState::default());
        assert_eq!(c.memberof, None);
    }

    #[test]
    fn plain_function_has_no_owner() {
        let c = infer_statement(function(Some("f"), vec![]));
        assert_eq!(membership(&c), (None, None));
    }
}

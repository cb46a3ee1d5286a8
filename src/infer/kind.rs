//! Kind of the documented entity.

use super::{InferPass, InferState};
use crate::model::{Comment, Kind};
use crate::syntax::{DeclKind, MethodKind, NodeId, NodeKind, SyntaxTree};

pub struct InferKind;

impl InferPass for InferKind {
    fn name(&self) -> &'static str {
        "kind"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        if let Some(tag) = comment.kind_tags.first() {
            comment.kind = Some(tag.kind);
            return;
        }
        if let Some(ast) = comment.ast() {
            comment.kind = find_kind(&ast.tree, ast.node);
        }
    }
}

fn function_kind(tree: &SyntaxTree, id: Option<NodeId>, method: Option<MethodKind>) -> Kind {
    if matches!(method, Some(MethodKind::Get | MethodKind::Set)) {
        return Kind::Member;
    }
    let capitalized = id
        .and_then(|id| tree.identifier(id))
        .and_then(|name| name.chars().next())
        .is_some_and(char::is_uppercase);
    if capitalized {
        Kind::Class
    } else {
        Kind::Function
    }
}

fn find_kind(tree: &SyntaxTree, node: NodeId) -> Option<Kind> {
    match tree.kind(node) {
        NodeKind::Class { .. } => Some(Kind::Class),
        NodeKind::Function { id, .. } => Some(function_kind(tree, *id, None)),
        NodeKind::ObjectMethod { kind, .. } | NodeKind::ClassMethod { kind, .. } => {
            Some(function_kind(tree, None, Some(*kind)))
        }
        NodeKind::TypeAlias { .. } => Some(Kind::Typedef),
        NodeKind::Interface { .. } => Some(Kind::Interface),
        NodeKind::VariableDeclaration {
            kind: DeclKind::Const,
            ..
        } => Some(Kind::Constant),
        NodeKind::VariableDeclaration { declarations, .. } => {
            let init = declarations.first().and_then(|&d| match tree.kind(d) {
                NodeKind::VariableDeclarator { init, .. } => *init,
                _ => None,
            })?;
            find_kind(tree, init)
        }
        NodeKind::ExportNamed {
            declaration: Some(declaration),
        }
        | NodeKind::ExportDefault { declaration } => find_kind(tree, *declaration),
        NodeKind::ExpressionStatement { expression } => match tree.kind(*expression) {
            NodeKind::Assignment { right, .. } => find_kind(tree, *right),
            _ => None,
        },
        NodeKind::ClassProperty { .. } => Some(Kind::Member),
        NodeKind::ObjectProperty { value, .. } => find_kind(tree, *value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::finders::testing::*;
    use super::super::test_support::attached;
    use super::*;
    use crate::model::KindTag;
    use serde_json::{json, Value};

    fn kind_of(body: Value) -> Option<Kind> {
        let t = program(vec![body]);
        let mut c = attached(&t, statement(&t, 0));
        InferKind.infer(&mut c, &mut InferState::default());
        c.kind
    }

    #[test]
    fn declarations() {
        assert_eq!(kind_of(class(Some("A"), vec![])), Some(Kind::Class));
        assert_eq!(kind_of(function(Some("run"), vec![])), Some(Kind::Function));
        assert_eq!(kind_of(function(Some("Widget"), vec![])), Some(Kind::Class));
        assert_eq!(
            kind_of(json!({ "type": "TypeAlias", "id": ident("T"),
                            "right": { "type": "StringTypeAnnotation" } })),
            Some(Kind::Typedef)
        );
        assert_eq!(
            kind_of(json!({ "type": "InterfaceDeclaration", "id": ident("I"),
                            "body": { "type": "ObjectTypeAnnotation", "properties": [] } })),
            Some(Kind::Interface)
        );
    }

    #[test]
    fn variables() {
        assert_eq!(kind_of(var("const", "MAX", num(3))), Some(Kind::Constant));
        assert_eq!(kind_of(var("let", "f", func_expr(vec![]))), Some(Kind::Function));
        assert_eq!(kind_of(var("var", "n", num(3))), None);
    }

    #[test]
    fn exports_and_assignments() {
        assert_eq!(
            kind_of(json!({ "type": "ExportNamedDeclaration",
                            "declaration": class(Some("A"), vec![]) })),
            Some(Kind::Class)
        );
        assert_eq!(
            kind_of(assign(member(ident("a"), "b"), func_expr(vec![]))),
            Some(Kind::Function)
        );
    }

    #[test]
    fn class_members() {
        let t = program(vec![class(
            Some("A"),
            vec![
                method("size", "get", false, vec![]),
                json!({ "type": "ClassProperty", "key": ident("x") }),
            ],
        )]);
        let getter = find(&t, |k| matches!(k, NodeKind::ClassMethod { .. }));
        let mut c = attached(&t, getter);
        InferKind.infer(&mut c, &mut InferState::default());
        assert_eq!(c.kind, Some(Kind::Member));

        let field = find(&t, |k| matches!(k, NodeKind::ClassProperty { .. }));
        let mut c = attached(&t, field);
        InferKind.infer(&mut c, &mut InferState::default());
        assert_eq!(c.kind, Some(Kind::Member));
    }

    #[test]
    fn kind_tag_is_adopted() {
        let t = program(vec![function(Some("run"), vec![])]);
        let mut c = attached(&t, statement(&t, 0));
        c.kind_tags.push(KindTag {
            title: "event".into(),
            kind: Kind::Event,
            name: None,
        });
        InferKind.infer(&mut c, &mut InferState::default());
        assert_eq!(c.kind, Some(Kind::Event));
    }
}

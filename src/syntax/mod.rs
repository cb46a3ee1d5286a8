//! The syntax tree of one source unit, as handed over by the external
//! parser.
//!
//! Babel's JSON (see [`raw`]) is lowered into an index-addressed arena so
//! inference passes can walk both down and up (`parent`) without shared
//! mutable references.

pub mod raw;
pub mod types;

use anyhow::{Context, Result};
use raw::{DocBlock, Location, RawClass, RawFunction, RawHeritage, RawKind, RawNode};
use serde::Deserialize;
use std::sync::Arc;
use types::TypeNode;

/// Index of a node in its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub span: Option<(usize, usize)>,
    pub loc: Option<Location>,
    /// Doc blocks immediately preceding the node, as indexes into
    /// [`SyntaxTree::doc_blocks`].
    pub leading: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionFlavor {
    Declaration,
    Expression,
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

impl MethodKind {
    fn parse(s: &str) -> MethodKind {
        match s {
            "get" => MethodKind::Get,
            "set" => MethodKind::Set,
            "constructor" => MethodKind::Constructor,
            _ => MethodKind::Method,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

/// Parameters, body and annotations shared by all function-like nodes.
#[derive(Debug)]
pub struct FunctionParts {
    pub params: Vec<NodeId>,
    pub body: Option<NodeId>,
    pub return_type: Option<TypeNode>,
    pub is_async: bool,
    pub generator: bool,
}

#[derive(Debug)]
pub enum Literal {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
}

#[derive(Debug)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    Assignment {
        left: NodeId,
        right: NodeId,
    },
    Member {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    Identifier {
        name: String,
        type_annotation: Option<TypeNode>,
    },
    This,
    Literal(Literal),
    Call {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    Object {
        properties: Vec<NodeId>,
    },
    ObjectProperty {
        key: NodeId,
        value: NodeId,
        computed: bool,
    },
    ObjectMethod {
        key: NodeId,
        computed: bool,
        kind: MethodKind,
        function: FunctionParts,
    },
    Class {
        declaration: bool,
        id: Option<NodeId>,
        super_class: Option<NodeId>,
        implements: Vec<NodeId>,
        body: NodeId,
    },
    ClassBody {
        body: Vec<NodeId>,
    },
    ClassMethod {
        key: NodeId,
        computed: bool,
        kind: MethodKind,
        is_static: bool,
        accessibility: Option<String>,
        function: FunctionParts,
    },
    ClassProperty {
        key: NodeId,
        value: Option<NodeId>,
        type_annotation: Option<TypeNode>,
        is_static: bool,
        accessibility: Option<String>,
        readonly: bool,
    },
    Function {
        flavor: FunctionFlavor,
        id: Option<NodeId>,
        function: FunctionParts,
    },
    Block {
        body: Vec<NodeId>,
    },
    Return {
        argument: Option<NodeId>,
    },
    VariableDeclaration {
        kind: DeclKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    ExportNamed {
        declaration: Option<NodeId>,
    },
    ExportDefault {
        declaration: NodeId,
    },
    AssignmentPattern {
        left: NodeId,
        right: NodeId,
    },
    ObjectPattern {
        properties: Vec<NodeId>,
        type_annotation: Option<TypeNode>,
    },
    ArrayPattern {
        elements: Vec<Option<NodeId>>,
        type_annotation: Option<TypeNode>,
    },
    RestElement {
        argument: NodeId,
        type_annotation: Option<TypeNode>,
    },
    TypeAlias {
        id: NodeId,
        right: TypeNode,
    },
    Interface {
        id: NodeId,
        extends: Vec<NodeId>,
        body: TypeNode,
    },
    Other,
}

/// One source unit as read from disk or stdin.
#[derive(Debug, Deserialize)]
pub struct SourceUnit {
    pub file: String,
    #[serde(default)]
    pub source: String,
    pub ast: RawNode,
    /// Doc blocks not attached to any node.
    #[serde(default)]
    pub comments: Vec<DocBlock>,
}

impl SourceUnit {
    pub fn from_json(text: &str) -> Result<SourceUnit> {
        serde_json::from_str(text).context("invalid source unit JSON")
    }
}

/// Arena holding every node of one source unit.
#[derive(Debug)]
pub struct SyntaxTree {
    pub file: String,
    pub source: String,
    nodes: Vec<NodeData>,
    pub doc_blocks: Vec<DocBlock>,
    /// Doc blocks with no code following them: trailing and inner comments
    /// plus the unit's detached comments.
    pub detached: Vec<usize>,
    root: NodeId,
    /// Byte offset of each UTF-16 position in `source`. Empty when the
    /// source is ASCII and the two agree.
    utf16: Vec<usize>,
}

/// Handle from a comment back to the node it documents.
#[derive(Debug, Clone)]
pub struct AstRef {
    pub tree: Arc<SyntaxTree>,
    pub node: NodeId,
}

impl AstRef {
    pub fn kind(&self) -> &NodeKind {
        self.tree.kind(self.node)
    }

    pub fn at(&self, node: NodeId) -> AstRef {
        AstRef {
            tree: Arc::clone(&self.tree),
            node,
        }
    }
}

impl SyntaxTree {
    /// Lower a source unit into an arena.
    pub fn lower(unit: SourceUnit) -> SyntaxTree {
        let mut tree = SyntaxTree {
            file: unit.file,
            utf16: utf16_table(&unit.source),
            source: unit.source,
            nodes: Vec::new(),
            doc_blocks: Vec::new(),
            detached: Vec::new(),
            root: NodeId(0),
        };
        let program = match unit.ast.kind {
            RawKind::File { program } => *program,
            _ => unit.ast,
        };
        tree.root = tree.lower_node(program, None);
        for block in unit.comments {
            let idx = tree.push_block(block);
            tree.detached.push(idx);
        }
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in pre-order. Lowering allocates parents before children,
    /// so arena order is pre-order.
    pub fn preorder(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Strict descendants of `id` in pre-order. They occupy the arena slots
    /// right after `id`.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (id.0 + 1..self.nodes.len())
            .map(NodeId)
            .take_while(move |&n| self.is_ancestor(id, n))
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Identifier name, if the node is one.
    pub fn identifier(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Name of a property key: identifiers and string literals.
    pub fn key_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier { name, .. } => Some(name),
            NodeKind::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn function_parts(&self, id: NodeId) -> Option<&FunctionParts> {
        match self.kind(id) {
            NodeKind::Function { function, .. }
            | NodeKind::ObjectMethod { function, .. }
            | NodeKind::ClassMethod { function, .. } => Some(function),
            _ => None,
        }
    }

    /// Source text of a node, or a compact regeneration when the tree
    /// carries no offsets.
    pub fn source_text(&self, id: NodeId) -> String {
        if let Some((start, end)) = self.node(id).span {
            if let Some(text) = self.source.get(start..end) {
                return text.to_string();
            }
        }
        self.regenerate(id)
    }

    fn regenerate(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Identifier { name, .. } => name.clone(),
            NodeKind::This => "this".to_string(),
            NodeKind::Literal(Literal::String(s)) => format!("'{}'", s),
            NodeKind::Literal(Literal::Number(n)) => n.clone(),
            NodeKind::Literal(Literal::Boolean(b)) => b.to_string(),
            NodeKind::Literal(Literal::Null) => "null".to_string(),
            NodeKind::Member {
                object,
                property,
                computed: false,
            } => format!("{}.{}", self.regenerate(*object), self.regenerate(*property)),
            NodeKind::Member {
                object, property, ..
            } => format!("{}[{}]", self.regenerate(*object), self.regenerate(*property)),
            NodeKind::Object { properties } if properties.is_empty() => "{}".to_string(),
            NodeKind::ArrayPattern { elements, .. } if elements.is_empty() => "[]".to_string(),
            NodeKind::Call { callee, arguments } => format!(
                "{}({})",
                self.regenerate(*callee),
                arguments
                    .iter()
                    .map(|a| self.regenerate(*a))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            _ => String::new(),
        }
    }

    // -- Lowering ---------------------------------------------------------------

    fn push_block(&mut self, block: DocBlock) -> usize {
        self.doc_blocks.push(block);
        self.doc_blocks.len() - 1
    }

    fn byte_offset(&self, utf16: usize) -> Option<usize> {
        if self.utf16.is_empty() {
            Some(utf16)
        } else {
            self.utf16.get(utf16).copied()
        }
    }

    fn reserve(&mut self, raw: &RawNode, parent: Option<NodeId>) -> NodeId {
        // Babel counts offsets in UTF-16 code units.
        let span = match (raw.start, raw.end) {
            (Some(start), Some(end)) if start <= end => {
                self.byte_offset(start).zip(self.byte_offset(end))
            }
            _ => None,
        };
        self.nodes.push(NodeData {
            kind: NodeKind::Other,
            parent,
            span,
            loc: raw.loc,
            leading: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn lower_node(&mut self, raw: RawNode, parent: Option<NodeId>) -> NodeId {
        let id = self.reserve(&raw, parent);
        let RawNode {
            leading_comments,
            inner_comments,
            trailing_comments,
            kind,
            ..
        } = raw;
        for block in leading_comments.unwrap_or_default() {
            let idx = self.push_block(block);
            self.nodes[id.0].leading.push(idx);
        }
        for block in inner_comments
            .unwrap_or_default()
            .into_iter()
            .chain(trailing_comments.unwrap_or_default())
        {
            let idx = self.push_block(block);
            self.detached.push(idx);
        }
        let kind = self.lower_kind(kind, id);
        self.nodes[id.0].kind = kind;
        id
    }

    fn lower_box(&mut self, raw: Box<RawNode>, parent: NodeId) -> NodeId {
        self.lower_node(*raw, Some(parent))
    }

    fn lower_opt(&mut self, raw: Option<Box<RawNode>>, parent: NodeId) -> Option<NodeId> {
        raw.map(|r| self.lower_box(r, parent))
    }

    fn lower_all(&mut self, raws: Vec<RawNode>, parent: NodeId) -> Vec<NodeId> {
        raws.into_iter()
            .map(|r| self.lower_node(r, Some(parent)))
            .collect()
    }

    fn lower_function(&mut self, raw: RawFunction, parent: NodeId) -> FunctionParts {
        FunctionParts {
            params: self.lower_all(raw.params, parent),
            body: self.lower_opt(raw.body, parent),
            return_type: raw.return_type,
            is_async: raw.is_async,
            generator: raw.generator,
        }
    }

    fn lower_class(&mut self, raw: RawClass, declaration: bool, id: NodeId) -> NodeKind {
        NodeKind::Class {
            declaration,
            id: self.lower_opt(raw.id, id),
            super_class: self.lower_opt(raw.super_class, id),
            implements: self.lower_heritage(raw.implements.unwrap_or_default(), id),
            body: self.lower_box(raw.body, id),
        }
    }

    fn lower_heritage(&mut self, raws: Vec<RawHeritage>, parent: NodeId) -> Vec<NodeId> {
        raws.into_iter()
            .filter_map(|h| h.id.or(h.expression))
            .map(|r| self.lower_box(r, parent))
            .collect()
    }

    fn lower_kind(&mut self, kind: RawKind, id: NodeId) -> NodeKind {
        match kind {
            RawKind::File { program } => NodeKind::Program {
                body: vec![self.lower_box(program, id)],
            },
            RawKind::Program { body } | RawKind::BlockStatement { body } => {
                let body = self.lower_all(body, id);
                if self.nodes[id.0].parent.is_none() {
                    NodeKind::Program { body }
                } else {
                    NodeKind::Block { body }
                }
            }
            RawKind::ExpressionStatement { expression } => NodeKind::ExpressionStatement {
                expression: self.lower_box(expression, id),
            },
            RawKind::AssignmentExpression { left, right } => NodeKind::Assignment {
                left: self.lower_box(left, id),
                right: self.lower_box(right, id),
            },
            RawKind::MemberExpression {
                object,
                property,
                computed,
            } => NodeKind::Member {
                object: self.lower_box(object, id),
                property: self.lower_box(property, id),
                computed,
            },
            RawKind::Identifier {
                name,
                type_annotation,
            } => NodeKind::Identifier {
                name,
                type_annotation,
            },
            RawKind::ThisExpression => NodeKind::This,
            RawKind::StringLiteral { value } => NodeKind::Literal(Literal::String(value)),
            RawKind::NumericLiteral { value } => NodeKind::Literal(Literal::Number(value.to_string())),
            RawKind::BooleanLiteral { value } => NodeKind::Literal(Literal::Boolean(value)),
            RawKind::NullLiteral => NodeKind::Literal(Literal::Null),
            RawKind::CallExpression { callee, arguments } => NodeKind::Call {
                callee: self.lower_box(callee, id),
                arguments: self.lower_all(arguments, id),
            },
            RawKind::ObjectExpression { properties } => NodeKind::Object {
                properties: self.lower_all(properties, id),
            },
            RawKind::ObjectProperty {
                key,
                value,
                computed,
            } => NodeKind::ObjectProperty {
                key: self.lower_box(key, id),
                value: self.lower_box(value, id),
                computed,
            },
            RawKind::ObjectMethod {
                key,
                computed,
                kind,
                function,
            } => NodeKind::ObjectMethod {
                key: self.lower_box(key, id),
                computed,
                kind: MethodKind::parse(&kind),
                function: self.lower_function(function, id),
            },
            RawKind::ClassDeclaration { class } => self.lower_class(class, true, id),
            RawKind::ClassExpression { class } => self.lower_class(class, false, id),
            RawKind::ClassBody { body } => NodeKind::ClassBody {
                body: self.lower_all(body, id),
            },
            RawKind::ClassMethod {
                key,
                computed,
                kind,
                is_static,
                accessibility,
                function,
            } => NodeKind::ClassMethod {
                key: self.lower_box(key, id),
                computed,
                kind: MethodKind::parse(&kind),
                is_static,
                accessibility,
                function: self.lower_function(function, id),
            },
            RawKind::ClassProperty {
                key,
                value,
                type_annotation,
                is_static,
                accessibility,
                readonly,
            } => NodeKind::ClassProperty {
                key: self.lower_box(key, id),
                value: self.lower_opt(value, id),
                type_annotation,
                is_static,
                accessibility,
                readonly,
            },
            RawKind::FunctionDeclaration {
                id: fn_id,
                function,
            } => NodeKind::Function {
                flavor: FunctionFlavor::Declaration,
                id: self.lower_opt(fn_id, id),
                function: self.lower_function(function, id),
            },
            RawKind::FunctionExpression {
                id: fn_id,
                function,
            } => NodeKind::Function {
                flavor: FunctionFlavor::Expression,
                id: self.lower_opt(fn_id, id),
                function: self.lower_function(function, id),
            },
            RawKind::ArrowFunctionExpression { function } => NodeKind::Function {
                flavor: FunctionFlavor::Arrow,
                id: None,
                function: self.lower_function(function, id),
            },
            RawKind::ReturnStatement { argument } => NodeKind::Return {
                argument: self.lower_opt(argument, id),
            },
            RawKind::VariableDeclaration { kind, declarations } => NodeKind::VariableDeclaration {
                kind: match kind.as_str() {
                    "const" => DeclKind::Const,
                    "let" => DeclKind::Let,
                    _ => DeclKind::Var,
                },
                declarations: self.lower_all(declarations, id),
            },
            RawKind::VariableDeclarator { id: target, init } => NodeKind::VariableDeclarator {
                id: self.lower_box(target, id),
                init: self.lower_opt(init, id),
            },
            RawKind::ExportNamedDeclaration { declaration } => NodeKind::ExportNamed {
                declaration: self.lower_opt(declaration, id),
            },
            RawKind::ExportDefaultDeclaration { declaration } => NodeKind::ExportDefault {
                declaration: self.lower_box(declaration, id),
            },
            RawKind::AssignmentPattern { left, right } => NodeKind::AssignmentPattern {
                left: self.lower_box(left, id),
                right: self.lower_box(right, id),
            },
            RawKind::ObjectPattern {
                properties,
                type_annotation,
            } => NodeKind::ObjectPattern {
                properties: self.lower_all(properties, id),
                type_annotation,
            },
            RawKind::ArrayPattern {
                elements,
                type_annotation,
            } => NodeKind::ArrayPattern {
                elements: elements
                    .into_iter()
                    .map(|e| e.map(|e| self.lower_node(e, Some(id))))
                    .collect(),
                type_annotation,
            },
            RawKind::RestElement {
                argument,
                type_annotation,
            } => NodeKind::RestElement {
                argument: self.lower_box(argument, id),
                type_annotation,
            },
            RawKind::TypeAlias { id: alias, right }
            | RawKind::TsTypeAliasDeclaration {
                id: alias,
                type_annotation: right,
            } => NodeKind::TypeAlias {
                id: self.lower_box(alias, id),
                right,
            },
            RawKind::InterfaceDeclaration {
                id: name,
                extends,
                body,
            } => NodeKind::Interface {
                id: self.lower_box(name, id),
                extends: self.lower_heritage(extends, id),
                body,
            },
            RawKind::TsInterfaceDeclaration {
                id: name,
                extends,
                body,
            } => NodeKind::Interface {
                id: self.lower_box(name, id),
                extends: self.lower_heritage(extends.unwrap_or_default(), id),
                body,
            },
            RawKind::Other => NodeKind::Other,
        }
    }
}

fn utf16_table(source: &str) -> Vec<usize> {
    if source.is_ascii() {
        return Vec::new();
    }
    let mut table = Vec::with_capacity(source.len() + 1);
    for (i, ch) in source.char_indices() {
        table.extend(std::iter::repeat(i).take(ch.len_utf16()));
    }
    table.push(source.len());
    table
}

/// Parse and lower a source unit in one step.
pub fn load(text: &str) -> Result<Arc<SyntaxTree>> {
    let unit = SourceUnit::from_json(text)?;
    Ok(Arc::new(SyntaxTree::lower(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(ast: serde_json::Value, source: &str) -> SyntaxTree {
        let unit: SourceUnit =
            serde_json::from_value(json!({ "file": "a.js", "source": source, "ast": ast })).unwrap();
        SyntaxTree::lower(unit)
    }

    #[test]
    fn lowers_file_wrapper_and_links_parents() {
        let t = tree(
            json!({
                "type": "File",
                "program": { "type": "Program", "body": [
                    { "type": "ExpressionStatement", "expression": {
                        "type": "AssignmentExpression",
                        "left": { "type": "Identifier", "name": "a" },
                        "right": { "type": "NumericLiteral", "value": 1 }
                    }}
                ]}
            }),
            "",
        );
        assert!(matches!(t.kind(t.root()), NodeKind::Program { .. }));
        let ids: Vec<NodeId> = t.preorder().collect();
        assert_eq!(ids.len(), 5);
        let ident = ids[3];
        assert_eq!(t.identifier(ident), Some("a"));
        let assign = t.parent(ident).unwrap();
        assert!(matches!(t.kind(assign), NodeKind::Assignment { .. }));
    }

    #[test]
    fn unknown_nodes_are_opaque() {
        let t = tree(
            json!({ "type": "Program", "body": [{ "type": "WithStatement", "object": {} }] }),
            "",
        );
        let ids: Vec<NodeId> = t.preorder().collect();
        assert!(matches!(t.kind(ids[1]), NodeKind::Other));
    }

    #[test]
    fn source_text_uses_offsets() {
        let t = tree(
            json!({ "type": "Program", "body": [
                { "type": "ExpressionStatement", "start": 0, "end": 5,
                  "expression": { "type": "StringLiteral", "start": 0, "end": 5, "value": "abc" } }
            ]}),
            "'abc'",
        );
        let lit = t.preorder().nth(2).unwrap();
        assert_eq!(t.source_text(lit), "'abc'");
    }

    fn number_at(source: &str, start: usize, end: usize) -> String {
        let t = tree(
            json!({ "type": "Program", "body": [
                { "type": "ExpressionStatement",
                  "expression": { "type": "NumericLiteral", "start": start, "end": end, "value": 0 } }
            ]}),
            source,
        );
        let lit = t.preorder().nth(2).unwrap();
        t.source_text(lit)
    }

    #[test]
    fn offsets_count_utf16_units() {
        assert_eq!(number_at("// é\nfunction f(a = 10) {}", 20, 22), "10");
        assert_eq!(number_at("/* 😀 */ 42", 9, 11), "42");
    }

    #[test]
    fn source_text_regenerates_member_chain() {
        let t = tree(
            json!({ "type": "Program", "body": [
                { "type": "ExpressionStatement", "expression": {
                    "type": "MemberExpression",
                    "object": { "type": "Identifier", "name": "Foo" },
                    "property": { "type": "Identifier", "name": "bar" }
                }}
            ]}),
            "",
        );
        let member = t.preorder().nth(2).unwrap();
        assert_eq!(t.source_text(member), "Foo.bar");
    }

    #[test]
    fn collects_leading_and_trailing_blocks() {
        let t = tree(
            json!({ "type": "Program", "body": [
                { "type": "ExpressionStatement",
                  "leadingComments": [{ "type": "CommentBlock", "value": "* lead ",
                                        "loc": { "start": { "line": 1, "column": 0 },
                                                 "end": { "line": 1, "column": 12 } } }],
                  "trailingComments": [{ "type": "CommentBlock", "value": "* trail ",
                                         "loc": { "start": { "line": 3, "column": 0 },
                                                  "end": { "line": 3, "column": 12 } } }],
                  "expression": { "type": "Identifier", "name": "x" } }
            ]}),
            "",
        );
        let stmt = t.preorder().nth(1).unwrap();
        assert_eq!(t.node(stmt).leading.len(), 1);
        assert_eq!(t.detached.len(), 1);
        assert_eq!(t.doc_blocks[t.detached[0]].value, "* trail ");
    }

    #[test]
    fn doc_comment_detection() {
        let block = |value: &str| DocBlock {
            kind: "CommentBlock".into(),
            value: value.into(),
            loc: Location::default(),
            description: String::new(),
            tags: vec![],
        };
        assert!(block("* doc ").is_doc_comment());
        assert!(!block("** banner ").is_doc_comment());
        assert!(!block(" plain ").is_doc_comment());
    }

    #[test]
    fn class_heritage_names() {
        let t = tree(
            json!({ "type": "Program", "body": [
                { "type": "ClassDeclaration",
                  "id": { "type": "Identifier", "name": "A" },
                  "superClass": { "type": "Identifier", "name": "B" },
                  "implements": [{ "type": "TSExpressionWithTypeArguments",
                                   "expression": { "type": "Identifier", "name": "I" } }],
                  "body": { "type": "ClassBody", "body": [] } }
            ]}),
            "",
        );
        let class = t.preorder().nth(1).unwrap();
        match t.kind(class) {
            NodeKind::Class {
                super_class,
                implements,
                ..
            } => {
                assert_eq!(t.source_text(super_class.unwrap()), "B");
                assert_eq!(t.identifier(implements[0]), Some("I"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

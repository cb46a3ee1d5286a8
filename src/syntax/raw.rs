//! Serde shapes for Babel's JSON syntax tree.
//!
//! Only the node types the inference passes look at are modelled; every
//! other node deserializes as `Other` and becomes an opaque leaf.

use super::types::TypeNode;
use crate::types::Type;
use serde::{Deserialize, Serialize};

/// A node with the positional fields every Babel node carries.
#[derive(Debug, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
    #[serde(default)]
    pub loc: Option<Location>,
    #[serde(rename = "leadingComments", default)]
    pub leading_comments: Option<Vec<DocBlock>>,
    #[serde(rename = "innerComments", default)]
    pub inner_comments: Option<Vec<DocBlock>>,
    #[serde(rename = "trailingComments", default)]
    pub trailing_comments: Option<Vec<DocBlock>>,
    #[serde(flatten)]
    pub kind: RawKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum RawKind {
    File {
        program: Box<RawNode>,
    },
    Program {
        #[serde(default)]
        body: Vec<RawNode>,
    },
    ExpressionStatement {
        expression: Box<RawNode>,
    },
    AssignmentExpression {
        left: Box<RawNode>,
        right: Box<RawNode>,
    },
    MemberExpression {
        object: Box<RawNode>,
        property: Box<RawNode>,
        #[serde(default)]
        computed: bool,
    },
    Identifier {
        name: String,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
    },
    ThisExpression,
    StringLiteral {
        value: String,
    },
    NumericLiteral {
        value: serde_json::Number,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    CallExpression {
        callee: Box<RawNode>,
        #[serde(default)]
        arguments: Vec<RawNode>,
    },
    ObjectExpression {
        #[serde(default)]
        properties: Vec<RawNode>,
    },
    ObjectProperty {
        key: Box<RawNode>,
        value: Box<RawNode>,
        #[serde(default)]
        computed: bool,
    },
    ObjectMethod {
        key: Box<RawNode>,
        #[serde(default)]
        computed: bool,
        #[serde(default = "method_kind")]
        kind: String,
        #[serde(flatten)]
        function: RawFunction,
    },
    ClassDeclaration {
        #[serde(flatten)]
        class: RawClass,
    },
    ClassExpression {
        #[serde(flatten)]
        class: RawClass,
    },
    ClassBody {
        #[serde(default)]
        body: Vec<RawNode>,
    },
    ClassMethod {
        key: Box<RawNode>,
        #[serde(default)]
        computed: bool,
        #[serde(default = "method_kind")]
        kind: String,
        #[serde(rename = "static", default)]
        is_static: bool,
        #[serde(default)]
        accessibility: Option<String>,
        #[serde(flatten)]
        function: RawFunction,
    },
    ClassProperty {
        key: Box<RawNode>,
        #[serde(default)]
        value: Option<Box<RawNode>>,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
        #[serde(rename = "static", default)]
        is_static: bool,
        #[serde(default)]
        accessibility: Option<String>,
        #[serde(default)]
        readonly: bool,
    },
    FunctionDeclaration {
        #[serde(default)]
        id: Option<Box<RawNode>>,
        #[serde(flatten)]
        function: RawFunction,
    },
    FunctionExpression {
        #[serde(default)]
        id: Option<Box<RawNode>>,
        #[serde(flatten)]
        function: RawFunction,
    },
    ArrowFunctionExpression {
        #[serde(flatten)]
        function: RawFunction,
    },
    BlockStatement {
        #[serde(default)]
        body: Vec<RawNode>,
    },
    ReturnStatement {
        #[serde(default)]
        argument: Option<Box<RawNode>>,
    },
    VariableDeclaration {
        kind: String,
        #[serde(default)]
        declarations: Vec<RawNode>,
    },
    VariableDeclarator {
        id: Box<RawNode>,
        #[serde(default)]
        init: Option<Box<RawNode>>,
    },
    ExportNamedDeclaration {
        #[serde(default)]
        declaration: Option<Box<RawNode>>,
    },
    ExportDefaultDeclaration {
        declaration: Box<RawNode>,
    },
    AssignmentPattern {
        left: Box<RawNode>,
        right: Box<RawNode>,
    },
    ObjectPattern {
        #[serde(default)]
        properties: Vec<RawNode>,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
    },
    ArrayPattern {
        #[serde(default)]
        elements: Vec<Option<RawNode>>,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
    },
    RestElement {
        argument: Box<RawNode>,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
    },
    TypeAlias {
        id: Box<RawNode>,
        right: TypeNode,
    },
    #[serde(rename = "TSTypeAliasDeclaration")]
    TsTypeAliasDeclaration {
        id: Box<RawNode>,
        #[serde(rename = "typeAnnotation")]
        type_annotation: TypeNode,
    },
    InterfaceDeclaration {
        id: Box<RawNode>,
        #[serde(default)]
        extends: Vec<RawHeritage>,
        body: TypeNode,
    },
    #[serde(rename = "TSInterfaceDeclaration")]
    TsInterfaceDeclaration {
        id: Box<RawNode>,
        #[serde(default)]
        extends: Option<Vec<RawHeritage>>,
        body: TypeNode,
    },
    #[serde(other)]
    Other,
}

fn method_kind() -> String {
    "method".to_string()
}

/// Fields shared by every function-like node.
#[derive(Debug, Deserialize)]
pub struct RawFunction {
    #[serde(default)]
    pub params: Vec<RawNode>,
    #[serde(default)]
    pub body: Option<Box<RawNode>>,
    #[serde(rename = "returnType", default)]
    pub return_type: Option<TypeNode>,
    #[serde(rename = "async", default)]
    pub is_async: bool,
    #[serde(default)]
    pub generator: bool,
}

#[derive(Debug, Deserialize)]
pub struct RawClass {
    #[serde(default)]
    pub id: Option<Box<RawNode>>,
    #[serde(rename = "superClass", default)]
    pub super_class: Option<Box<RawNode>>,
    #[serde(default)]
    pub implements: Option<Vec<RawHeritage>>,
    pub body: Box<RawNode>,
}

/// An `implements` or `extends` clause entry. Flow names the reference
/// `id`; TypeScript names it `expression`.
#[derive(Debug, Deserialize)]
pub struct RawHeritage {
    #[serde(default)]
    pub id: Option<Box<RawNode>>,
    #[serde(default)]
    pub expression: Option<Box<RawNode>>,
}

// -- Doc blocks -----------------------------------------------------------------

/// A line/column position as Babel reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

/// A block comment, with its tag list already split out by the comment
/// parser.
#[derive(Debug, Clone, Deserialize)]
pub struct DocBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub loc: Location,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<RawTag>,
}

impl DocBlock {
    /// A doc comment is a block comment whose text starts with exactly one
    /// `*`, i.e. `/** ... */` but not `/*** ... */`.
    pub fn is_doc_comment(&self) -> bool {
        self.kind != "CommentLine"
            && self.value.starts_with('*')
            && !self.value.starts_with("**")
    }

    /// Key identifying the block within one file.
    pub fn key(&self) -> (u32, u32) {
        (self.loc.start.line, self.loc.start.column)
    }
}

/// One tag as split out of a doc comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTag {
    pub title: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub type_: Option<Type>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "lineNumber", default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Default value, when the comment parser already split `[name=value]`.
    #[serde(default)]
    pub default: Option<String>,
    /// Parse problems the comment parser found in this tag.
    #[serde(default)]
    pub errors: Vec<String>,
}

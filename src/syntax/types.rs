//! Type-annotation nodes as Babel emits them for Flow and TypeScript.
//!
//! These stay as an owned tree: type annotations are only ever read
//! top-down by the type translator, never navigated upwards.

use serde::Deserialize;

/// A type annotation node.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TypeNode {
    // -- wrappers -------------------------------------------------------------
    /// `: T` in Flow
    TypeAnnotation {
        #[serde(rename = "typeAnnotation")]
        type_annotation: Box<TypeNode>,
    },
    /// `: T` in TypeScript
    #[serde(rename = "TSTypeAnnotation")]
    TsTypeAnnotation {
        #[serde(rename = "typeAnnotation")]
        type_annotation: Box<TypeNode>,
    },

    // -- Flow -----------------------------------------------------------------
    NumberTypeAnnotation,
    StringTypeAnnotation,
    BooleanTypeAnnotation,
    AnyTypeAnnotation,
    MixedTypeAnnotation,
    VoidTypeAnnotation,
    NullLiteralTypeAnnotation,
    NullableTypeAnnotation {
        #[serde(rename = "typeAnnotation")]
        type_annotation: Box<TypeNode>,
    },
    UnionTypeAnnotation {
        types: Vec<TypeNode>,
    },
    TupleTypeAnnotation {
        types: Vec<TypeNode>,
    },
    ArrayTypeAnnotation {
        #[serde(rename = "elementType")]
        element_type: Box<TypeNode>,
    },
    GenericTypeAnnotation {
        id: TypeName,
        #[serde(rename = "typeParameters", default)]
        type_parameters: Option<TypeParameters>,
    },
    ObjectTypeAnnotation {
        #[serde(default)]
        properties: Vec<ObjectTypeMember>,
    },
    FunctionTypeAnnotation {
        #[serde(default)]
        params: Vec<FunctionTypeParam>,
        #[serde(default)]
        rest: Option<Box<FunctionTypeParam>>,
        #[serde(rename = "returnType")]
        return_type: Box<TypeNode>,
    },
    StringLiteralTypeAnnotation {
        value: String,
    },
    NumberLiteralTypeAnnotation {
        value: serde_json::Number,
    },
    BooleanLiteralTypeAnnotation {
        value: bool,
    },

    // -- TypeScript -----------------------------------------------------------
    #[serde(rename = "TSNumberKeyword")]
    TsNumberKeyword,
    #[serde(rename = "TSStringKeyword")]
    TsStringKeyword,
    #[serde(rename = "TSBooleanKeyword")]
    TsBooleanKeyword,
    #[serde(rename = "TSBigIntKeyword")]
    TsBigIntKeyword,
    #[serde(rename = "TSSymbolKeyword")]
    TsSymbolKeyword,
    #[serde(rename = "TSObjectKeyword")]
    TsObjectKeyword,
    #[serde(rename = "TSNeverKeyword")]
    TsNeverKeyword,
    #[serde(rename = "TSThisType")]
    TsThisType,
    #[serde(rename = "TSAnyKeyword")]
    TsAnyKeyword,
    #[serde(rename = "TSUnknownKeyword")]
    TsUnknownKeyword,
    #[serde(rename = "TSNullKeyword")]
    TsNullKeyword,
    #[serde(rename = "TSUndefinedKeyword")]
    TsUndefinedKeyword,
    #[serde(rename = "TSVoidKeyword")]
    TsVoidKeyword,
    #[serde(rename = "TSParenthesizedType")]
    TsParenthesizedType {
        #[serde(rename = "typeAnnotation")]
        type_annotation: Box<TypeNode>,
    },
    #[serde(rename = "TSOptionalType")]
    TsOptionalType {
        #[serde(rename = "typeAnnotation")]
        type_annotation: Box<TypeNode>,
    },
    #[serde(rename = "TSRestType")]
    TsRestType {
        #[serde(rename = "typeAnnotation")]
        type_annotation: Box<TypeNode>,
    },
    #[serde(rename = "TSUnionType")]
    TsUnionType { types: Vec<TypeNode> },
    #[serde(rename = "TSTupleType")]
    TsTupleType {
        #[serde(rename = "elementTypes")]
        element_types: Vec<TypeNode>,
    },
    #[serde(rename = "TSArrayType")]
    TsArrayType {
        #[serde(rename = "elementType")]
        element_type: Box<TypeNode>,
    },
    #[serde(rename = "TSTypeReference")]
    TsTypeReference {
        #[serde(rename = "typeName")]
        type_name: TypeName,
        #[serde(rename = "typeParameters", default)]
        type_parameters: Option<TypeParameters>,
    },
    #[serde(rename = "TSTypeLiteral")]
    TsTypeLiteral {
        #[serde(default)]
        members: Vec<ObjectTypeMember>,
    },
    #[serde(rename = "TSInterfaceBody")]
    TsInterfaceBody {
        #[serde(default)]
        body: Vec<ObjectTypeMember>,
    },
    #[serde(rename = "TSLiteralType")]
    TsLiteralType { literal: LiteralNode },
    #[serde(rename = "TSFunctionType")]
    TsFunctionType {
        #[serde(default)]
        parameters: Vec<FunctionTypeParam>,
        #[serde(rename = "typeAnnotation")]
        type_annotation: Box<TypeNode>,
    },

    /// Anything else (conditional types, mapped types, ...).
    #[serde(other)]
    Unsupported,
}

impl TypeNode {
    /// Strip the `TypeAnnotation` / `TSTypeAnnotation` wrapper, if any.
    pub fn unwrap_annotation(&self) -> &TypeNode {
        match self {
            TypeNode::TypeAnnotation { type_annotation }
            | TypeNode::TsTypeAnnotation { type_annotation } => type_annotation.unwrap_annotation(),
            other => other,
        }
    }

    /// Member fields of a structural (object-literal) type.
    pub fn object_members(&self) -> Option<&[ObjectTypeMember]> {
        match self.unwrap_annotation() {
            TypeNode::ObjectTypeAnnotation { properties } => Some(properties),
            TypeNode::TsTypeLiteral { members } => Some(members),
            TypeNode::TsInterfaceBody { body } => Some(body),
            _ => None,
        }
    }
}

/// `<A, B>` on a generic reference.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeParameters {
    #[serde(default)]
    pub params: Vec<TypeNode>,
}

/// A possibly-qualified type name (`Foo`, `ns.Foo`).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TypeName {
    Identifier {
        name: String,
    },
    QualifiedTypeIdentifier {
        qualification: Box<TypeName>,
        id: Box<TypeName>,
    },
    #[serde(rename = "TSQualifiedName")]
    TsQualifiedName {
        left: Box<TypeName>,
        right: Box<TypeName>,
    },
}

impl TypeName {
    /// Dotted rendering, the way the name is written in source.
    pub fn path(&self) -> String {
        match self {
            TypeName::Identifier { name } => name.clone(),
            TypeName::QualifiedTypeIdentifier { qualification, id } => {
                format!("{}.{}", qualification.path(), id.path())
            }
            TypeName::TsQualifiedName { left, right } => {
                format!("{}.{}", left.path(), right.path())
            }
        }
    }
}

/// A field of an object type: Flow `ObjectTypeProperty`, TypeScript
/// `TSPropertySignature`. Index signatures and methods are carried as
/// `Other` and skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectTypeMember {
    ObjectTypeProperty {
        key: PropertyKey,
        value: TypeNode,
        #[serde(default)]
        optional: bool,
    },
    #[serde(rename = "TSPropertySignature")]
    TsPropertySignature {
        key: PropertyKey,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
        #[serde(default)]
        optional: bool,
    },
    #[serde(other)]
    Other,
}

impl ObjectTypeMember {
    /// `(key, value type, optional)` for a plain field.
    pub fn field(&self) -> Option<(&str, Option<&TypeNode>, bool)> {
        match self {
            ObjectTypeMember::ObjectTypeProperty {
                key,
                value,
                optional,
            } => Some((key.name(), Some(value), *optional)),
            ObjectTypeMember::TsPropertySignature {
                key,
                type_annotation,
                optional,
            } => Some((
                key.name(),
                type_annotation.as_ref().map(TypeNode::unwrap_annotation),
                *optional,
            )),
            ObjectTypeMember::Other => None,
        }
    }
}

/// Key of an object type field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyKey {
    Identifier { name: String },
    StringLiteral { value: String },
    /// Computed or numeric keys
    #[serde(other)]
    Other,
}

impl PropertyKey {
    pub fn name(&self) -> &str {
        match self {
            PropertyKey::Identifier { name } => name,
            PropertyKey::StringLiteral { value } => value,
            PropertyKey::Other => "",
        }
    }
}

/// A parameter inside a function type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum FunctionTypeParam {
    /// Flow: `(name: T)`
    FunctionTypeParam {
        #[serde(default)]
        name: Option<PropertyKey>,
        #[serde(rename = "typeAnnotation")]
        type_annotation: TypeNode,
    },
    /// TypeScript: `(name: T)`
    Identifier {
        name: String,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
    },
    /// TypeScript: `(...rest: T)`
    RestElement {
        argument: Box<FunctionTypeParam>,
        #[serde(rename = "typeAnnotation", default)]
        type_annotation: Option<TypeNode>,
    },
}

/// Literal payload of `TSLiteralType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum LiteralNode {
    StringLiteral { value: String },
    NumericLiteral { value: serde_json::Number },
    BooleanLiteral { value: bool },
    #[serde(other)]
    Other,
}

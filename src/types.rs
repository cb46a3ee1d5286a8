//! Canonical type expressions and the translator from source annotations.
//!
//! The canonical form is language-agnostic: the same `Type` value comes out
//! of a JSDoc `{Array<string>}` tag, a Flow `string[]` and a TypeScript
//! `Array<string>`.

use crate::syntax::types::{FunctionTypeParam, LiteralNode, TypeNode};
use serde::{Deserialize, Serialize};

/// A canonical type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Type {
    /// `string`, `Foo`, `ns.Foo`
    Name { name: String },
    /// `?T`
    Nullable { expression: Box<Type> },
    /// `T=`; marks a parameter as not required
    Optional { expression: Box<Type> },
    /// `(A | B)`, order preserved
    Union { elements: Vec<Type> },
    /// `Base<A, B>`
    Application { base: String, arguments: Vec<Type> },
    /// `T[]` as written by a tag parser that keeps the array form
    Array { element: Box<Type> },
    /// `[A, B]`
    Tuple { elements: Vec<Type> },
    Literal { kind: LiteralKind, value: String },
    /// `*`, `any`, `mixed`, `unknown`
    All,
    /// `...T`; `expression` is absent for an unannotated rest parameter
    Rest {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        expression: Option<Box<Type>>,
    },
    /// `{ a: T, b?: U }`
    Record { fields: Vec<FieldType> },
    /// `(a: A) => R`
    Function { params: Vec<Type>, result: Box<Type> },
    Null,
    Undefined,
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiteralKind {
    String,
    Number,
    Boolean,
}

/// One field of a `Record` type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldType {
    pub key: String,
    pub value: Type,
}

impl Type {
    pub fn name(name: impl Into<String>) -> Type {
        Type::Name { name: name.into() }
    }

    pub fn optional(inner: Type) -> Type {
        Type::Optional {
            expression: Box::new(inner),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Type::Optional { .. })
    }

    /// Wrap in `Optional` unless already optional.
    pub fn into_optional(self) -> Type {
        if self.is_optional() {
            self
        } else {
            Type::optional(self)
        }
    }

    /// Direct children, for walkers such as the lint pass.
    pub fn children(&self) -> Vec<&Type> {
        match self {
            Type::Nullable { expression } | Type::Optional { expression } => vec![&**expression],
            Type::Union { elements } | Type::Tuple { elements } => elements.iter().collect(),
            Type::Application { arguments, .. } => arguments.iter().collect(),
            Type::Array { element } => vec![&**element],
            Type::Rest { expression } => expression.iter().map(|e| &**e).collect(),
            Type::Record { fields } => fields.iter().map(|f| &f.value).collect(),
            Type::Function { params, result } => {
                params.iter().chain(std::iter::once(&**result)).collect()
            }
            Type::Name { .. }
            | Type::Literal { .. }
            | Type::All
            | Type::Null
            | Type::Undefined
            | Type::Void => Vec::new(),
        }
    }
}

// -- Translation --------------------------------------------------------------

/// Translate a source type annotation into its canonical form.
///
/// Unrecognized shapes give `None`. Inside a composite type an unrecognized
/// member becomes `All` so the composite keeps its arity.
pub fn translate(node: &TypeNode) -> Option<Type> {
    let ty = match node {
        TypeNode::TypeAnnotation { type_annotation }
        | TypeNode::TsTypeAnnotation { type_annotation }
        | TypeNode::TsParenthesizedType { type_annotation } => return translate(type_annotation),

        TypeNode::NumberTypeAnnotation | TypeNode::TsNumberKeyword => Type::name("number"),
        TypeNode::StringTypeAnnotation | TypeNode::TsStringKeyword => Type::name("string"),
        TypeNode::BooleanTypeAnnotation | TypeNode::TsBooleanKeyword => Type::name("boolean"),
        TypeNode::TsBigIntKeyword => Type::name("bigint"),
        TypeNode::TsSymbolKeyword => Type::name("symbol"),
        TypeNode::TsObjectKeyword => Type::name("object"),
        TypeNode::TsNeverKeyword => Type::name("never"),
        TypeNode::TsThisType => Type::name("this"),

        TypeNode::AnyTypeAnnotation
        | TypeNode::MixedTypeAnnotation
        | TypeNode::TsAnyKeyword
        | TypeNode::TsUnknownKeyword => Type::All,
        TypeNode::NullLiteralTypeAnnotation | TypeNode::TsNullKeyword => Type::Null,
        TypeNode::TsUndefinedKeyword => Type::Undefined,
        TypeNode::VoidTypeAnnotation | TypeNode::TsVoidKeyword => Type::Void,

        // `?T` in Flow; `[T?]` tuple members in TypeScript
        TypeNode::NullableTypeAnnotation { type_annotation }
        | TypeNode::TsOptionalType { type_annotation } => Type::Nullable {
            expression: Box::new(member(type_annotation)),
        },
        TypeNode::UnionTypeAnnotation { types } | TypeNode::TsUnionType { types } => Type::Union {
            elements: types.iter().map(member).collect(),
        },
        TypeNode::TupleTypeAnnotation { types }
        | TypeNode::TsTupleType {
            element_types: types,
        } => Type::Tuple {
            elements: types.iter().map(member).collect(),
        },
        // `T[]` and `Array<T>` share one canonical form
        TypeNode::ArrayTypeAnnotation { element_type }
        | TypeNode::TsArrayType { element_type } => Type::Application {
            base: "Array".to_string(),
            arguments: vec![member(element_type)],
        },
        TypeNode::TsRestType { type_annotation } => Type::Rest {
            expression: Some(Box::new(member(type_annotation))),
        },
        TypeNode::GenericTypeAnnotation {
            id: name,
            type_parameters,
        }
        | TypeNode::TsTypeReference {
            type_name: name,
            type_parameters,
        } => match type_parameters {
            Some(params) if !params.params.is_empty() => Type::Application {
                base: name.path(),
                arguments: params.params.iter().map(member).collect(),
            },
            _ => Type::name(name.path()),
        },
        TypeNode::ObjectTypeAnnotation { .. }
        | TypeNode::TsTypeLiteral { .. }
        | TypeNode::TsInterfaceBody { .. } => Type::Record {
            fields: node
                .object_members()
                .unwrap_or_default()
                .iter()
                .filter_map(|m| m.field())
                .map(|(key, value, optional)| {
                    let value = value.map(member).unwrap_or(Type::All);
                    FieldType {
                        key: key.to_string(),
                        value: if optional { value.into_optional() } else { value },
                    }
                })
                .collect(),
        },
        TypeNode::FunctionTypeAnnotation {
            params,
            rest,
            return_type,
        } => Type::Function {
            params: params
                .iter()
                .map(function_param)
                .chain(rest.iter().map(|r| Type::Rest {
                    expression: Some(Box::new(function_param(r))),
                }))
                .collect(),
            result: Box::new(member(return_type)),
        },
        TypeNode::TsFunctionType {
            parameters,
            type_annotation,
        } => Type::Function {
            params: parameters.iter().map(function_param).collect(),
            result: Box::new(member(type_annotation)),
        },

        TypeNode::StringLiteralTypeAnnotation { value } => Type::Literal {
            kind: LiteralKind::String,
            value: value.clone(),
        },
        TypeNode::NumberLiteralTypeAnnotation { value } => Type::Literal {
            kind: LiteralKind::Number,
            value: value.to_string(),
        },
        TypeNode::BooleanLiteralTypeAnnotation { value } => Type::Literal {
            kind: LiteralKind::Boolean,
            value: value.to_string(),
        },
        TypeNode::TsLiteralType { literal } => match literal {
            LiteralNode::StringLiteral { value } => Type::Literal {
                kind: LiteralKind::String,
                value: value.clone(),
            },
            LiteralNode::NumericLiteral { value } => Type::Literal {
                kind: LiteralKind::Number,
                value: value.to_string(),
            },
            LiteralNode::BooleanLiteral { value } => Type::Literal {
                kind: LiteralKind::Boolean,
                value: value.to_string(),
            },
            LiteralNode::Other => return None,
        },

        TypeNode::Unsupported => return None,
    };
    Some(ty)
}

fn member(node: &TypeNode) -> Type {
    translate(node).unwrap_or(Type::All)
}

fn function_param(param: &FunctionTypeParam) -> Type {
    match param {
        FunctionTypeParam::FunctionTypeParam {
            type_annotation, ..
        } => member(type_annotation),
        FunctionTypeParam::Identifier {
            type_annotation, ..
        } => type_annotation.as_ref().map(member).unwrap_or(Type::All),
        FunctionTypeParam::RestElement {
            type_annotation, ..
        } => Type::Rest {
            expression: type_annotation.as_ref().map(|t| Box::new(member(t))),
        },
    }
}

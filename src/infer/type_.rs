//! Type of variables, class fields and type aliases.

use super::finders::find_target;
use super::{InferPass, InferState};
use crate::model::{Comment, Kind};
use crate::syntax::{Literal, NodeKind};
use crate::types::{translate, Type};

pub struct InferType;

impl InferPass for InferType {
    fn name(&self) -> &'static str {
        "type"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        let Some(ast) = comment.ast() else {
            return;
        };
        let tree = &ast.tree;
        // A class field with an initializer would otherwise resolve to the
        // initializer.
        let target = match ast.kind() {
            NodeKind::ClassProperty { .. } => Some(ast.node),
            _ => find_target(tree, ast.node),
        };
        let Some(target) = target else {
            return;
        };
        let ty = match tree.kind(target) {
            NodeKind::VariableDeclarator { id, init } => {
                let annotation = match tree.kind(*id) {
                    NodeKind::Identifier {
                        type_annotation: Some(annotation),
                        ..
                    } => translate(annotation),
                    _ => None,
                };
                annotation.or_else(|| {
                    if comment.kind != Some(Kind::Constant) {
                        return None;
                    }
                    match init.map(|init| tree.kind(init)) {
                        Some(NodeKind::Literal(Literal::String(_))) => Some(Type::name("string")),
                        Some(NodeKind::Literal(Literal::Number(_))) => Some(Type::name("number")),
                        Some(NodeKind::Literal(Literal::Boolean(_))) => Some(Type::name("boolean")),
                        _ => None,
                    }
                })
            }
            NodeKind::ClassProperty {
                type_annotation: Some(annotation),
                ..
            } => translate(annotation),
            NodeKind::TypeAlias { right, .. } => translate(right),
            _ => None,
        };
        if ty.is_some() {
            comment.type_ = ty;
        }
    }
}

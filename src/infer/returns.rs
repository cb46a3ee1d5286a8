//! Return type from a function's annotation.

use super::finders::function_target;
use super::{InferPass, InferState};
use crate::model::{Comment, TypedDescription};
use crate::types::translate;

pub struct InferReturn;

impl InferPass for InferReturn {
    fn name(&self) -> &'static str {
        "returns"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        let Some(ast) = comment.ast() else {
            return;
        };
        let tree = &ast.tree;
        let ty = function_target(tree, ast.node)
            .and_then(|target| tree.function_parts(target))
            .and_then(|function| function.return_type.as_ref())
            .and_then(translate);
        let Some(ty) = ty else {
            return;
        };
        match comment.returns.first_mut() {
            Some(first) => first.type_ = Some(ty),
            None => comment.returns.push(TypedDescription {
                type_: Some(ty),
                description: None,
            }),
        }
    }
}

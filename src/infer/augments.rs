//! Supertypes and implemented interfaces of classes and interfaces.

use super::finders::find_target;
use super::{InferPass, InferState};
use crate::model::{Comment, Reference};
use crate::syntax::NodeKind;

pub struct InferAugments;

impl InferPass for InferAugments {
    fn name(&self) -> &'static str {
        "augments"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        let Some(ast) = comment.ast() else {
            return;
        };
        let tree = &ast.tree;
        let Some(target) = find_target(tree, ast.node) else {
            return;
        };
        let augments = match tree.kind(target) {
            NodeKind::Class {
                super_class: Some(sup),
                ..
            } => vec![tree.source_text(*sup)],
            NodeKind::Interface { extends, .. } => {
                extends.iter().map(|&e| tree.source_text(e)).collect()
            }
            _ => Vec::new(),
        };
        comment.augments = augments
            .into_iter()
            .filter(|name| !name.is_empty())
            .map(|name| Reference { name })
            .collect();
    }
}

pub struct InferImplements;

impl InferPass for InferImplements {
    fn name(&self) -> &'static str {
        "implements"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        let Some(ast) = comment.ast() else {
            return;
        };
        let tree = &ast.tree;
        let Some(target) = find_target(tree, ast.node) else {
            return;
        };
        let NodeKind::Class { implements, .. } = tree.kind(target) else {
            return;
        };
        comment.implements = implements
            .iter()
            .map(|&i| tree.source_text(i))
            .filter(|name| !name.is_empty())
            .map(|name| Reference { name })
            .collect();
    }
}

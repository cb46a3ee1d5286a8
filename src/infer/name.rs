//! Name of the documented entity.

use super::finders::file_stem;
use super::{InferPass, InferState};
use crate::model::{Comment, Kind};
use crate::syntax::{Literal, NodeId, NodeKind, SyntaxTree};

/// Kind tags whose name, when given, names the comment; in priority order.
const NAMING_TAGS: [&str; 5] = ["event", "callback", "class", "module", "typedef"];

pub struct InferName;

impl InferPass for InferName {
    fn name(&self) -> &'static str {
        "name"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        if let Some(alias) = &comment.alias {
            comment.name = Some(alias.clone());
            return;
        }
        if let Some(name) = from_kind_tags(comment) {
            comment.name = Some(name);
            return;
        }
        let Some(ast) = comment.ast() else {
            return;
        };
        let name = match ast.kind() {
            NodeKind::ExportDefault { declaration } => {
                declared_name(&ast.tree, *declaration).or_else(|| Some(file_stem(&ast.tree.file)))
            }
            _ => first_name(&ast.tree, ast.node),
        };
        comment.name = name;
    }
}

fn from_kind_tags(comment: &Comment) -> Option<String> {
    for title in NAMING_TAGS {
        for tag in comment.kind_tags.iter().filter(|t| t.title == title) {
            if let Some(name) = &tag.name {
                return Some(name.clone());
            }
            if tag.kind == Kind::Module {
                return Some(file_stem(&comment.context.file));
            }
        }
    }
    comment.kind_tags.iter().find_map(|t| t.name.clone())
}

fn declared_name(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    match tree.kind(node) {
        NodeKind::Class { id: Some(id), .. } | NodeKind::Function { id: Some(id), .. } => {
            tree.identifier(*id).map(str::to_string)
        }
        _ => None,
    }
}

/// First name-bearing node below `node`, depth first. A member access is
/// named by its property, so `a.b = ...` is named `b`.
fn first_name(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    for n in tree.descendants(node) {
        match tree.kind(n) {
            NodeKind::Identifier { name, .. } => return Some(name.clone()),
            NodeKind::Member { property, .. } => {
                if let Some(name) = tree.identifier(*property) {
                    return Some(name.to_string());
                }
            }
            NodeKind::Literal(Literal::String(value)) => {
                let is_key = tree.parent(n).is_some_and(|p| {
                    matches!(tree.kind(p), NodeKind::ObjectProperty { key, .. } if *key == n)
                });
                if is_key {
                    return Some(value.clone());
                }
            }
            _ => {}
        }
    }
    None
}

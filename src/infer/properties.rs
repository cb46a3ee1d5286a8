//! Properties of structural type aliases and interfaces.

use super::finders::find_target;
use super::{InferPass, InferState};
use crate::model::{Comment, Param};
use crate::syntax::types::TypeNode;
use crate::syntax::NodeKind;
use crate::types::{translate, Type};

pub struct InferProperties;

impl InferPass for InferProperties {
    fn name(&self) -> &'static str {
        "properties"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        let Some(ast) = comment.ast() else {
            return;
        };
        let tree = &ast.tree;
        let Some(target) = find_target(tree, ast.node) else {
            return;
        };
        let shape = match tree.kind(target) {
            NodeKind::TypeAlias { right, .. } => right,
            NodeKind::Interface { body, .. } => body,
            _ => return,
        };
        let mut found = Vec::new();
        collect(shape, "", &comment.properties, &mut found);
        comment.properties.extend(found);
    }
}

/// One entry per field not already documented, recursing into fields
/// that are themselves object types.
fn collect(shape: &TypeNode, prefix: &str, documented: &[Param], out: &mut Vec<Param>) {
    let Some(members) = shape.object_members() else {
        return;
    };
    for (key, value, optional) in members.iter().filter_map(|m| m.field()) {
        let name = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };
        if key.is_empty() || documented.iter().any(|p| p.name == name) {
            continue;
        }
        let ty = value.and_then(translate).unwrap_or(Type::All);
        out.push(Param {
            name: name.clone(),
            type_: Some(if optional { ty.into_optional() } else { ty }),
            ..Default::default()
        });
        if let Some(value) = value {
            collect(value, &name, documented, out);
        }
    }
}

//! Locate the code a comment actually describes.
//!
//! A comment attached to `export const f = () => {}` documents the arrow
//! function, not the export statement; the helpers here walk through such
//! wrappers.

use crate::syntax::{NodeId, NodeKind, SyntaxTree};
use std::path::Path;

/// The declaration or value behind a statement-level node.
pub fn find_target(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let node = match tree.kind(node) {
        NodeKind::ExportDefault { declaration } => *declaration,
        NodeKind::ExportNamed {
            declaration: Some(declaration),
        } => *declaration,
        _ => node,
    };
    match tree.kind(node) {
        NodeKind::VariableDeclaration { declarations, .. } => declarations.first().copied(),
        NodeKind::ExpressionStatement { expression } => match tree.kind(*expression) {
            NodeKind::Assignment { right, .. } => Some(*right),
            _ => None,
        },
        NodeKind::ObjectProperty { value, .. } => Some(*value),
        NodeKind::ClassProperty { value: Some(value), .. } => Some(*value),
        _ => Some(node),
    }
}

/// Like [`find_target`], but also steps from a declarator into its
/// initializer, so `const f = function () {}` yields the function.
pub fn function_target(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let target = find_target(tree, node)?;
    match tree.kind(target) {
        NodeKind::VariableDeclarator { init, .. } => *init,
        _ => Some(target),
    }
}

/// Every identifier name under `node`, in source order, including `node`
/// itself. `a.b.c` gives `["a", "b", "c"]`.
pub fn identifiers(tree: &SyntaxTree, node: NodeId) -> Vec<String> {
    std::iter::once(node)
        .chain(tree.descendants(node))
        .filter_map(|n| tree.identifier(n))
        .map(str::to_string)
        .collect()
}

/// Class declarations carry a name; class expressions usually don't.
pub fn class_name(tree: &SyntaxTree, class: NodeId) -> Option<&str> {
    match tree.kind(class) {
        NodeKind::Class { id: Some(id), .. } => tree.identifier(*id),
        _ => None,
    }
}

/// The constructor method of a class, if it declares one.
pub fn constructor(tree: &SyntaxTree, class: NodeId) -> Option<NodeId> {
    let NodeKind::Class { body, .. } = tree.kind(class) else {
        return None;
    };
    let NodeKind::ClassBody { body } = tree.kind(*body) else {
        return None;
    };
    body.iter().copied().find(|&m| {
        matches!(
            tree.kind(m),
            NodeKind::ClassMethod {
                kind: crate::syntax::MethodKind::Constructor,
                ..
            }
        )
    })
}

/// File name without directory and extension: `src/lib/foo.js` → `foo`.
pub fn file_stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

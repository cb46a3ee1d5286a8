//! Parameters from a function's signature, merged with the documented ones.
//!
//! Works on flat dotted names; the pipeline nests the result afterwards.

use super::finders::{constructor, function_target};
use super::{InferPass, InferState};
use crate::model::{Comment, Param};
use crate::syntax::types::TypeNode;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};
use crate::types::{translate, Type};
use regex::Regex;
use std::sync::LazyLock;

/// A name generated for an unnamed destructured parameter: `$0`, `$1`, ...
static RE_ANONYMOUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\d+$").unwrap());

pub struct InferParams;

impl InferPass for InferParams {
    fn name(&self) -> &'static str {
        "params"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        let Some(ast) = comment.ast() else {
            return;
        };
        let tree = &ast.tree;
        let Some(target) = function_target(tree, ast.node) else {
            return;
        };
        let target = match tree.kind(target) {
            NodeKind::Class { .. } => match constructor(tree, target) {
                Some(ctor) => ctor,
                None => return,
            },
            _ => target,
        };
        let Some(function) = tree.function_parts(target) else {
            return;
        };

        let mut inferred = Vec::new();
        for (i, &param) in function.params.iter().enumerate() {
            root_param(tree, param, i, &mut inferred);
        }

        let explicit = std::mem::take(&mut comment.params);
        let (params, unmatched) = merge(explicit, inferred);
        comment.params = params;
        for (message, line) in unmatched {
            comment.push_error(message, line);
        }
    }
}

// -- Signature walking ----------------------------------------------------------

fn annotated(ty: &Option<TypeNode>) -> Option<Type> {
    ty.as_ref().and_then(translate)
}

fn root_param(tree: &SyntaxTree, node: NodeId, index: usize, out: &mut Vec<Param>) {
    let anonymous = format!("${}", index);
    match tree.kind(node) {
        NodeKind::ObjectPattern { .. } | NodeKind::ArrayPattern { .. } => {
            binding(tree, node, &anonymous, out)
        }
        NodeKind::Identifier { name, .. } => {
            let name = name.clone();
            binding(tree, node, &name, out)
        }
        NodeKind::AssignmentPattern { left, right } => {
            let start = out.len();
            root_param(tree, *left, index, out);
            with_default(tree, &mut out[start..], *right);
        }
        NodeKind::RestElement {
            argument,
            type_annotation,
        } => {
            if let Some(name) = tree.identifier(*argument) {
                out.push(rest(name.to_string(), type_annotation));
            }
        }
        _ => {}
    }
}

/// A binding at `name`: a parameter itself or a destructured part of one.
fn binding(tree: &SyntaxTree, node: NodeId, name: &str, out: &mut Vec<Param>) {
    match tree.kind(node) {
        NodeKind::Identifier {
            type_annotation, ..
        } => out.push(Param {
            name: name.to_string(),
            type_: annotated(type_annotation),
            ..Default::default()
        }),
        NodeKind::AssignmentPattern { left, right } => {
            let start = out.len();
            binding(tree, *left, name, out);
            with_default(tree, &mut out[start..], *right);
        }
        NodeKind::ObjectPattern {
            properties,
            type_annotation,
        } => {
            out.push(Param {
                name: name.to_string(),
                type_: Some(annotated(type_annotation).unwrap_or_else(|| Type::name("Object"))),
                ..Default::default()
            });
            for &property in properties {
                match tree.kind(property) {
                    NodeKind::ObjectProperty { key, value, .. } => {
                        if let Some(key) = tree.key_name(*key) {
                            binding(tree, *value, &format!("{}.{}", name, key), out);
                        }
                    }
                    NodeKind::RestElement {
                        argument,
                        type_annotation,
                    } => {
                        if let Some(arg) = tree.identifier(*argument) {
                            out.push(rest(format!("{}.{}", name, arg), type_annotation));
                        }
                    }
                    _ => {}
                }
            }
        }
        NodeKind::ArrayPattern {
            elements,
            type_annotation,
        } => {
            out.push(Param {
                name: name.to_string(),
                type_: Some(annotated(type_annotation).unwrap_or_else(|| Type::name("Array"))),
                ..Default::default()
            });
            for (idx, element) in elements.iter().enumerate() {
                if let Some(element) = element {
                    binding(tree, *element, &format!("{}.{}", name, idx), out);
                }
            }
        }
        NodeKind::RestElement {
            type_annotation, ..
        } => out.push(rest(name.to_string(), type_annotation)),
        _ => {}
    }
}

fn rest(name: String, annotation: &Option<TypeNode>) -> Param {
    Param {
        name,
        type_: Some(Type::Rest {
            expression: annotated(annotation).map(Box::new),
        }),
        ..Default::default()
    }
}

/// `a = 1`: the first entry emitted for `a` becomes optional and records
/// the default's source text.
fn with_default(tree: &SyntaxTree, emitted: &mut [Param], default: NodeId) {
    if let Some(first) = emitted.first_mut() {
        first.default = Some(tree.source_text(default));
        first.type_ = Some(first.type_.take().unwrap_or(Type::All).into_optional());
    }
}

// -- Merging --------------------------------------------------------------------

fn is_root(name: &str) -> bool {
    !name.contains('.')
}

/// Whether `name` is `root` or lies below it.
fn within(name: &str, root: &str) -> bool {
    name == root || is_descendant(name, root)
}

fn is_descendant(name: &str, root: &str) -> bool {
    name.strip_prefix(root)
        .is_some_and(|rest| rest.starts_with('.') || rest.starts_with("[]."))
}

/// Merge inferred parameters into the documented ones. Returns the merged
/// list and a diagnostic for each documented top-level parameter that
/// matches nothing in the signature.
fn merge(mut explicit: Vec<Param>, mut inferred: Vec<Param>) -> (Vec<Param>, Vec<(String, Option<u32>)>) {
    let explicit_roots: Vec<String> = explicit
        .iter()
        .filter(|p| is_root(&p.name))
        .map(|p| p.name.clone())
        .collect();
    let inferred_roots: Vec<String> = inferred
        .iter()
        .filter(|p| is_root(&p.name))
        .map(|p| p.name.clone())
        .collect();

    // Positional names for destructured parameters, only when every
    // parameter is documented.
    if explicit_roots.len() == inferred_roots.len() {
        for (old, new) in inferred_roots.iter().zip(&explicit_roots) {
            if !RE_ANONYMOUS.is_match(old) || old == new {
                continue;
            }
            for param in inferred.iter_mut().filter(|p| within(&p.name, old)) {
                param.name = format!("{}{}", new, &param.name[old.len()..]);
            }
        }
    }

    let inferred_names: Vec<&str> = inferred
        .iter()
        .filter(|p| is_root(&p.name))
        .map(|p| p.name.as_str())
        .collect();
    let unmatched = explicit
        .iter()
        .filter(|p| is_root(&p.name) && !inferred_names.contains(&p.name.as_str()))
        .map(|p| {
            (
                format!(
                    "An explicit parameter named {} was specified but didn't match inferred information {}",
                    p.name,
                    inferred_names.join(", ")
                ),
                p.line_number,
            )
        })
        .collect();

    let mut cursor = 0;
    for param in inferred {
        if let Some(pos) = explicit.iter().position(|p| p.name == param.name) {
            backfill(&mut explicit[pos], param);
            cursor = pos + 1;
            continue;
        }
        let at = explicit
            .iter()
            .position(|p| is_descendant(&p.name, &param.name))
            .unwrap_or(cursor.min(explicit.len()));
        explicit.insert(at, param);
        cursor = at + 1;
    }

    (explicit, unmatched)
}

fn backfill(explicit: &mut Param, inferred: Param) {
    match (explicit.type_.take(), inferred.type_) {
        (None, ty) => explicit.type_ = ty,
        // `[x]` with no type: keep the optionality, take the annotation.
        (Some(Type::Optional { expression }), Some(ty)) if *expression == Type::All => {
            explicit.type_ = Some(ty.into_optional());
        }
        (Some(ty), _) if inferred.default.is_some() => explicit.type_ = Some(ty.into_optional()),
        (ty, _) => explicit.type_ = ty,
    }
    if explicit.default.is_none() {
        explicit.default = inferred.default;
    }
}

//! Path nester: turns flat dotted parameter and property names into trees.
//!
//! ```text
//! foo.abe
//! foo.bar.baz          foo ─┬─ .abe
//! foo.bar.a       →         └─ .bar ─┬─ .baz
//! foo.bar[].bax                      ├─ .a
//!                                    └─ [].bax
//! ```
//!
//! Nodes keep their full dotted name; only their position in the tree
//! changes.

use crate::error::NestError;
use crate::model::{Comment, Param};
use regex::Regex;
use std::sync::LazyLock;

/// `.` or `[].` separates path segments.
static RE_PATH_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\[\])?\.").unwrap());

/// Placeholder names given to destructured parameters: `$0`, `$1.x`, ...
static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\d+").unwrap());

fn segments(name: &str) -> Vec<&str> {
    RE_PATH_SPLIT.split(name).collect()
}

fn depth(param: &Param) -> usize {
    segments(&param.name).len()
}

/// Build a forest from a flat list.
///
/// Entries with an empty name are dropped. Entries are inserted shallowest
/// first; siblings keep their relative order.
pub fn nest(items: Vec<Param>) -> Result<Vec<Param>, NestError> {
    let mut items: Vec<Param> = items.into_iter().filter(|p| !p.name.is_empty()).collect();
    // `sort_by_key` is stable
    items.sort_by_key(depth);

    let mut roots: Vec<Param> = Vec::new();
    for item in items {
        let name = item.name.clone();
        let parts = segments(&name);
        insert(&mut roots, &parts, item)?;
    }
    Ok(roots)
}

fn insert(siblings: &mut Vec<Param>, parts: &[&str], item: Param) -> Result<(), NestError> {
    let [head, rest @ ..] = parts else {
        return Ok(());
    };
    if rest.is_empty() {
        siblings.push(item);
        return Ok(());
    }
    let parent = siblings
        .iter_mut()
        .find(|p| segments(&p.name).last() == Some(head));
    match parent {
        Some(parent) => insert(&mut parent.properties, rest, item),
        None if RE_PLACEHOLDER.is_match(&item.name) => {
            Err(NestError::DestructuringParentNotFound {
                name: item.name,
                line_number: item.line_number,
            })
        }
        None => Err(NestError::ParentNotFound {
            name: item.name,
            line_number: item.line_number,
        }),
    }
}

/// Inverse of [`nest`]: depth-first, parents before children.
pub fn flatten(items: Vec<Param>) -> Vec<Param> {
    let mut out = Vec::new();
    for item in items {
        push_flat(&mut out, item);
    }
    out
}

fn push_flat(out: &mut Vec<Param>, mut item: Param) {
    let children = std::mem::take(&mut item.properties);
    out.push(item);
    for child in children {
        push_flat(out, child);
    }
}

/// Nest a comment's params and properties in place.
pub fn nest_comment(comment: &mut Comment) -> Result<(), NestError> {
    comment.params = nest(std::mem::take(&mut comment.params))?;
    comment.properties = nest(std::mem::take(&mut comment.properties))?;
    Ok(())
}

/// Flatten a comment's params and properties in place.
pub fn flatten_comment(comment: &mut Comment) {
    comment.params = flatten(std::mem::take(&mut comment.params));
    comment.properties = flatten(std::mem::take(&mut comment.properties));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(names: &[&str]) -> Vec<Param> {
        names.iter().map(|n| Param::named(*n)).collect()
    }

    fn shape(params: &[Param]) -> Vec<(String, Vec<String>)> {
        params
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    p.properties.iter().map(|c| c.name.clone()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn nests_children_in_declaration_order() {
        let tree = nest(flat(&["foo", "foo.bar", "foo.third"])).unwrap();
        assert_eq!(
            shape(&tree),
            vec![("foo".into(), vec!["foo.bar".into(), "foo.third".into()])]
        );
    }

    #[test]
    fn missing_parent_fails() {
        let err = nest(flat(&["foo.bar.third", "foo.third"])).unwrap_err();
        assert!(matches!(err, NestError::ParentNotFound { .. }));
        assert!(err.to_string().starts_with("Parent of foo."));
    }

    #[test]
    fn placeholder_parent_gets_guidance() {
        let err = nest(flat(&["$0.a"])).unwrap_err();
        assert!(matches!(err, NestError::DestructuringParentNotFound { .. }));
        assert!(err.to_string().contains("destructured parameter"));
    }

    #[test]
    fn array_members_nest_under_array() {
        let tree = nest(flat(&["employees", "employees[].name", "employees[].dept"])).unwrap();
        assert_eq!(
            shape(&tree),
            vec![(
                "employees".into(),
                vec!["employees[].name".into(), "employees[].dept".into()]
            )]
        );
    }

    #[test]
    fn deeper_entries_may_precede_parents() {
        let tree = nest(flat(&["a.b.c", "a", "a.b"])).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].properties[0].name, "a.b");
        assert_eq!(tree[0].properties[0].properties[0].name, "a.b.c");
    }

    #[test]
    fn unnamed_entries_are_dropped() {
        let tree = nest(flat(&["", "x"])).unwrap();
        assert_eq!(shape(&tree), vec![("x".into(), vec![])]);
    }

    #[test]
    fn nesting_twice_is_a_no_op() {
        let once = nest(flat(&["o", "o.a", "o.b", "o.b.c", "p"])).unwrap();
        let twice = nest(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn flatten_then_nest_round_trips() {
        let tree = nest(flat(&["o", "o.a", "o.b", "o.b.c", "p", "p.q"])).unwrap();
        let again = nest(flatten(tree.clone())).unwrap();
        assert_eq!(tree, again);
        assert_eq!(
            flatten(tree)
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>(),
            vec!["o", "o.a", "o.b", "o.b.c", "p", "p.q"]
        );
    }
}

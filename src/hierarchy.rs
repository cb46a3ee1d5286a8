//! Hierarchy builder: turns the flat comment list into a forest by
//! `memberof`, and the garbage collection that runs before it.

use crate::model::{Comment, Kind, Scope};
use std::collections::HashMap;
use tracing::debug;

/// Drop comments that describe nothing (no code, no name) and release the
/// syntax trees the survivors still point to.
pub fn garbage_collect(comments: Vec<Comment>) -> Vec<Comment> {
    let before = comments.len();
    let kept: Vec<Comment> = comments
        .into_iter()
        .filter(|c| c.ast().is_some() || c.name.is_some() || c.kind == Some(Kind::File))
        .map(|mut c| {
            c.context.ast = None;
            c
        })
        .collect();
    debug!(dropped = before - kept.len(), "garbage collected");
    kept
}

/// Where a resolved comment goes inside its parent.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Member(Scope),
    Event,
}

/// Build the forest. Comments keep their relative order at every level.
pub fn build(mut comments: Vec<Comment>) -> Vec<Comment> {
    let index = index(&comments);
    let mut parents: Vec<Option<(usize, Slot)>> = vec![None; comments.len()];

    for i in (0..comments.len()).rev() {
        let comment = &mut comments[i];
        if comment.name.is_none() {
            comment.push_error("could not determine @name for hierarchy", None);
        }
        let Some(memberof) = comment.memberof.clone() else {
            continue;
        };
        let target = index.get(memberof.as_str()).copied();
        let target = target.filter(|&j| !reaches(&parents, j, i));
        let Some(target) = target else {
            let line = comment
                .tags
                .iter()
                .find(|t| t.title == "memberof")
                .and_then(|t| t.line_number);
            comment.push_error(format!("memberof reference to {} not found", memberof), line);
            continue;
        };
        let slot = match (comment.kind, comment.scope) {
            (Some(Kind::Event), _) => Slot::Event,
            (_, Some(scope)) => Slot::Member(scope),
            (_, None) => {
                comment.push_error("found memberof but no scope tag", None);
                continue;
            }
        };
        parents[i] = Some((target, slot));
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots = Vec::new();
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some((j, _)) => children[*j].push(i),
            None => roots.push(i),
        }
    }

    let mut slots: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();
    let mut forest: Vec<Comment> = roots
        .into_iter()
        .filter_map(|i| assemble(i, &mut slots, &children, &parents))
        .collect();
    for root in &mut forest {
        assign_paths(root, &[], None);
    }
    forest
}

/// Name lookup: plain names, and `memberof.name` for members so dotted
/// `memberof` values resolve. Later declarations win.
fn index(comments: &[Comment]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, comment) in comments.iter().enumerate() {
        let Some(name) = &comment.name else {
            continue;
        };
        if let Some(memberof) = &comment.memberof {
            index.insert(format!("{}.{}", memberof, name), i);
        }
    }
    for (i, comment) in comments.iter().enumerate() {
        if let Some(name) = &comment.name {
            index.insert(name.clone(), i);
        }
    }
    index
}

/// Whether following parents from `from` arrives at `to`.
fn reaches(parents: &[Option<(usize, Slot)>], from: usize, to: usize) -> bool {
    let mut current = Some(from);
    while let Some(i) = current {
        if i == to {
            return true;
        }
        current = parents[i].map(|(p, _)| p);
    }
    false
}

fn assemble(
    i: usize,
    slots: &mut [Option<Comment>],
    children: &[Vec<usize>],
    parents: &[Option<(usize, Slot)>],
) -> Option<Comment> {
    let mut comment = slots[i].take()?;
    for &child in &children[i] {
        let Some(member) = assemble(child, slots, children, parents) else {
            continue;
        };
        match parents[child] {
            Some((_, Slot::Event)) => comment.events.push(member),
            Some((_, Slot::Member(scope))) => comment.members.scoped_mut(scope).push(member),
            None => {}
        }
    }
    Some(comment)
}

fn assign_paths(comment: &mut Comment, parent_path: &[String], parent_namespace: Option<&str>) {
    let mut path = parent_path.to_vec();
    if let Some(name) = &comment.name {
        path.push(name.clone());
    }
    let name = comment.name.as_deref().unwrap_or_default();
    let namespace = match parent_namespace {
        None => name.to_string(),
        Some(parent) if comment.kind == Some(Kind::Event) => format!("{}.event:{}", parent, name),
        Some(parent) => format!(
            "{}{}{}",
            parent,
            comment.scope.map_or(".", Scope::separator),
            name
        ),
    };

    comment.members.for_each_list(|list| {
        for member in list {
            assign_paths(member, &path, Some(namespace.as_str()));
        }
    });
    for event in &mut comment.events {
        assign_paths(event, &path, Some(namespace.as_str()));
    }
    comment.path = path;
    comment.namespace = Some(namespace);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::raw::RawTag;

    fn named(name: &str) -> Comment {
        Comment {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn member(name: &str, memberof: &str, scope: Scope) -> Comment {
        Comment {
            memberof: Some(memberof.into()),
            scope: Some(scope),
            ..named(name)
        }
    }

    fn names(comments: &[Comment]) -> Vec<&str> {
        comments.iter().filter_map(|c| c.name.as_deref()).collect()
    }

    #[test]
    fn instance_member_is_nested() {
        let forest = build(vec![named("Foo"), member("bar", "Foo", Scope::Instance)]);
        assert_eq!(names(&forest), vec!["Foo"]);
        let bar = &forest[0].members.instance[0];
        assert_eq!(bar.name.as_deref(), Some("bar"));
        assert_eq!(bar.path, vec!["Foo", "bar"]);
        assert_eq!(bar.namespace.as_deref(), Some("Foo#bar"));
        assert_eq!(forest[0].path, vec!["Foo"]);
    }

    #[test]
    fn member_declared_before_parent() {
        let forest = build(vec![member("create", "Foo", Scope::Static), named("Foo")]);
        assert_eq!(names(&forest), vec!["Foo"]);
        assert_eq!(names(&forest[0].members.static_), vec!["create"]);
        assert_eq!(
            forest[0].members.static_[0].namespace.as_deref(),
            Some("Foo.create")
        );
    }

    #[test]
    fn missing_parent_is_reported_and_kept_at_top() {
        let mut orphan = member("bar", "Nope", Scope::Static);
        orphan.tags.push(RawTag {
            title: "memberof".into(),
            line_number: Some(2),
            ..Default::default()
        });
        let forest = build(vec![named("Foo"), orphan]);
        assert_eq!(names(&forest), vec!["Foo", "bar"]);
        assert_eq!(forest[1].errors[0].message, "memberof reference to Nope not found");
        assert_eq!(forest[1].errors[0].comment_line_number, Some(2));
    }

    #[test]
    fn missing_parent_without_scope_gets_one_error() {
        let ghostly = Comment {
            memberof: Some("Ghost".into()),
            ..named("x")
        };
        let forest = build(vec![ghostly]);
        assert_eq!(names(&forest), vec!["x"]);
        assert_eq!(forest[0].errors.len(), 1);
        assert!(forest[0].errors[0].message.contains("Ghost"));
    }

    #[test]
    fn missing_scope_is_reported() {
        let c = Comment {
            memberof: Some("Foo".into()),
            ..named("bar")
        };
        let forest = build(vec![named("Foo"), c]);
        assert_eq!(names(&forest), vec!["Foo", "bar"]);
        assert_eq!(forest[1].errors[0].message, "found memberof but no scope tag");
    }

    #[test]
    fn events_need_no_scope() {
        let event = Comment {
            kind: Some(Kind::Event),
            memberof: Some("Foo".into()),
            ..named("ready")
        };
        let forest = build(vec![named("Foo"), event]);
        assert_eq!(names(&forest[0].events), vec!["ready"]);
        assert_eq!(forest[0].events[0].namespace.as_deref(), Some("Foo.event:ready"));
    }

    #[test]
    fn nameless_comment_is_reported() {
        let forest = build(vec![Comment::default()]);
        assert_eq!(forest[0].errors[0].message, "could not determine @name for hierarchy");
        assert!(forest[0].path.is_empty());
    }

    #[test]
    fn dotted_memberof_and_deep_paths() {
        let forest = build(vec![
            named("a"),
            member("b", "a", Scope::Static),
            member("c", "a.b", Scope::Inner),
        ]);
        assert_eq!(names(&forest), vec!["a"]);
        let b = &forest[0].members.static_[0];
        let c = &b.members.inner[0];
        assert_eq!(c.path, vec!["a", "b", "c"]);
        assert_eq!(c.namespace.as_deref(), Some("a.b~c"));
    }

    #[test]
    fn last_declaration_wins() {
        let forest = build(vec![
            named("Foo"),
            named("Foo"),
            member("bar", "Foo", Scope::Static),
        ]);
        assert_eq!(forest.len(), 2);
        assert!(forest[0].members.is_empty());
        assert_eq!(names(&forest[1].members.static_), vec!["bar"]);
    }

    #[test]
    fn self_membership_is_not_followed() {
        let forest = build(vec![member("Foo", "Foo", Scope::Static)]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].errors[0].message, "memberof reference to Foo not found");
    }

    #[test]
    fn cycles_are_broken() {
        let forest = build(vec![
            member("a", "b", Scope::Static),
            member("b", "a", Scope::Static),
        ]);
        let total: usize = forest.iter().map(|c| 1 + c.members.iter().count()).sum();
        assert_eq!(total, 2);
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn every_comment_appears_once() {
        let forest = build(vec![
            named("A"),
            member("x", "A", Scope::Instance),
            member("y", "A", Scope::Static),
            named("B"),
            member("z", "B", Scope::Inner),
        ]);
        let total: usize = forest.iter().map(|c| 1 + c.members.iter().count()).sum();
        assert_eq!(total, 5);
        assert_eq!(names(&forest), vec!["A", "B"]);
    }

    #[test]
    fn garbage_collection() {
        let file = Comment {
            kind: Some(Kind::File),
            ..Default::default()
        };
        let kept = garbage_collect(vec![Comment::default(), named("x"), file]);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|c| c.context.ast.is_none()));
    }
}

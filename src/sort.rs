//! Ordering of the flat comment list before the hierarchy is built. Members
//! keep the order their comments had here.

use crate::model::Comment;
use serde::Deserialize;
use std::cmp::Ordering;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Declaration order across the inputs.
    #[default]
    Source,
    /// By `memberof`, else name; case-insensitive, capitals first on ties.
    Alpha,
    /// By kind, then as `Alpha`.
    Kind,
}

/// Sort in place. Top-level comments named in `toc` come first, in `toc`
/// order; the rest follow in `order`.
pub fn sort(comments: &mut Vec<Comment>, order: SortOrder, toc: &[String]) {
    if toc.is_empty() {
        sort_by(comments, order);
        return;
    }

    let position = |c: &Comment| {
        if c.memberof.is_some() {
            return None;
        }
        let name = c.name.as_deref()?;
        toc.iter().position(|entry| entry == name)
    };
    let (mut fixed, mut rest): (Vec<Comment>, Vec<Comment>) =
        std::mem::take(comments).into_iter().partition(|c| position(c).is_some());
    fixed.sort_by_key(|c| position(c));
    sort_by(&mut rest, order);

    for entry in toc {
        if !fixed.iter().any(|c| c.name.as_deref() == Some(entry.as_str())) {
            warn!(
                "table of contents defined sorting of {} but no documentation with that namepath was found",
                entry
            );
        }
    }

    fixed.extend(rest);
    *comments = fixed;
}

fn sort_by(comments: &mut [Comment], order: SortOrder) {
    match order {
        SortOrder::Source => comments.sort_by_key(|c| c.context.sort_key),
        SortOrder::Alpha => comments.sort_by(by_name),
        SortOrder::Kind => comments.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| by_name(a, b))),
    }
}

fn by_name(a: &Comment, b: &Comment) -> Ordering {
    let key = |c: &Comment| c.memberof.clone().or_else(|| c.name.clone());
    match (key(a), key(b)) {
        (Some(a), Some(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(&b)),
        _ => Ordering::Equal,
    }
}

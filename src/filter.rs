//! Drop comments by access level.

use crate::model::{Access, Comment};
use serde::Deserialize;

/// An access level as configured; `Undefined` selects comments that state
/// none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
    Undefined,
}

impl AccessLevel {
    fn of(access: Option<Access>) -> AccessLevel {
        match access {
            Some(Access::Public) => AccessLevel::Public,
            Some(Access::Protected) => AccessLevel::Protected,
            Some(Access::Private) => AccessLevel::Private,
            None => AccessLevel::Undefined,
        }
    }
}

pub const DEFAULT_LEVELS: [AccessLevel; 3] = [
    AccessLevel::Public,
    AccessLevel::Undefined,
    AccessLevel::Protected,
];

/// Keep comments whose access is in `levels` and that are not `@ignore`d,
/// at every depth.
pub fn filter_access(comments: Vec<Comment>, levels: &[AccessLevel]) -> Vec<Comment> {
    comments
        .into_iter()
        .filter(|c| !c.ignore && levels.contains(&AccessLevel::of(c.access)))
        .map(|mut c| {
            c.members.for_each_list(|list| {
                *list = filter_access(std::mem::take(list), levels);
            });
            c.events = filter_access(std::mem::take(&mut c.events), levels);
            c
        })
        .collect()
}

//! Final shaping of the forest for serialization.

use crate::model::Comment;
use anyhow::{Context, Result};

/// Remove diagnostics at every depth. Report them first if they matter.
pub fn strip_errors(comments: &mut [Comment]) {
    for comment in comments {
        comment.errors.clear();
        if let Some(ctor) = &mut comment.constructor_comment {
            strip_errors(std::slice::from_mut(&mut **ctor));
        }
        comment.members.for_each_list(|list| strip_errors(list));
        strip_errors(&mut comment.events);
    }
}

pub fn to_json(forest: &[Comment]) -> Result<String> {
    serde_json::to_string_pretty(forest).context("failed to serialize documentation")
}

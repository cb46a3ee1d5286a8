//! Hard failures.
//!
//! Everything else that can go wrong while resolving comments is a
//! [`Diagnostic`](crate::model::Diagnostic) on the record itself.

use thiserror::Error;

/// A parameter or property tree could not be rebuilt from its dotted
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum NestError {
    /// An intermediate segment names no earlier entry.
    #[error("Parent of {name} not found")]
    ParentNotFound {
        name: String,
        line_number: Option<u32>,
    },

    /// Same, for a placeholder name generated for a destructured parameter.
    #[error(
        "Parent of {name} not found. To document a destructuring\n\
         type, add a @param tag in its position to specify the name of the\n\
         destructured parameter"
    )]
    DestructuringParentNotFound {
        name: String,
        line_number: Option<u32>,
    },
}

impl NestError {
    pub fn name(&self) -> &str {
        match self {
            NestError::ParentNotFound { name, .. }
            | NestError::DestructuringParentNotFound { name, .. } => name,
        }
    }
}

/// A hard failure with the file it happened in.
#[derive(Debug, Error)]
#[error("{file}: {source}")]
pub struct FileError {
    pub file: String,
    #[source]
    pub source: NestError,
}

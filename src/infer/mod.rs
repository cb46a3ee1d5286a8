//! Inference pipeline: fills in what a comment leaves unsaid from the code
//! it is attached to.
//!
//! Passes run in a fixed order over one comment at a time. A pass never
//! overwrites a fact the author stated; most passes are wrapped in a
//! [`Guard`] that skips them outright when their field is already set.

mod access;
mod augments;
pub mod finders;
mod kind;
mod membership;
mod name;
mod params;
mod properties;
mod returns;
mod type_;

use crate::error::NestError;
use crate::model::Comment;
use crate::nest;
use regex::Regex;
use tracing::trace;

/// State carried across the comments of one source unit.
#[derive(Debug, Default, Clone)]
pub struct InferState {
    /// Name of the most recently seen module comment.
    pub current_module: Option<String>,
}

/// One inference step.
pub trait InferPass {
    fn name(&self) -> &'static str;

    fn infer(&self, comment: &mut Comment, state: &mut InferState);
}

/// A comment field that, once set, makes a pass redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Kind,
    Memberof,
    Augments,
    Implements,
    Type,
    /// Any `returns` entry with a type.
    ReturnType,
}

impl Field {
    pub fn is_set(self, comment: &Comment) -> bool {
        match self {
            Field::Name => comment.name.is_some(),
            Field::Kind => comment.kind.is_some(),
            Field::Memberof => comment.memberof.is_some(),
            Field::Augments => !comment.augments.is_empty(),
            Field::Implements => !comment.implements.is_empty(),
            Field::Type => comment.type_.is_some(),
            Field::ReturnType => comment.returns.iter().any(|r| r.type_.is_some()),
        }
    }
}

/// Runs the wrapped pass only when none of `fields` is set.
pub struct Guard<P> {
    pass: P,
    fields: &'static [Field],
}

impl<P: InferPass> Guard<P> {
    pub fn new(pass: P, fields: &'static [Field]) -> Guard<P> {
        Guard { pass, fields }
    }
}

impl<P: InferPass> InferPass for Guard<P> {
    fn name(&self) -> &'static str {
        self.pass.name()
    }

    fn infer(&self, comment: &mut Comment, state: &mut InferState) {
        if self.fields.iter().any(|f| f.is_set(comment)) {
            trace!(pass = self.pass.name(), "skipped: already stated");
            return;
        }
        self.pass.infer(comment, state);
    }
}

/// Remembers module comments so later `exports.x` assignments can be
/// attributed to them.
struct TrackModule;

impl InferPass for TrackModule {
    fn name(&self) -> &'static str {
        "module"
    }

    fn infer(&self, comment: &mut Comment, state: &mut InferState) {
        if comment.kind == Some(crate::model::Kind::Module) {
            if let Some(name) = &comment.name {
                state.current_module = Some(name.clone());
            }
        }
    }
}

/// The ordered pass list.
pub struct Pipeline {
    passes: Vec<Box<dyn InferPass>>,
}

impl Pipeline {
    /// `infer_private` marks matching names private when no access level
    /// was given.
    pub fn new(infer_private: Option<Regex>) -> Pipeline {
        let passes: Vec<Box<dyn InferPass>> = vec![
            Box::new(Guard::new(name::InferName, &[Field::Name])),
            Box::new(access::InferAccess::new(infer_private)),
            Box::new(Guard::new(augments::InferAugments, &[Field::Augments])),
            Box::new(Guard::new(augments::InferImplements, &[Field::Implements])),
            Box::new(Guard::new(kind::InferKind, &[Field::Kind])),
            Box::new(TrackModule),
            Box::new(params::InferParams),
            Box::new(properties::InferProperties),
            Box::new(Guard::new(returns::InferReturn, &[Field::ReturnType])),
            Box::new(Guard::new(membership::InferMembership, &[Field::Memberof])),
            Box::new(Guard::new(type_::InferType, &[Field::Type])),
        ];
        Pipeline { passes }
    }

    pub fn passes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|p| p.name())
    }

    /// Run every pass over one comment, then rebuild its parameter and
    /// property trees.
    pub fn run(&self, comment: &mut Comment, state: &mut InferState) -> Result<(), NestError> {
        nest::flatten_comment(comment);
        for pass in &self.passes {
            pass.infer(comment, state);
        }
        nest::nest_comment(comment)
    }

    /// Run over the comments of one source unit, in order.
    pub fn run_all(&self, comments: &mut [Comment]) -> Result<(), NestError> {
        let mut state = InferState::default();
        for comment in comments.iter_mut() {
            self.run(comment, &mut state)?;
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Pipeline {
        Pipeline::new(None)
    }
}

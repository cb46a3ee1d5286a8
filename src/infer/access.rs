//! Access level from TypeScript modifiers and from a naming convention.

use super::{InferPass, InferState};
use crate::model::{Access, Comment};
use crate::syntax::NodeKind;
use regex::Regex;

pub struct InferAccess {
    private: Option<Regex>,
}

impl InferAccess {
    /// `private` marks a name private when it matches, e.g. `^_`.
    pub fn new(private: Option<Regex>) -> InferAccess {
        InferAccess { private }
    }
}

impl InferPass for InferAccess {
    fn name(&self) -> &'static str {
        "access"
    }

    fn infer(&self, comment: &mut Comment, _: &mut InferState) {
        if let Some(ast) = comment.ast() {
            let (accessibility, readonly) = match ast.kind() {
                NodeKind::ClassMethod { accessibility, .. } => (accessibility.as_deref(), false),
                NodeKind::ClassProperty {
                    accessibility,
                    readonly,
                    ..
                } => (accessibility.as_deref(), *readonly),
                _ => (None, false),
            };
            let declared = accessibility.and_then(Access::parse);
            if readonly {
                comment.readonly = true;
            }
            if comment.access.is_none() {
                comment.access = declared;
            }
        }

        if comment.access.is_some() {
            return;
        }
        if let (Some(re), Some(name)) = (&self.private, &comment.name) {
            if re.is_match(name) {
                comment.access = Some(Access::Private);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::finders::testing::*;
    use super::super::test_support::attached;
    use super::*;
    use serde_json::json;

    fn underscore() -> InferAccess {
        InferAccess::new(Some(Regex::new("^_").unwrap()))
    }

    fn named(name: &str) -> Comment {
        Comment {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn pattern_marks_private() {
        let mut c = named("_hidden");
        underscore().infer(&mut c, &mut InferState::default());
        assert_eq!(c.access, Some(Access::Private));

        let mut c = named("shown");
        underscore().infer(&mut c, &mut InferState::default());
        assert_eq!(c.access, None);
    }

    #[test]
    fn explicit_access_is_kept() {
        let mut c = Comment {
            access: Some(Access::Public),
            ..named("_hidden")
        };
        underscore().infer(&mut c, &mut InferState::default());
        assert_eq!(c.access, Some(Access::Public));
    }

    #[test]
    fn no_pattern_no_change() {
        let mut c = named("_hidden");
        InferAccess::new(None).infer(&mut c, &mut InferState::default());
        assert_eq!(c.access, None);
    }

    #[test]
    fn typescript_modifiers() {
        let t = program(vec![class(
            Some("A"),
            vec![json!({
                "type": "ClassProperty",
                "key": ident("secret"),
                "accessibility": "protected",
                "readonly": true
            })],
        )]);
        let property = find(&t, |k| matches!(k, NodeKind::ClassProperty { .. }));
        let mut c = attached(&t, property);
        InferAccess::new(None).infer(&mut c, &mut InferState::default());
        assert_eq!(c.access, Some(Access::Protected));
        assert!(c.readonly);
    }
}

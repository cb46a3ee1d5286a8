//! Style checks on tag types, and the diagnostic report.

use crate::model::Comment;
use crate::syntax::raw::RawTag;
use crate::types::Type;

/// Spellings that have a standard form.
const CANONICAL: [(&str, &str); 7] = [
    ("String", "string"),
    ("Boolean", "boolean"),
    ("Undefined", "undefined"),
    ("Number", "number"),
    ("array", "Array"),
    ("date", "Date"),
    ("object", "Object"),
];

/// Push a diagnostic for every non-standard type name in the comment's
/// tags.
pub fn lint_comment(comment: &mut Comment) {
    let mut found = Vec::new();
    for tag in &comment.tags {
        if let Some(ty) = &tag.type_ {
            check(ty, tag, &mut found);
        }
    }
    for (message, line) in found {
        comment.push_error(message, line);
    }
}

fn check(ty: &Type, tag: &RawTag, found: &mut Vec<(String, Option<u32>)>) {
    let name = match ty {
        Type::Name { name } => Some(name.as_str()),
        Type::Application { base, .. } => Some(base.as_str()),
        _ => None,
    };
    if let Some((bad, good)) = name.and_then(|n| CANONICAL.iter().find(|(bad, _)| *bad == n)) {
        found.push((format!("type {} found, {} is standard", bad, good), tag.line_number));
    }
    for child in ty.children() {
        check(child, tag, found);
    }
}

/// One line per diagnostic in the forest: `file:line  message`, where the
/// line is the comment's start plus the diagnostic's offset.
pub fn report(forest: &[Comment]) -> Vec<String> {
    let mut lines = Vec::new();
    for comment in forest {
        collect(comment, &mut lines);
    }
    lines
}

fn collect(comment: &Comment, lines: &mut Vec<String>) {
    for error in &comment.errors {
        let line = comment.loc.start.line + error.comment_line_number.unwrap_or(0);
        lines.push(format!("{}:{}  {}", comment.context.file, line, error.message));
    }
    if let Some(ctor) = &comment.constructor_comment {
        collect(ctor, lines);
    }
    for member in comment.members.iter() {
        collect(member, lines);
    }
    for event in &comment.events {
        collect(event, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Context;
    use crate::syntax::raw::{Location, Position};

    fn tagged(ty: Type, line: u32) -> Comment {
        Comment {
            tags: vec![RawTag {
                title: "param".into(),
                name: Some("x".into()),
                type_: Some(ty),
                line_number: Some(line),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn flags_boxed_primitives() {
        let mut c = tagged(Type::name("String"), 2);
        lint_comment(&mut c);
        assert_eq!(c.errors.len(), 1);
        assert_eq!(c.errors[0].message, "type String found, string is standard");
        assert_eq!(c.errors[0].comment_line_number, Some(2));
    }

    #[test]
    fn walks_nested_types() {
        let ty = Type::Union {
            elements: vec![
                Type::name("number"),
                Type::Application {
                    base: "array".into(),
                    arguments: vec![Type::optional(Type::name("Boolean"))],
                },
            ],
        };
        let mut c = tagged(ty, 1);
        lint_comment(&mut c);
        let messages: Vec<&str> = c.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "type array found, Array is standard",
                "type Boolean found, boolean is standard"
            ]
        );
    }

    #[test]
    fn standard_names_pass() {
        let mut c = tagged(Type::name("Object"), 1);
        lint_comment(&mut c);
        assert!(c.errors.is_empty());
    }

    #[test]
    fn report_lines_are_absolute() {
        let mut c = tagged(Type::name("Number"), 3);
        c.loc = Location {
            start: Position { line: 10, column: 0 },
            end: Position { line: 14, column: 3 },
        };
        c.context = Context {
            file: "lib/math.js".into(),
            ..Default::default()
        };
        lint_comment(&mut c);
        let mut child = Comment::default();
        child.context.file = "lib/math.js".into();
        child.push_error("memberof reference to Nope not found", None);
        c.members.static_.push(child);

        assert_eq!(
            report(&[c]),
            vec![
                "lib/math.js:13  type Number found, number is standard",
                "lib/math.js:0  memberof reference to Nope not found"
            ]
        );
    }
}

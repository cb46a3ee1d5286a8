//! docinfer: resolve JSDoc comments against the syntax trees they annotate.
//!
//! Each source unit is a JSON document holding a Babel syntax tree with its
//! doc comments already split into tags. [`process`] turns a set of units
//! into a forest of [`model::Comment`] records:
//!
//! 1. extraction and tag normalization, one record per doc block
//! 2. inference from the attached code ([`infer::Pipeline`])
//! 3. lint, when enabled
//! 4. garbage collection, then sorting of the flat list
//! 5. the hierarchy by `memberof` ([`resolve`] stops here)
//! 6. the access filter

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod hierarchy;
pub mod infer;
pub mod lint;
pub mod markdown;
pub mod model;
pub mod nest;
pub mod output;
pub mod parser;
pub mod sort;
pub mod syntax;
pub mod types;

use error::FileError;
use filter::{AccessLevel, DEFAULT_LEVELS};
use model::Comment;
use regex::Regex;
use sort::SortOrder;
use std::sync::Arc;
use syntax::SyntaxTree;
use tracing::debug;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Names matching this are private unless tagged otherwise.
    pub infer_private: Option<Regex>,
    pub access: Vec<AccessLevel>,
    pub sort_order: SortOrder,
    pub lint: bool,
    pub toc: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            infer_private: None,
            access: DEFAULT_LEVELS.to_vec(),
            sort_order: SortOrder::Source,
            lint: false,
            toc: Vec::new(),
        }
    }
}

/// Every stage up to the hierarchy, before any record is filtered out.
/// Diagnostics stay on the returned records; a parameter tree that cannot
/// be nested fails the whole run.
pub fn resolve(units: &[Arc<SyntaxTree>], options: &Options) -> Result<Vec<Comment>, FileError> {
    let pipeline = infer::Pipeline::new(options.infer_private.clone());
    let mut comments = Vec::new();

    for (i, tree) in units.iter().enumerate() {
        let mut unit = extract::extract(tree, i);
        debug!(file = %tree.file, comments = unit.len(), "extracted");
        pipeline.run_all(&mut unit).map_err(|source| FileError {
            file: tree.file.clone(),
            source,
        })?;
        comments.append(&mut unit);
    }

    if options.lint {
        comments.iter_mut().for_each(lint::lint_comment);
    }

    let mut comments = hierarchy::garbage_collect(comments);
    sort::sort(&mut comments, options.sort_order, &options.toc);
    let forest = hierarchy::build(comments);
    debug!(roots = forest.len(), "hierarchy built");
    Ok(forest)
}

/// [`resolve`], then the access filter.
pub fn process(units: &[Arc<SyntaxTree>], options: &Options) -> Result<Vec<Comment>, FileError> {
    let forest = resolve(units, options)?;
    Ok(filter::filter_access(forest, &options.access))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, Scope};
    use serde_json::{json, Value};

    fn block(line: u32, tags: Value) -> Value {
        json!({
            "type": "CommentBlock",
            "value": "* doc ",
            "loc": { "start": { "line": line, "column": 0 }, "end": { "line": line, "column": 10 } },
            "description": "doc",
            "tags": tags
        })
    }

    fn unit(file: &str, body: Vec<Value>) -> Arc<SyntaxTree> {
        let text = json!({ "file": file, "ast": { "type": "Program", "body": body } }).to_string();
        syntax::load(&text).unwrap()
    }

    fn person() -> Arc<SyntaxTree> {
        unit(
            "lib/person.js",
            vec![
                json!({
                    "type": "FunctionDeclaration",
                    "leadingComments": [block(1, json!([]))],
                    "id": { "type": "Identifier", "name": "Person" },
                    "params": [],
                    "body": { "type": "BlockStatement", "body": [] }
                }),
                json!({
                    "type": "ExpressionStatement",
                    "leadingComments": [block(5, json!([]))],
                    "expression": {
                        "type": "AssignmentExpression",
                        "left": {
                            "type": "MemberExpression",
                            "object": {
                                "type": "MemberExpression",
                                "object": { "type": "Identifier", "name": "Person" },
                                "property": { "type": "Identifier", "name": "prototype" }
                            },
                            "property": { "type": "Identifier", "name": "_greet" }
                        },
                        "right": {
                            "type": "FunctionExpression",
                            "params": [{ "type": "Identifier", "name": "other" }],
                            "body": { "type": "BlockStatement", "body": [] }
                        }
                    }
                }),
            ],
        )
    }

    #[test]
    fn prototype_method_nests_under_constructor() {
        let forest = process(&[person()], &Options::default()).unwrap();
        assert_eq!(forest.len(), 1);
        let person = &forest[0];
        assert_eq!(person.name.as_deref(), Some("Person"));
        assert_eq!(person.kind, Some(Kind::Class));
        let greet = &person.members.instance[0];
        assert_eq!(greet.name.as_deref(), Some("_greet"));
        assert_eq!(greet.scope, Some(Scope::Instance));
        assert_eq!(greet.params[0].name, "other");
        assert_eq!(greet.namespace.as_deref(), Some("Person#_greet"));
        assert!(person.context.ast.is_none());
    }

    #[test]
    fn private_pattern_and_access_filter() {
        let options = Options {
            infer_private: Some(Regex::new("^_").unwrap()),
            ..Options::default()
        };
        let forest = process(&[person()], &options).unwrap();
        assert!(forest[0].members.instance.is_empty());
    }

    #[test]
    fn nest_failure_names_the_file() {
        let t = unit(
            "lib/bad.js",
            vec![json!({
                "type": "ExpressionStatement",
                "leadingComments": [block(1, json!([
                    { "title": "name", "name": "f" },
                    { "title": "param", "name": "a.b" }
                ]))],
                "expression": { "type": "Identifier", "name": "x" }
            })],
        );
        let err = process(&[t], &Options::default()).unwrap_err();
        assert_eq!(err.file, "lib/bad.js");
        assert_eq!(err.to_string(), "lib/bad.js: Parent of a.b not found");
    }

    #[test]
    fn units_keep_their_order() {
        let a = unit(
            "a.js",
            vec![json!({
                "type": "ExpressionStatement",
                "leadingComments": [block(9, json!([{ "title": "name", "name": "fromA" }]))],
                "expression": { "type": "Identifier", "name": "x" }
            })],
        );
        let b = unit(
            "b.js",
            vec![json!({
                "type": "ExpressionStatement",
                "leadingComments": [block(1, json!([{ "title": "name", "name": "fromB" }]))],
                "expression": { "type": "Identifier", "name": "y" }
            })],
        );
        let forest = process(&[a, b], &Options::default()).unwrap();
        let names: Vec<_> = forest.iter().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec!["fromA", "fromB"]);
    }

    #[test]
    fn lint_runs_when_enabled() {
        let t = unit(
            "lib/lint.js",
            vec![json!({
                "type": "ExpressionStatement",
                "leadingComments": [block(1, json!([
                    { "title": "name", "name": "f" },
                    { "title": "param", "name": "s", "lineNumber": 1,
                      "type": { "type": "name", "name": "String" } }
                ]))],
                "expression": { "type": "Identifier", "name": "x" }
            })],
        );
        let options = Options {
            lint: true,
            ..Options::default()
        };
        let forest = process(&[t.clone()], &options).unwrap();
        assert_eq!(forest[0].errors[0].message, "type String found, string is standard");
        let quiet = process(&[t], &Options::default()).unwrap();
        assert!(quiet[0].errors.is_empty());
    }

    #[test]
    fn diagnostics_of_hidden_records_survive_resolve() {
        let t = unit(
            "lib/hidden.js",
            vec![json!({
                "type": "ExpressionStatement",
                "leadingComments": [block(3, json!([
                    { "title": "name", "name": "secret" },
                    { "title": "private" },
                    { "title": "param", "name": "n", "lineNumber": 1,
                      "type": { "type": "name", "name": "Number" } }
                ]))],
                "expression": { "type": "Identifier", "name": "x" }
            })],
        );
        let options = Options {
            lint: true,
            ..Options::default()
        };
        let resolved = resolve(&[t.clone()], &options).unwrap();
        assert_eq!(
            lint::report(&resolved),
            vec!["lib/hidden.js:4  type Number found, number is standard"]
        );
        assert!(process(&[t], &options).unwrap().is_empty());
    }

    #[test]
    fn named_class_still_reads_its_code() {
        let t = unit(
            "lib/widget.js",
            vec![json!({
                "type": "ClassDeclaration",
                "leadingComments": [block(1, json!([{ "title": "class", "name": "Widget" }]))],
                "id": { "type": "Identifier", "name": "Widget" },
                "superClass": { "type": "Identifier", "name": "Base" },
                "body": { "type": "ClassBody", "body": [{
                    "type": "ClassMethod",
                    "kind": "constructor",
                    "key": { "type": "Identifier", "name": "constructor" },
                    "params": [{ "type": "Identifier", "name": "a" }],
                    "body": { "type": "BlockStatement", "body": [] }
                }]}
            })],
        );
        let forest = process(&[t], &Options::default()).unwrap();
        let widget = &forest[0];
        assert_eq!(widget.name.as_deref(), Some("Widget"));
        assert_eq!(widget.kind, Some(Kind::Class));
        assert_eq!(widget.params[0].name, "a");
        assert_eq!(widget.augments[0].name, "Base");
    }

    #[test]
    fn named_typedef_still_reads_its_fields() {
        let t = unit(
            "lib/point.js",
            vec![json!({
                "type": "TypeAlias",
                "leadingComments": [block(1, json!([
                    { "title": "typedef", "name": "Point",
                      "type": { "type": "name", "name": "Object" } }
                ]))],
                "id": { "type": "Identifier", "name": "Point" },
                "right": { "type": "ObjectTypeAnnotation", "properties": [
                    { "type": "ObjectTypeProperty",
                      "key": { "type": "Identifier", "name": "x" },
                      "value": { "type": "NumberTypeAnnotation" } }
                ]}
            })],
        );
        let forest = process(&[t], &Options::default()).unwrap();
        let point = &forest[0];
        assert_eq!(point.kind, Some(Kind::Typedef));
        assert_eq!(point.properties[0].name, "x");
        assert_eq!(point.properties[0].type_, Some(types::Type::name("number")));
    }
}

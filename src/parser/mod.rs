//! Tag normalizer: folds a doc comment's tag list into a [`Comment`].
//!
//! Every tag is looked up in the table in [`tags`]. Problems never abort
//! normalization; they are recorded on the comment as diagnostics.

pub mod tags;

use crate::markdown;
use crate::model::{
    Comment, Example, Kind, KindTag, Param, Reference, TypedDescription,
};
use crate::syntax::raw::{Location, RawTag};
use crate::types::Type;
use tags::{Flag, Handler, List, MarkdownField, Scalar};
use tracing::warn;

const DEFAULT_DEPRECATION: &str = "This is deprecated.";

/// Build a comment record from a tag list and the comment's free text.
pub fn normalize(raw_tags: &[RawTag], description: &str, loc: Location) -> Comment {
    let mut comment = Comment {
        loc,
        tags: raw_tags.to_vec(),
        ..Default::default()
    };

    if !description.trim().is_empty() {
        comment.description = Some(markdown::parse(description));
    }

    for tag in raw_tags {
        if !tag.errors.is_empty() {
            for message in &tag.errors {
                comment.push_error(message.clone(), tag.line_number);
            }
            continue;
        }

        let Some((title, handler)) = tags::resolve(&tag.title) else {
            comment.push_error(format!("unknown tag @{}", tag.title), tag.line_number);
            continue;
        };

        if title == "param" && tag.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            comment.push_error("A @param tag without a parameter name was rejected", None);
            continue;
        }

        apply(&mut comment, title, handler, tag);
    }

    comment
}

fn apply(comment: &mut Comment, title: &str, handler: Handler, tag: &RawTag) {
    match handler {
        Handler::Flag(flag) => *flag_field(comment, flag) = true,
        // `tags::resolve` never yields a synonym
        Handler::Synonym(_) => {}
        Handler::Scalar(field) => apply_scalar(comment, field, tag),
        Handler::Markdown(field) => {
            let node = Some(markdown::parse(description(tag).unwrap_or_default()));
            match field {
                MarkdownField::Description => comment.description = node,
                MarkdownField::Classdesc => comment.classdesc = node,
                MarkdownField::Summary => comment.summary = node,
                MarkdownField::Copyright => comment.copyright = node,
            }
        }
        Handler::Deprecated => {
            let text = description(tag).unwrap_or(DEFAULT_DEPRECATION);
            comment.deprecated = Some(markdown::parse(text));
        }
        Handler::KindShorthand(Kind::File) => {
            if let Some(text) = description(tag) {
                comment.description = Some(markdown::parse(text));
            }
            push_kind(comment, title, Kind::File, None);
        }
        Handler::KindShorthand(kind) => {
            // These three carry their name in the tag text rather than as a
            // separate name token.
            let name = match kind {
                Kind::Event | Kind::External | Kind::Interface => text(tag),
                _ => name(tag),
            };
            if let Some(ty) = &tag.type_ {
                comment.type_ = Some(ty.clone());
            }
            push_kind(comment, title, kind, name);
        }
        Handler::Callback => {
            push_kind(comment, title, Kind::Typedef, text(tag));
            comment.type_ = Some(Type::name("Function"));
        }
        Handler::Enum => {
            push_kind(comment, title, Kind::Enum, name(tag));
            if let Some(ty) = &tag.type_ {
                comment.type_ = Some(ty.clone());
            }
        }
        Handler::ExplicitKind => match text(tag).as_deref().and_then(Kind::parse) {
            Some(kind) => push_kind(comment, title, kind, None),
            None => comment.push_error(
                format!("invalid kind: {}", text(tag).unwrap_or_default()),
                tag.line_number,
            ),
        },
        Handler::Type => {
            if let Some(ty) = &tag.type_ {
                comment.type_ = Some(ty.clone());
            }
        }
        Handler::Scope(scope) => comment.scope = Some(scope),
        Handler::Access(access) => comment.access = Some(access),
        Handler::ExplicitAccess => {
            match text(tag).as_deref().and_then(crate::model::Access::parse) {
                Some(access) => comment.access = Some(access),
                None => comment.push_error(
                    format!("invalid access: {}", text(tag).unwrap_or_default()),
                    tag.line_number,
                ),
            }
        }
        Handler::List(list) => apply_list(comment, list, tag),
        Handler::Ignored => {}
    }
}

fn flag_field(comment: &mut Comment, flag: Flag) -> &mut bool {
    match flag {
        Flag::Abstract => &mut comment.abstract_,
        Flag::Async => &mut comment.async_,
        Flag::Generator => &mut comment.generator,
        Flag::HideConstructor => &mut comment.hideconstructor,
        Flag::Ignore => &mut comment.ignore,
        Flag::Override => &mut comment.override_,
        Flag::Readonly => &mut comment.readonly,
    }
}

fn apply_scalar(comment: &mut Comment, field: Scalar, tag: &RawTag) {
    match field {
        Scalar::Alias => comment.alias = name(tag).or_else(|| text(tag)),
        Scalar::Name => comment.name = name(tag).or_else(|| text(tag)),
        Scalar::Memberof => {
            if let Some(target) = text(tag) {
                let (owner, scope) = tags::split_memberof(&target);
                comment.memberof = Some(owner);
                if scope.is_some() {
                    comment.scope = scope;
                }
            }
        }
        Scalar::Lends => comment.lends = text(tag),
        Scalar::Since => comment.since = text(tag),
        Scalar::Version => comment.version = text(tag),
        Scalar::Author => comment.author = text(tag),
        Scalar::License => comment.license = text(tag),
    }
}

fn apply_list(comment: &mut Comment, list: List, tag: &RawTag) {
    match list {
        List::Params | List::Properties => {
            let raw_name = tag.name.as_deref().unwrap_or_default();
            let parsed = tags::parse_param_name(raw_name);
            let default = parsed.default.or_else(|| tag.default.clone());
            let mut type_ = tag.type_.clone();
            if parsed.optional || default.is_some() {
                type_ = Some(type_.unwrap_or(Type::All).into_optional());
            }
            let param = Param {
                name: parsed.name,
                line_number: tag.line_number,
                description: description(tag).map(markdown::parse),
                type_,
                default,
                properties: Vec::new(),
            };
            if list == List::Params {
                comment.params.push(param);
            } else {
                comment.properties.push(param);
            }
        }
        List::Returns | List::Throws | List::Yields => {
            let entry = TypedDescription {
                type_: tag.type_.clone(),
                description: description(tag).map(markdown::parse),
            };
            match list {
                List::Returns => comment.returns.push(entry),
                List::Throws => comment.throws.push(entry),
                _ => comment.yields.push(entry),
            }
        }
        List::Augments | List::Implements => {
            // `@extends {Base}` names the supertype through its type
            let target = name(tag).or_else(|| match &tag.type_ {
                Some(Type::Name { name }) => Some(name.clone()),
                _ => None,
            });
            let Some(name) = target else {
                warn!(tag = %tag.title, "supertype given as a complex type is not supported");
                return;
            };
            if list == List::Augments {
                comment.augments.push(Reference { name });
            } else {
                comment.implements.push(Reference { name });
            }
        }
        List::Examples => match description(tag) {
            Some(code) => comment.examples.push(Example {
                description: code.to_string(),
                caption: tag
                    .caption
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .map(markdown::parse),
            }),
            None => comment.push_error("@example without code", tag.line_number),
        },
        List::Sees => {
            if let Some(text) = text(tag) {
                comment.sees.push(markdown::parse(&text));
            }
        }
        List::Todos => comment
            .todos
            .push(markdown::parse(description(tag).unwrap_or_default())),
    }
}

fn push_kind(comment: &mut Comment, title: &str, kind: Kind, name: Option<String>) {
    comment.kind_tags.push(KindTag {
        title: title.to_string(),
        kind,
        name,
    });
}

// -- Tag field helpers --------------------------------------------------------

fn description(tag: &RawTag) -> Option<&str> {
    tag.description.as_deref().filter(|d| !d.trim().is_empty())
}

fn name(tag: &RawTag) -> Option<String> {
    tag.name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Tag text: the description, or the name when the comment parser put the
/// value there.
fn text(tag: &RawTag) -> Option<String> {
    description(tag)
        .map(|d| d.trim().to_string())
        .or_else(|| name(tag))
}

//! Data model for resolved documentation, independent of any output format.

use crate::markdown::Node;
use crate::syntax::raw::{Location, RawTag};
use crate::syntax::AstRef;
use crate::types::Type;
use serde::Serialize;
use std::fmt;

/// Semantic category of a documented entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Class,
    Constant,
    Enum,
    Event,
    External,
    File,
    Function,
    Interface,
    Member,
    Mixin,
    Module,
    Namespace,
    Typedef,
}

impl Kind {
    pub fn parse(s: &str) -> Option<Kind> {
        Some(match s {
            "class" => Kind::Class,
            "constant" => Kind::Constant,
            "enum" => Kind::Enum,
            "event" => Kind::Event,
            "external" => Kind::External,
            "file" => Kind::File,
            "function" => Kind::Function,
            "interface" => Kind::Interface,
            "member" => Kind::Member,
            "mixin" => Kind::Mixin,
            "module" => Kind::Module,
            "namespace" => Kind::Namespace,
            "typedef" => Kind::Typedef,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Class => "class",
            Kind::Constant => "constant",
            Kind::Enum => "enum",
            Kind::Event => "event",
            Kind::External => "external",
            Kind::File => "file",
            Kind::Function => "function",
            Kind::Interface => "interface",
            Kind::Member => "member",
            Kind::Mixin => "mixin",
            Kind::Module => "module",
            Kind::Namespace => "namespace",
            Kind::Typedef => "typedef",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Static,
    Instance,
    Inner,
    Global,
}

impl Scope {
    /// Separator used in namespace strings: `Foo.bar`, `Foo#bar`, `Foo~bar`.
    pub fn separator(self) -> &'static str {
        match self {
            Scope::Static | Scope::Global => ".",
            Scope::Instance => "#",
            Scope::Inner => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Private,
    Protected,
}

impl Access {
    pub fn parse(s: &str) -> Option<Access> {
        match s {
            "public" => Some(Access::Public),
            "private" => Some(Access::Private),
            "protected" => Some(Access::Protected),
            _ => None,
        }
    }
}

/// A non-fatal problem found while processing a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub message: String,
    /// Line offset relative to the start of the comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_line_number: Option<u32>,
}

/// A documented parameter or property. Before nesting `name` may be a
/// dotted path (`options.size`, `items[].id`); afterwards children live in
/// `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Node>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Param>,
}

impl Param {
    pub fn named(name: impl Into<String>) -> Param {
        Param {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Entry of `returns`, `throws` and `yields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypedDescription {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Node>,
}

/// A supertype or implemented interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<Node>,
}

/// A kind declared by a shorthand tag (`@class Foo`, `@module bar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindTag {
    /// Canonical title of the tag that declared the kind.
    pub title: String,
    pub kind: Kind,
    pub name: Option<String>,
}

/// Where a comment came from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Context {
    pub file: String,
    /// Location of the documented code, or of the comment itself when no
    /// code follows it.
    pub loc: Location,
    /// `(unit index, line, column)`; orders records by source position.
    #[serde(skip)]
    pub sort_key: (usize, u32, u32),
    #[serde(skip)]
    pub ast: Option<AstRef>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Members {
    pub global: Vec<Comment>,
    pub inner: Vec<Comment>,
    pub instance: Vec<Comment>,
    #[serde(rename = "static")]
    pub static_: Vec<Comment>,
}

impl Members {
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
            && self.inner.is_empty()
            && self.instance.is_empty()
            && self.static_.is_empty()
    }

    pub fn scoped_mut(&mut self, scope: Scope) -> &mut Vec<Comment> {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Inner => &mut self.inner,
            Scope::Instance => &mut self.instance,
            Scope::Static => &mut self.static_,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.global
            .iter()
            .chain(&self.inner)
            .chain(&self.instance)
            .chain(&self.static_)
    }

    /// Apply `f` to each of the four lists.
    pub fn for_each_list(&mut self, mut f: impl FnMut(&mut Vec<Comment>)) {
        f(&mut self.global);
        f(&mut self.inner);
        f(&mut self.instance);
        f(&mut self.static_);
    }
}

/// A documentation comment resolved against its code.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memberof: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lends: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classdesc: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(rename = "abstract", skip_serializing_if = "is_false")]
    pub abstract_: bool,
    #[serde(rename = "async", skip_serializing_if = "is_false")]
    pub async_: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub generator: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub hideconstructor: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore: bool,
    #[serde(rename = "override", skip_serializing_if = "is_false")]
    pub override_: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Type>,
    pub params: Vec<Param>,
    pub properties: Vec<Param>,
    pub returns: Vec<TypedDescription>,
    pub throws: Vec<TypedDescription>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub yields: Vec<TypedDescription>,
    pub augments: Vec<Reference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<Reference>,
    pub examples: Vec<Example>,
    pub sees: Vec<Node>,
    pub todos: Vec<Node>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Diagnostic>,
    pub loc: Location,
    pub context: Context,

    pub members: Members,
    pub events: Vec<Comment>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Doc comment written on a class constructor, folded into the class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor_comment: Option<Box<Comment>>,

    #[serde(skip)]
    pub tags: Vec<RawTag>,
    #[serde(skip)]
    pub kind_tags: Vec<KindTag>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Comment {
    /// Record a diagnostic; an identical one already present is not
    /// duplicated.
    pub fn push_error(&mut self, message: impl Into<String>, comment_line_number: Option<u32>) {
        let diagnostic = Diagnostic {
            message: message.into(),
            comment_line_number,
        };
        if !self.errors.contains(&diagnostic) {
            self.errors.push(diagnostic);
        }
    }

    pub fn has_tag(&self, title: &str) -> bool {
        self.tags.iter().any(|t| t.title == title)
    }

    /// Set `memberof` and `scope` together.
    pub fn set_membership(&mut self, memberof: impl Into<String>, scope: Scope) {
        self.memberof = Some(memberof.into());
        self.scope = Some(scope);
    }

    pub fn ast(&self) -> Option<&AstRef> {
        self.context.ast.as_ref()
    }
}

//! Tag table: maps every recognized tag title to the handler that folds
//! it into a comment record.

use crate::model::{Access, Kind, Scope};
use regex::Regex;
use std::sync::LazyLock;

/// Boolean fields set by the presence of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Abstract,
    Async,
    Generator,
    HideConstructor,
    Ignore,
    Override,
    Readonly,
}

/// Scalar fields overwritten by the tag's name or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Alias,
    Name,
    Memberof,
    Lends,
    Since,
    Version,
    Author,
    License,
}

/// Scalar fields parsed as markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownField {
    Description,
    Classdesc,
    Summary,
    Copyright,
}

/// Tags appended to one of the record's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum List {
    Params,
    Properties,
    Returns,
    Throws,
    Yields,
    Augments,
    Implements,
    Examples,
    Sees,
    Todos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Flag(Flag),
    /// Processed exactly as the named canonical tag.
    Synonym(&'static str),
    Scalar(Scalar),
    Markdown(MarkdownField),
    /// `@class [type] [name]` and friends.
    KindShorthand(Kind),
    Callback,
    Enum,
    /// `@kind <kind>`
    ExplicitKind,
    Deprecated,
    Type,
    Scope(Scope),
    Access(Access),
    /// `@access <level>`
    ExplicitAccess,
    List(List),
    /// Recognized but carries nothing the record keeps.
    Ignored,
}

/// Look up the handler for a tag title.
pub fn handler(title: &str) -> Option<Handler> {
    use Handler::*;
    let h = match title {
        "abstract" => Flag(self::Flag::Abstract),
        "async" => Flag(self::Flag::Async),
        "generator" => Flag(self::Flag::Generator),
        "hideconstructor" => Flag(self::Flag::HideConstructor),
        "ignore" => Flag(self::Flag::Ignore),
        "override" => Flag(self::Flag::Override),
        "readonly" => Flag(self::Flag::Readonly),

        "arg" | "argument" => Synonym("param"),
        "return" => Synonym("returns"),
        "exception" => Synonym("throws"),
        "extends" => Synonym("augments"),
        "constructor" => Synonym("class"),
        "const" => Synonym("constant"),
        "defaultvalue" => Synonym("default"),
        "desc" => Synonym("description"),
        "emits" => Synonym("fires"),
        "fileoverview" | "overview" => Synonym("file"),
        "func" | "method" => Synonym("function"),
        "host" => Synonym("external"),
        "prop" => Synonym("property"),
        "var" => Synonym("member"),
        "virtual" => Synonym("abstract"),
        "yield" => Synonym("yields"),

        "alias" => Scalar(self::Scalar::Alias),
        "name" => Scalar(self::Scalar::Name),
        "memberof" => Scalar(self::Scalar::Memberof),
        "lends" => Scalar(self::Scalar::Lends),
        "since" => Scalar(self::Scalar::Since),
        "version" => Scalar(self::Scalar::Version),
        "author" => Scalar(self::Scalar::Author),
        "license" => Scalar(self::Scalar::License),

        "description" => Markdown(MarkdownField::Description),
        "classdesc" => Markdown(MarkdownField::Classdesc),
        "summary" => Markdown(MarkdownField::Summary),
        "copyright" => Markdown(MarkdownField::Copyright),
        "deprecated" => Deprecated,

        "class" => KindShorthand(Kind::Class),
        "constant" => KindShorthand(Kind::Constant),
        "event" => KindShorthand(Kind::Event),
        "external" => KindShorthand(Kind::External),
        "file" => KindShorthand(Kind::File),
        "function" => KindShorthand(Kind::Function),
        "interface" => KindShorthand(Kind::Interface),
        "member" => KindShorthand(Kind::Member),
        "mixin" => KindShorthand(Kind::Mixin),
        "module" => KindShorthand(Kind::Module),
        "namespace" => KindShorthand(Kind::Namespace),
        "typedef" => KindShorthand(Kind::Typedef),
        "callback" => Callback,
        "enum" => Enum,
        "kind" => ExplicitKind,
        "type" => Type,

        "global" => Scope(self::Scope::Global),
        "inner" => Scope(self::Scope::Inner),
        "instance" => Scope(self::Scope::Instance),
        "static" => Scope(self::Scope::Static),

        "public" => Access(self::Access::Public),
        "private" => Access(self::Access::Private),
        "protected" => Access(self::Access::Protected),
        "access" => ExplicitAccess,

        "param" => List(self::List::Params),
        "property" => List(self::List::Properties),
        "returns" => List(self::List::Returns),
        "throws" => List(self::List::Throws),
        "yields" => List(self::List::Yields),
        "augments" => List(self::List::Augments),
        "implements" => List(self::List::Implements),
        "example" => List(self::List::Examples),
        "see" => List(self::List::Sees),
        "todo" => List(self::List::Todos),

        "borrows" | "constructs" | "default" | "exports" | "fires" | "inheritdoc" | "listens"
        | "mixes" | "requires" | "this" | "tutorial" | "variation" => Ignored,

        _ => return None,
    };
    Some(h)
}

/// Follow synonyms to the canonical handler and title.
pub fn resolve(title: &str) -> Option<(&str, Handler)> {
    match handler(title)? {
        Handler::Synonym(canonical) => handler(canonical).map(|h| (canonical, h)),
        h => Some((title, h)),
    }
}

// -- Parameter names ----------------------------------------------------------

static RE_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*([^=\]\s]+)\s*(?:=\s*(.*?))?\s*\]$").unwrap());

/// A parameter name with the optional-parameter brackets parsed out.
#[derive(Debug, PartialEq, Eq)]
pub struct ParamName {
    pub name: String,
    pub optional: bool,
    pub default: Option<String>,
}

/// Parse `name`, `[name]` or `[name=default]`.
pub fn parse_param_name(raw: &str) -> ParamName {
    let raw = raw.trim();
    match RE_BRACKETED.captures(raw) {
        Some(caps) => ParamName {
            name: caps[1].to_string(),
            optional: true,
            default: caps
                .get(2)
                .map(|m| m.as_str().to_string())
                .filter(|d| !d.is_empty()),
        },
        None => ParamName {
            name: raw.to_string(),
            optional: false,
            default: None,
        },
    }
}

/// Split an explicit `@memberof` target into owner and scope:
/// `Foo.prototype` and `Foo#` both name the instance side of `Foo`.
pub fn split_memberof(target: &str) -> (String, Option<Scope>) {
    if let Some(owner) = target.strip_suffix(".prototype") {
        return (owner.to_string(), Some(Scope::Instance));
    }
    if let Some(owner) = target.strip_suffix('#') {
        return (owner.to_string(), Some(Scope::Instance));
    }
    (target.to_string(), None)
}

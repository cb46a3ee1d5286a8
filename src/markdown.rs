//! Rich-text trees for markdown-bearing comment fields.
//!
//! Descriptions are parsed once with `pulldown-cmark` and kept as a small
//! mdast-like tree so renderers never re-parse comment text.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// One node of a rich-text tree. The top of every tree is `Root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root { children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    Heading { depth: u8, children: Vec<Node> },
    Blockquote { children: Vec<Node> },
    List {
        ordered: bool,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        start: Option<u64>,
        children: Vec<Node>,
    },
    ListItem { children: Vec<Node> },
    Emphasis { children: Vec<Node> },
    Strong { children: Vec<Node> },
    Delete { children: Vec<Node> },
    Link {
        url: String,
        #[serde(skip_serializing_if = "String::is_empty", default)]
        title: String,
        children: Vec<Node>,
    },
    Image {
        url: String,
        #[serde(skip_serializing_if = "String::is_empty", default)]
        title: String,
        alt: String,
    },
    Code {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        lang: Option<String>,
        value: String,
    },
    InlineCode { value: String },
    Html { value: String },
    Text { value: String },
    Break,
    ThematicBreak,
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children }
            | Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Blockquote { children }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Delete { children }
            | Node::Link { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content, markup dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text { value } | Node::InlineCode { value } | Node::Code { value, .. } => {
                out.push_str(value)
            }
            Node::Image { alt, .. } => out.push_str(alt),
            Node::Break => out.push('\n'),
            _ => {
                for (i, child) in self.children().iter().enumerate() {
                    if i > 0 && is_block(child) {
                        out.push_str("\n\n");
                    }
                    child.push_text(out);
                }
            }
        }
    }
}

fn is_block(node: &Node) -> bool {
    matches!(
        node,
        Node::Paragraph { .. }
            | Node::Heading { .. }
            | Node::Blockquote { .. }
            | Node::List { .. }
            | Node::Code { .. }
            | Node::ThematicBreak
    )
}

// -- Parsing ------------------------------------------------------------------

/// An element whose children are still being collected.
enum Open {
    Paragraph,
    Heading(u8),
    Blockquote,
    List(Option<u64>),
    Item,
    Emphasis,
    Strong,
    Delete,
    Link { url: String, title: String },
    Image { url: String, title: String },
    CodeBlock(Option<String>),
    HtmlBlock,
    /// Tables, footnotes and other containers: children are spliced into
    /// the parent.
    Transparent,
}

struct Frame {
    open: Open,
    children: Vec<Node>,
    text: String,
}

/// Parse markdown text into a `Root` node.
pub fn parse(text: &str) -> Node {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Vec<Node> = Vec::new();

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(tag) => stack.push(Frame {
                open: open_for(tag),
                children: Vec::new(),
                text: String::new(),
            }),
            Event::End(end) => {
                let Some(frame) = stack.pop() else { continue };
                let parent = match stack.last_mut() {
                    Some(p) => &mut p.children,
                    None => &mut root,
                };
                close(frame, end, parent);
            }
            Event::Text(t) => match stack.last_mut() {
                Some(frame)
                    if matches!(
                        frame.open,
                        Open::CodeBlock(_) | Open::Image { .. } | Open::HtmlBlock
                    ) =>
                {
                    frame.text.push_str(&t)
                }
                Some(frame) => push_text(&mut frame.children, &t),
                None => push_text(&mut root, &t),
            },
            Event::Code(code) => push(&mut stack, &mut root, Node::InlineCode {
                value: code.to_string(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => match stack.last_mut() {
                Some(frame) if matches!(frame.open, Open::HtmlBlock) => frame.text.push_str(&html),
                _ => push(&mut stack, &mut root, Node::Html {
                    value: html.to_string(),
                }),
            },
            Event::SoftBreak => match stack.last_mut() {
                Some(frame) => push_text(&mut frame.children, "\n"),
                None => push_text(&mut root, "\n"),
            },
            Event::HardBreak => push(&mut stack, &mut root, Node::Break),
            Event::Rule => push(&mut stack, &mut root, Node::ThematicBreak),
            _ => {}
        }
    }

    Node::Root { children: root }
}

fn open_for(tag: Tag<'_>) -> Open {
    match tag {
        Tag::Paragraph => Open::Paragraph,
        Tag::Heading { level, .. } => Open::Heading(level as u8),
        Tag::BlockQuote(_) => Open::Blockquote,
        Tag::List(start) => Open::List(start),
        Tag::Item => Open::Item,
        Tag::Emphasis => Open::Emphasis,
        Tag::Strong => Open::Strong,
        Tag::Strikethrough => Open::Delete,
        Tag::Link {
            dest_url, title, ..
        } => Open::Link {
            url: dest_url.to_string(),
            title: title.to_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => Open::Image {
            url: dest_url.to_string(),
            title: title.to_string(),
        },
        Tag::CodeBlock(kind) => Open::CodeBlock(match kind {
            CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
            _ => None,
        }),
        Tag::HtmlBlock => Open::HtmlBlock,
        _ => Open::Transparent,
    }
}

fn close(frame: Frame, _end: TagEnd, parent: &mut Vec<Node>) {
    let Frame {
        open,
        children,
        text,
    } = frame;
    let node = match open {
        Open::Paragraph => Node::Paragraph { children },
        Open::Heading(depth) => Node::Heading { depth, children },
        Open::Blockquote => Node::Blockquote { children },
        Open::List(start) => Node::List {
            ordered: start.is_some(),
            start,
            children,
        },
        Open::Item => Node::ListItem { children },
        Open::Emphasis => Node::Emphasis { children },
        Open::Strong => Node::Strong { children },
        Open::Delete => Node::Delete { children },
        Open::Link { url, title } => Node::Link {
            url,
            title,
            children,
        },
        Open::Image { url, title } => Node::Image {
            url,
            title,
            alt: text,
        },
        Open::CodeBlock(lang) => Node::Code {
            lang,
            value: text.strip_suffix('\n').unwrap_or(&text).to_string(),
        },
        Open::HtmlBlock => Node::Html { value: text },
        Open::Transparent => {
            parent.extend(children);
            return;
        }
    };
    parent.push(node);
}

fn push(stack: &mut [Frame], root: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(frame) => frame.children.push(node),
        None => root.push(node),
    }
}

/// Append text, merging with a preceding text node.
fn push_text(children: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text { value }) = children.last_mut() {
        value.push_str(text);
    } else {
        children.push(Node::Text {
            value: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(v: &str) -> Node {
        Node::Text { value: v.into() }
    }

    #[test]
    fn paragraph_with_emphasis() {
        let tree = parse("Hello *world*");
        assert_eq!(
            tree,
            Node::Root {
                children: vec![Node::Paragraph {
                    children: vec![
                        text("Hello "),
                        Node::Emphasis {
                            children: vec![text("world")]
                        }
                    ]
                }]
            }
        );
    }

    #[test]
    fn fenced_code_keeps_language() {
        let tree = parse("```js\nfoo(1);\n```");
        assert_eq!(
            tree.children(),
            &[Node::Code {
                lang: Some("js".into()),
                value: "foo(1);".into()
            }]
        );
    }

    #[test]
    fn soft_breaks_join_text() {
        let tree = parse("one\ntwo");
        assert_eq!(
            tree.children(),
            &[Node::Paragraph {
                children: vec![text("one\ntwo")]
            }]
        );
    }

    #[test]
    fn link_and_inline_code() {
        let tree = parse("see [docs](http://x.y) and `code`");
        let para = &tree.children()[0];
        assert_eq!(
            para.children()[1],
            Node::Link {
                url: "http://x.y".into(),
                title: String::new(),
                children: vec![text("docs")]
            }
        );
        assert_eq!(para.children()[3], Node::InlineCode { value: "code".into() });
    }

    #[test]
    fn plain_text_separates_blocks() {
        let tree = parse("First **bold**.\n\nSecond.");
        assert_eq!(tree.plain_text(), "First bold.\n\nSecond.");
    }

    #[test]
    fn empty_input_is_empty_root() {
        assert_eq!(parse(""), Node::Root { children: vec![] });
    }

    #[test]
    fn serializes_mdast_shape() {
        let value = serde_json::to_value(parse("hi")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "root",
                "children": [{ "type": "paragraph", "children": [{ "type": "text", "value": "hi" }] }]
            })
        );
    }
}

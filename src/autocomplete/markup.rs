//! A small HTML-like markup tree for item templates.
//!
//! Templates such as `<strong>{{text}}</strong>` are parsed into [`Node`]
//! trees so the highlighter can work on text without touching structure and
//! the view can map elements onto terminal styles. The parser is lenient:
//! unclosed elements are closed at the end of input, stray closing tags are
//! dropped and a `<` that does not start a tag is kept as text.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<(/?)([A-Za-z][A-Za-z0-9-]*)((?:\s+[^<>]*?)?)\s*(/?)>").expect("tag pattern")
});

static ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][A-Za-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern")
});

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// A node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text with entities decoded.
    Text(String),
    /// An element and its children.
    Element(Element),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Lowercased tag name.
    pub tag: String,
    /// Class names from the `class` attribute.
    pub classes: Vec<String>,
    /// Remaining attributes in source order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element without attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Adds every whitespace-separated class in `class`.
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// True if every class in `class` is present.
    pub fn has_class(&self, class: &str) -> bool {
        let mut wanted = class.split_whitespace().peekable();
        wanted.peek().is_some() && wanted.all(|c| self.classes.iter().any(|own| own == c))
    }

    /// Value of an attribute other than `class`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Node {
    /// Concatenated text of the node and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// Concatenated text of a node list.
pub fn text_of(nodes: &[Node]) -> String {
    nodes.iter().map(Node::text).collect()
}

/// Parses template markup into a node list.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::markup::{parse, text_of, Node};
///
/// let nodes = parse("<strong>Jon</strong> &amp; co");
/// assert_eq!(text_of(&nodes), "Jon & co");
/// assert!(matches!(&nodes[0], Node::Element(el) if el.tag == "strong"));
/// ```
pub fn parse(input: &str) -> Vec<Node> {
    // Open elements; index 0 collects the top level.
    let mut stack: Vec<Element> = vec![Element::default()];
    let mut text = String::new();
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        rest = &rest[lt..];

        let Some(caps) = TAG.captures(rest) else {
            text.push('<');
            rest = &rest[1..];
            continue;
        };

        flush_text(&mut stack, &mut text);
        let whole = caps.get(0).map_or(1, |m| m.end());
        let closing = !caps[1].is_empty();
        let tag = caps[2].to_ascii_lowercase();
        let self_closing = !caps[4].is_empty() || VOID_ELEMENTS.contains(&tag.as_str());

        if closing {
            if let Some(pos) = stack.iter().skip(1).rposition(|el| el.tag == tag) {
                // Close everything opened after the matching element.
                while stack.len() > pos + 1 {
                    close_top(&mut stack);
                }
            }
        } else {
            let el = parse_attrs(Element::new(tag), &caps[3]);
            if self_closing {
                push_child(&mut stack, Node::Element(el));
            } else {
                stack.push(el);
            }
        }
        rest = &rest[whole..];
    }

    text.push_str(rest);
    flush_text(&mut stack, &mut text);
    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack.pop().map(|root| root.children).unwrap_or_default()
}

fn parse_attrs(mut el: Element, raw: &str) -> Element {
    for caps in ATTR.captures_iter(raw) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or(String::new(), |m| decode_entities(m.as_str()));
        if name == "class" {
            el = el.with_class(&value);
        } else {
            el.attrs.push((name, value));
        }
    }
    el
}

fn push_child(stack: &mut [Element], node: Node) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

fn close_top(stack: &mut Vec<Element>) {
    if let Some(el) = stack.pop() {
        push_child(stack, Node::Element(el));
    }
}

fn flush_text(stack: &mut [Element], text: &mut String) {
    if !text.is_empty() {
        let decoded = decode_entities(text);
        push_child(stack, Node::Text(decoded));
        text.clear();
    }
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

//! Search-term highlighting inside rendered rows.

use super::markup::{Element, Node};
use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Tag used for highlight spans.
pub const HIGHLIGHT_TAG: &str = "span";

const OPAQUE_TAGS: &[&str] = &["script", "style"];

/// Builds the case-insensitive pattern matching any word of `search_term`.
///
/// Returns `Ok(None)` when the term has no words.
pub fn pattern(search_term: &str) -> Result<Option<Regex>> {
    let words: Vec<String> = search_term
        .split_whitespace()
        .map(regex::escape)
        .collect();
    if words.is_empty() {
        return Ok(None);
    }

    let re = RegexBuilder::new(&format!("({})", words.join("|")))
        .case_insensitive(true)
        .build()?;
    Ok(Some(re))
}

/// Returns a copy of `nodes` with every match of a search-term word wrapped
/// in a `<span class="{class}">`.
///
/// Structure is preserved: only text nodes are split. Script and style
/// elements and existing highlight spans of the same class are left alone,
/// so highlighting already-highlighted output changes nothing.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::highlight::highlight;
/// use bubbletea_autocomplete::autocomplete::markup::{parse, text_of};
///
/// let rows = parse("<strong>Jon Bon Jovi</strong>");
/// let once = highlight(&rows, " jo ", "hl").unwrap();
/// let twice = highlight(&once, "jo", "hl").unwrap();
/// assert_eq!(once, twice);
/// assert_eq!(text_of(&once), "Jon Bon Jovi");
/// ```
pub fn highlight(nodes: &[Node], search_term: &str, class: &str) -> Result<Vec<Node>> {
    Ok(match pattern(search_term)? {
        Some(re) => nodes.iter().flat_map(|n| walk(n, &re, class)).collect(),
        None => nodes.to_vec(),
    })
}

fn walk(node: &Node, re: &Regex, class: &str) -> Vec<Node> {
    match node {
        Node::Text(text) => split_text(text, re, class),
        Node::Element(el) if is_opaque(el, class) => vec![node.clone()],
        Node::Element(el) => vec![Node::Element(Element {
            tag: el.tag.clone(),
            classes: el.classes.clone(),
            attrs: el.attrs.clone(),
            children: el.children.iter().flat_map(|c| walk(c, re, class)).collect(),
        })],
    }
}

fn is_opaque(el: &Element, class: &str) -> bool {
    OPAQUE_TAGS.contains(&el.tag.as_str()) || (el.tag == HIGHLIGHT_TAG && el.has_class(class))
}

fn split_text(text: &str, re: &Regex, class: &str) -> Vec<Node> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        if m.start() > last {
            out.push(Node::Text(text[last..m.start()].to_string()));
        }
        out.push(Node::Element(
            Element::new(HIGHLIGHT_TAG)
                .with_class(class)
                .with_child(Node::Text(m.as_str().to_string())),
        ));
        last = m.end();
    }
    if last < text.len() {
        out.push(Node::Text(text[last..].to_string()));
    }
    if out.is_empty() {
        out.push(Node::Text(text.to_string()));
    }
    out
}

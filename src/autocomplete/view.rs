//! Terminal rendering of the autocomplete.

use super::config::Classes;
use super::markup::{Element, Node};
use super::model::Model;
use super::render::RenderNode;
use crate::anchor::Anchor;
use lipgloss_extras::prelude::*;
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// Styles of the result list.
///
/// Row styles apply to whole rows. Element styles apply to the markup inside
/// a row and inherit from the row style, so a bold match inside a highlighted
/// row keeps the highlight.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Every row.
    pub item: Style,
    /// The highlighted row.
    pub highlighted: Style,
    /// Rows that cannot be selected.
    pub disabled: Style,
    /// The "no results" row.
    pub empty: Style,
    /// Search-term matches.
    pub search_term: Style,
    /// `<strong>` and `<b>`.
    pub strong: Style,
    /// `<em>` and `<i>`.
    pub em: Style,
    /// `<u>`.
    pub underline: Style,
    /// The loading indicator.
    pub loading: Style,
    /// Text of the loading indicator.
    pub loading_text: String,
    /// Marker in front of the highlighted row.
    pub marker: String,
    /// Styles for elements carrying a given class, e.g. classes used in
    /// custom item templates.
    pub classes: HashMap<String, Style>,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            item: Style::new(),
            highlighted: Style::new().reverse(true),
            disabled: Style::new().faint(true),
            empty: Style::new().faint(true).italic(true),
            search_term: Style::new().underline(true).foreground(Color::from("212")),
            strong: Style::new().bold(true),
            em: Style::new().italic(true),
            underline: Style::new().underline(true),
            loading: Style::new().foreground(Color::from("240")),
            loading_text: "searching…".to_string(),
            marker: "> ".to_string(),
            classes: HashMap::new(),
        }
    }
}

impl Styles {
    fn row(&self, node: &RenderNode) -> Style {
        if node.is_empty() {
            self.empty.clone().inherit(self.item.clone())
        } else if node.is_disabled() {
            self.disabled.clone().inherit(self.item.clone())
        } else if node.is_highlighted() {
            self.highlighted.clone().inherit(self.item.clone())
        } else {
            self.item.clone()
        }
    }

    fn element(&self, el: &Element, classes: &Classes) -> Option<&Style> {
        if el.tag == "span" && el.has_class(&classes.search_term) {
            return Some(&self.search_term);
        }
        if let Some(style) = el.classes.iter().find_map(|c| self.classes.get(c)) {
            return Some(style);
        }
        match el.tag.as_str() {
            "strong" | "b" => Some(&self.strong),
            "em" | "i" => Some(&self.em),
            "u" => Some(&self.underline),
            _ => None,
        }
    }
}

/// Elements whose content is never shown.
const HIDDEN_TAGS: &[&str] = &["script", "style"];

fn visible_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(&t.replace('\n', " ")),
            Node::Element(el) if HIDDEN_TAGS.contains(&el.tag.as_str()) => {}
            Node::Element(el) => out.push_str(&visible_text(&el.children)),
        }
    }
    out
}

fn render_nodes(nodes: &[Node], style: &Style, styles: &Styles, classes: &Classes) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(t) if t.is_empty() => {}
            Node::Text(t) => out.push_str(&style.render(&t.replace('\n', " "))),
            Node::Element(el) if HIDDEN_TAGS.contains(&el.tag.as_str()) => {}
            Node::Element(el) => {
                let inner = match styles.element(el, classes) {
                    Some(own) => own.clone().inherit(style.clone()).inline(true),
                    None => style.clone(),
                };
                out.push_str(&render_nodes(&el.children, &inner, styles, classes));
            }
        }
    }
    out
}

impl<A: Anchor> Model<A> {
    /// Renders the result rows, one string per row, padded to a common
    /// width.
    pub fn view_rows(&self) -> Vec<String> {
        let widths: Vec<usize> = self
            .rendered
            .iter()
            .map(|node| visible_text(&node.children).width())
            .collect();
        let max_width = widths.iter().copied().max().unwrap_or(0);
        let blank_marker = " ".repeat(self.styles.marker.width());

        self.rendered
            .iter()
            .zip(widths)
            .map(|(node, width)| {
                let row = self.styles.row(node).inline(true);
                let marker = if node.is_highlighted() {
                    &self.styles.marker
                } else {
                    &blank_marker
                };

                let mut line = row.render(marker);
                line.push_str(&render_nodes(&node.children, &row, &self.styles, &self.classes));
                if width < max_width {
                    line.push_str(&row.render(&" ".repeat(max_width - width)));
                }
                line
            })
            .collect()
    }

    /// Renders the anchor, the loading indicator while a search is in
    /// flight, and the result list while it is displayed.
    pub fn view(&self) -> String {
        let mut out = self.anchor.view();
        if self.loading {
            out.push(' ');
            out.push_str(&self.styles.loading.render(&self.styles.loading_text));
        }
        if self.are_results_displayed && !self.rendered.is_empty() {
            for row in self.view_rows() {
                out.push('\n');
                out.push_str(&row);
            }
        }
        out
    }
}

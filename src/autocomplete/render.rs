//! Rendering result items through templates.

use super::config::{Classes, Templates};
use super::item::ResultItem;
use super::markup::{self, Node};

/// One rendered row of the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    /// Parsed item markup.
    pub children: Vec<Node>,
    /// The value template rendered for this item. Written into the input by
    /// the default selection handler.
    pub value: String,
    /// The item this row was rendered from; `None` for the empty row.
    pub item: Option<ResultItem>,
    disabled: bool,
    empty: bool,
    highlighted: bool,
}

impl RenderNode {
    /// Whether the row can be highlighted or selected.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether this is the "no results" row.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Whether this row carries the highlight.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Plain text of the row.
    pub fn text(&self) -> String {
        markup::text_of(&self.children)
    }

    /// The class list of the row's container, as the host would style it.
    pub fn class_list(&self, classes: &Classes) -> Vec<String> {
        let mut list = vec![classes.item.clone()];
        if self.empty {
            list.push(classes.empty.clone());
        }
        if self.disabled {
            list.push(classes.disabled.clone());
        }
        if self.highlighted {
            list.push(classes.highlighted.clone());
        }
        list
    }
}

/// Renders result items into list rows.
///
/// With no items and an empty template, the result is a single disabled
/// "empty" row built from that template without substitution. Otherwise each
/// item becomes one row; every `{{field}}` occurrence is replaced by the
/// item's field, and placeholders with no matching field are left as they are.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::{render, ResultItem, Templates};
///
/// let templates = Templates::default();
/// let rows = render(&[ResultItem::new("Jovi")], &templates);
/// assert_eq!(rows[0].text(), "Jovi");
/// assert_eq!(rows[0].value, "Jovi");
/// ```
pub fn render(items: &[ResultItem], templates: &Templates) -> Vec<RenderNode> {
    if items.is_empty() {
        return match templates.empty_template() {
            Some(empty) => vec![RenderNode {
                children: markup::parse(empty),
                value: String::new(),
                item: None,
                disabled: true,
                empty: true,
                highlighted: false,
            }],
            None => Vec::new(),
        };
    }

    let value_template = templates.value.as_deref().unwrap_or(&templates.item);
    items
        .iter()
        .map(|item| RenderNode {
            children: markup::parse(&substitute(&templates.item, item)),
            value: markup::text_of(&markup::parse(&substitute(value_template, item))),
            item: Some(item.clone()),
            disabled: item.is_disabled(),
            empty: false,
            highlighted: false,
        })
        .collect()
}

/// Replaces every `{{name}}` with the item's field of that name.
pub fn substitute(template: &str, item: &ResultItem) -> String {
    item.fields()
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{{{name}}}}}"), &value)
        })
}

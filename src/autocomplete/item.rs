//! Result items returned by a data source.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single search result: a set of named fields.
///
/// Every field can be referenced from a template as `{{name}}`. The `text`
/// field is conventional; `disabled: true` renders the item as not
/// selectable.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::ResultItem;
///
/// let item = ResultItem::new("Jon").with_field("city", "Sayreville");
/// assert_eq!(item.field("text").as_deref(), Some("Jon"));
/// assert_eq!(item.field("city").as_deref(), Some("Sayreville"));
/// assert!(!item.is_disabled());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultItem {
    fields: Map<String, Value>,
}

impl ResultItem {
    /// Creates an item with a `text` field.
    pub fn new(text: impl Into<String>) -> Self {
        Self::default().with_field("text", text.into())
    }

    /// Creates an item from an already built field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Adds or replaces a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Marks the item disabled.
    pub fn disabled(self) -> Self {
        self.with_field("disabled", true)
    }

    /// True only when the `disabled` field is the boolean `true`.
    pub fn is_disabled(&self) -> bool {
        matches!(self.fields.get("disabled"), Some(Value::Bool(true)))
    }

    /// The `text` field, or an empty string.
    pub fn text(&self) -> String {
        self.field("text").unwrap_or_default()
    }

    /// A field rendered as template text. Strings are returned verbatim,
    /// other JSON values in their JSON form.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(value_to_text)
    }

    /// All fields in template substitution order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, String)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), value_to_text(v)))
    }
}

impl From<&str> for ResultItem {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ResultItem {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Configuration of the autocomplete component.
//!
//! Plain options live in [`Options`], which deserializes from JSON with every
//! field optional and unknown keys ignored. The data source and the selection
//! callback are attached through [`Config`].

use super::render::RenderNode;
use super::source::{self, Source};
use crate::anchor::Anchor;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Callback invoked with the selected row. It receives the anchor so it can
/// write the chosen value.
pub type OnItemFunc = Box<dyn FnMut(&RenderNode, &mut dyn Anchor) + Send>;

/// Hook invoked right before results are shown.
pub type OnBeforeShowFunc = Box<dyn FnMut() + Send>;

/// Template strings used to render results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    /// Markup of one result row, with `{{field}}` placeholders.
    pub item: String,
    /// Text written into the input when a row is selected. Falls back to
    /// `item` when absent.
    pub value: Option<String>,
    /// Markup shown when a search returns nothing. No row is shown when
    /// absent.
    pub empty: Option<String>,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            item: "<strong>{{text}}</strong>".to_string(),
            value: Some("{{text}}".to_string()),
            empty: Some("No matches found".to_string()),
        }
    }
}

impl Templates {
    /// The empty template, treating an empty string as absent.
    pub fn empty_template(&self) -> Option<&str> {
        self.empty.as_deref().filter(|e| !e.is_empty())
    }
}

/// Class names attached to the parts of the component.
///
/// The terminal view keys its styles off these names; extra classes added
/// through [`Options::extra_classes`] let hosts register their own styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classes {
    /// The component as a whole.
    pub wrapper: String,
    /// The text input.
    pub input: String,
    /// The results panel.
    pub results: String,
    /// The list inside the results panel.
    pub list: String,
    /// Every result row.
    pub item: String,
    /// The highlighted row.
    pub highlighted: String,
    /// Rows that cannot be selected.
    pub disabled: String,
    /// The "no results" row.
    pub empty: String,
    /// Spans wrapping search-term matches.
    pub search_term: String,
    /// Set on the wrapper while a search is in flight.
    pub loading: String,
    /// Set on the wrapper while results are shown.
    pub visible: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            wrapper: "autocomplete".to_string(),
            input: "autocomplete__input".to_string(),
            results: "autocomplete__results".to_string(),
            list: "autocomplete__list".to_string(),
            item: "autocomplete__list__item".to_string(),
            highlighted: "autocomplete__list__item--highlighted".to_string(),
            disabled: "autocomplete__list__item--disabled".to_string(),
            empty: "autocomplete__list__item--empty".to_string(),
            search_term: "autocomplete__list__item__search-term".to_string(),
            loading: "is-loading".to_string(),
            visible: "is-visible".to_string(),
        }
    }
}

impl Classes {
    /// Appends extra classes keyed by part name (`"wrapper"`, `"item"`,
    /// `"search_term"` or `"searchTerm"`, ...). Unknown part names are ignored.
    pub fn extended(mut self, extra: &BTreeMap<String, String>) -> Self {
        for (part, class) in extra {
            let slot = match part.as_str() {
                "wrapper" => &mut self.wrapper,
                "input" => &mut self.input,
                "results" => &mut self.results,
                "list" => &mut self.list,
                "item" => &mut self.item,
                "highlighted" => &mut self.highlighted,
                "disabled" => &mut self.disabled,
                "empty" => &mut self.empty,
                "search_term" | "searchTerm" => &mut self.search_term,
                "loading" => &mut self.loading,
                "visible" => &mut self.visible,
                _ => continue,
            };
            if !class.trim().is_empty() {
                slot.push(' ');
                slot.push_str(class.trim());
            }
        }
        self
    }
}

/// Plain configuration values.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::Options;
///
/// let opts = Options::from_json(r#"{"threshold": 0, "limit": 3, "colour": "red"}"#).unwrap();
/// assert_eq!(opts.threshold, 1); // coerced
/// assert_eq!(opts.limit, 3);
/// assert_eq!(opts.debounce_time, 200); // default
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Minimum search-term length (in characters) that triggers a search.
    /// Values below 1 are raised to 1.
    pub threshold: i32,
    /// Maximum number of results kept from a search; 0 or less keeps all.
    pub limit: i32,
    /// Require the committed value to be a chosen result.
    #[serde(alias = "forceSelection")]
    pub force_selection: bool,
    /// Quiet period in milliseconds before a search is dispatched; 0
    /// searches synchronously.
    #[serde(alias = "debounceTime")]
    pub debounce_time: u64,
    /// Only search the word under the cursor, and only if it starts with
    /// this character.
    #[serde(alias = "triggerChar")]
    pub trigger_char: Option<char>,
    /// Result templates.
    pub templates: Templates,
    /// Extra class names per component part.
    #[serde(alias = "extraClasses")]
    pub extra_classes: BTreeMap<String, String>,
    /// Wrap occurrences of the search term in highlight spans.
    #[serde(alias = "searchTermHighlight")]
    pub search_term_highlight: bool,
    /// Let left/right move through results once one is highlighted.
    #[serde(alias = "useHorizontalNavKeys")]
    pub use_horizontal_nav_keys: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: 2,
            limit: 5,
            force_selection: false,
            debounce_time: 200,
            trigger_char: None,
            templates: Templates::default(),
            extra_classes: BTreeMap::new(),
            search_term_highlight: true,
            use_horizontal_nav_keys: false,
        }
    }
}

impl Options {
    /// Parses options from JSON and normalizes them.
    pub fn from_json(json: &str) -> Result<Self> {
        let opts: Options = serde_json::from_str(json)?;
        Ok(opts.normalized())
    }

    /// Applies the coercions: threshold of at least 1 and a value template
    /// that falls back to the item template.
    pub fn normalized(mut self) -> Self {
        if self.threshold < 1 {
            self.threshold = 1;
        }
        if self.templates.value.as_deref().map_or(true, str::is_empty) {
            self.templates.value = Some(self.templates.item.clone());
        }
        self
    }

    /// The limit as a count, `None` meaning unlimited.
    pub fn result_limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit as usize)
    }

    /// The debounce period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_time)
    }

    /// Whether searches run without a quiet period.
    pub fn is_synchronous(&self) -> bool {
        self.debounce_time == 0
    }
}

/// Options plus the collaborators the component calls out to.
pub struct Config {
    pub(crate) options: Options,
    pub(crate) source: Box<dyn Source>,
    pub(crate) on_item: OnItemFunc,
    pub(crate) on_before_show: Option<OnBeforeShowFunc>,
}

impl Config {
    /// Creates a configuration with the demo source and the default
    /// selection handler.
    pub fn new(options: Options) -> Self {
        Self {
            options: options.normalized(),
            source: Box::new(source::demo()),
            on_item: default_on_item(),
            on_before_show: None,
        }
    }

    /// Sets the data source.
    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Sets the selection callback.
    pub fn with_on_item<F>(mut self, on_item: F) -> Self
    where
        F: FnMut(&RenderNode, &mut dyn Anchor) + Send + 'static,
    {
        self.on_item = Box::new(on_item);
        self
    }

    /// Sets a hook called right before results are shown.
    pub fn with_on_before_show<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_before_show = Some(Box::new(hook));
        self
    }

    /// The normalized options.
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("options", &self.options)
            .field("on_before_show", &self.on_before_show.is_some())
            .finish_non_exhaustive()
    }
}

/// The default selection handler: writes the row's value into the input.
pub fn default_on_item() -> OnItemFunc {
    Box::new(|node: &RenderNode, anchor: &mut dyn Anchor| {
        anchor.set_value(&node.value);
    })
}

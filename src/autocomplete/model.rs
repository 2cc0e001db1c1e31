//! The autocomplete model and its constructors.

use super::config::{Classes, Config};
use super::debounce::{self, Debouncer};
use super::item::ResultItem;
use super::keymap::{default_key_map, KeyMap};
use super::render::RenderNode;
use super::view::Styles;
use crate::anchor::{Anchor, Field};
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};

/// An autocomplete attached to a text input.
///
/// The model owns the anchor. Feed every message through
/// [`Model::update`]: key messages are handed to the anchor for editing and
/// then turned into searches, and the component's own debounce, fetch and
/// pointer messages drive the result list.
///
/// ```rust
/// use bubbletea_autocomplete::anchor::{Anchor, Field};
/// use bubbletea_autocomplete::autocomplete::{Config, Model, Options};
/// use bubbletea_autocomplete::Component;
///
/// let options = Options { debounce_time: 0, ..Options::default() };
/// let mut ac = Model::new(Field::new(), Config::new(options));
/// ac.focus();
///
/// let _ = ac.process_input("jo", 2);
/// assert!(ac.are_results_displayed());
/// assert_eq!(ac.results().len(), 2); // "Jon" and "Jovi"
/// ```
pub struct Model<A: Anchor = Field> {
    pub(crate) id: u64,
    pub(crate) anchor: A,
    pub(crate) config: Config,
    pub(crate) classes: Classes,
    /// Styles used by [`Model::view`].
    pub styles: Styles,
    /// Keys handled while results are shown.
    pub key_map: KeyMap,
    pub(crate) search_term: String,
    pub(crate) results: Vec<ResultItem>,
    pub(crate) rendered: Vec<RenderNode>,
    pub(crate) result_index: Option<usize>,
    pub(crate) is_result_selected: bool,
    pub(crate) are_results_displayed: bool,
    pub(crate) loading: bool,
    pub(crate) debouncer: Debouncer,
    pub(crate) request: u64,
    pub(crate) has_touch_moved: bool,
}

impl<A: Anchor> Model<A> {
    /// Attaches an autocomplete to `anchor`.
    pub fn new(anchor: A, config: Config) -> Self {
        let id = debounce::next_id();
        let classes = Classes::default().extended(&config.options.extra_classes);
        let debouncer = Debouncer::new(id, config.options.debounce());
        Self {
            id,
            anchor,
            config,
            classes,
            styles: Styles::default(),
            key_map: default_key_map(),
            search_term: String::new(),
            results: Vec::new(),
            rendered: Vec::new(),
            result_index: None,
            is_result_selected: false,
            are_results_displayed: false,
            loading: false,
            debouncer,
            request: 0,
            has_touch_moved: false,
        }
    }

    /// Unique id of this component; carried by its messages.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The input the component is attached to.
    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    /// Mutable access to the input. Call [`Model::handle_typing`] after
    /// editing it directly so the search term follows.
    pub fn anchor_mut(&mut self) -> &mut A {
        &mut self.anchor
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Class names of the component parts, extra classes included.
    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    /// The current search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Results of the latest completed search, after the limit.
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// The rendered rows.
    pub fn rendered(&self) -> &[RenderNode] {
        &self.rendered
    }

    /// Index of the highlighted result, if any.
    pub fn result_index(&self) -> Option<usize> {
        self.result_index
    }

    /// Whether the last action committed a result.
    pub fn is_result_selected(&self) -> bool {
        self.is_result_selected
    }

    /// Whether the result list is shown.
    pub fn are_results_displayed(&self) -> bool {
        self.are_results_displayed
    }

    /// Whether a search is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Class list of the wrapper: the wrapper classes plus the loading and
    /// visible state classes when they apply.
    pub fn wrapper_class_list(&self) -> Vec<String> {
        let mut list = vec![self.classes.wrapper.clone()];
        if self.loading {
            list.push(self.classes.loading.clone());
        }
        if self.are_results_displayed {
            list.push(self.classes.visible.clone());
        }
        list
    }
}

impl<A: Anchor + Default + 'static> BubbleTeaModel for Model<A> {
    fn init() -> (Self, Option<Cmd>) {
        (Model::new(A::default(), Config::default()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}

impl<A: Anchor + std::fmt::Debug> std::fmt::Debug for Model<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("anchor", &self.anchor)
            .field("config", &self.config)
            .field("search_term", &self.search_term)
            .field("results", &self.results)
            .field("result_index", &self.result_index)
            .field("is_result_selected", &self.is_result_selected)
            .field("are_results_displayed", &self.are_results_displayed)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

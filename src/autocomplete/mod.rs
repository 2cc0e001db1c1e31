//! Autocomplete component for Bubble Tea applications.
//!
//! The component sits on top of a text input (an [`Anchor`](crate::anchor::Anchor))
//! and turns what the user types into a navigable list of suggestions:
//!
//! 1. every edit re-derives the search term, either the whole value or,
//!    with a trigger character, the word under the cursor;
//! 2. a term of at least `threshold` characters is searched after the
//!    debounce period, a shorter one clears the list;
//! 3. the [`Source`] completes the search through its [`Done`] handle;
//! 4. results are rendered through the item template, search-term matches
//!    are highlighted, and the list is shown while the input has focus;
//! 5. arrow keys move the highlight (skipping disabled rows), enter or tab
//!    selects, esc dismisses.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_autocomplete::anchor::Field;
//! use bubbletea_autocomplete::autocomplete::{source, Config, Model, Options};
//!
//! let options = Options::from_json(r#"{"threshold": 1, "limit": 3}"#).unwrap();
//! let config = Config::new(options)
//!     .with_source(source::fuzzy(["Bonn", "Boston", "Brno", "Berlin"]));
//! let autocomplete = Model::new(Field::new(), config);
//! assert!(!autocomplete.are_results_displayed());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::{Config, Model, Options};
//! use bubbletea_autocomplete::anchor::Field;
//! use bubbletea_autocomplete::Component;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     search: Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut search = Model::new(Field::new(), Config::new(Options::default()));
//!         let cmd = search.focus();
//!         (Self { search }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.search.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.search.view()
//!     }
//! }
//! ```

pub mod config;
pub mod debounce;
pub mod highlight;
pub mod item;
pub mod keymap;
pub mod markup;
pub mod methods;
pub mod model;
pub mod render;
pub mod source;
pub mod trigger;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use config::{default_on_item, Classes, Config, OnBeforeShowFunc, OnItemFunc, Options, Templates};
pub use debounce::Debouncer;
pub use item::ResultItem;
pub use keymap::{default_key_map, KeyMap};
pub use model::Model;
pub use render::{render, RenderNode};
pub use source::{Done, Matching, Source, StaticSource};
pub use trigger::extract;
pub use types::{DebounceMsg, Direction, FetchDoneMsg, PointerKind, PointerMsg};
pub use view::Styles;

#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-autocomplete/")]

//! # bubbletea-autocomplete
//!
//! An autocomplete component for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The component attaches to a text input and shows live suggestions while
//! the user types. It follows the Elm Architecture: feed messages to
//! `update()`, return the commands it gives back to the runtime, and draw
//! `view()`.
//!
//! ## Features
//!
//! - **Debounced searches** against any data source, synchronous or not
//! - **Trigger characters** to complete a single `@mention`-style word
//! - **Templates** with `{{field}}` placeholders and light markup
//! - **Search-term highlighting** inside the rendered results
//! - **Keyboard, mouse and touch navigation** that skips disabled results
//! - **Forced selection** that only lets chosen values stick
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_autocomplete::prelude::*;
//!
//! let options = Options { debounce_time: 0, ..Options::default() };
//! let config = Config::new(options).with_source(source::substring(["Jon", "Jovi", "Richie"]));
//! let mut autocomplete = Autocomplete::new(Field::new(), config);
//! autocomplete.focus();
//!
//! let _ = autocomplete.process_input("jo", 2);
//! assert_eq!(autocomplete.results().len(), 2);
//! ```
//!
//! ## Focus Management
//!
//! The component implements [`Component`]: focusing it searches whatever
//! the input already holds, blurring it hides the results and, with forced
//! selection, reverts input that was not picked from the list.
//!
//! ```rust
//! use bubbletea_autocomplete::prelude::*;
//!
//! fn toggle<T: Component>(component: &mut T) {
//!     let _ = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut autocomplete = Autocomplete::new(Field::new(), Config::default());
//! toggle(&mut autocomplete);
//! ```

pub mod anchor;
pub mod autocomplete;
pub mod error;
pub mod key;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// - `focus()` sets the focused state and may return a command, e.g. a
///   search for text already in the input
/// - `blur()` unsets it and cleans up focus-related state
/// - `focused()` reports the current state
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use anchor::{Anchor, Field};
pub use autocomplete::Model as Autocomplete;
pub use autocomplete::{
    Config, Direction, Done, Options, PointerKind, PointerMsg, RenderNode, ResultItem, Source,
    Templates,
};
pub use error::{Error, Result};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
///
/// let autocomplete = Autocomplete::new(Field::new(), Config::default());
/// assert!(!autocomplete.focused());
/// ```
pub mod prelude {
    pub use crate::anchor::{Anchor, Field};
    pub use crate::autocomplete::source;
    pub use crate::autocomplete::{
        Config, Direction, Done, Options, PointerKind, PointerMsg, RenderNode, ResultItem,
        Source, Styles, Templates,
    };
    pub use crate::autocomplete::Model as Autocomplete;
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::Component;
}

//! Key bindings for the autocomplete component.

use crate::key::{self, new_binding, with_help, with_keys_str, Binding};

/// Keys the component reacts to while results are shown.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Highlight the previous result.
    pub prev: Binding,
    /// Highlight the next result.
    pub next: Binding,
    /// Previous result, once one is highlighted and horizontal keys are on.
    pub prev_horizontal: Binding,
    /// Next result, once one is highlighted and horizontal keys are on.
    pub next_horizontal: Binding,
    /// Select the highlighted result.
    pub accept: Binding,
    /// Dismiss the results.
    pub dismiss: Binding,
}

/// The default bindings: arrows to move, enter or tab to accept, esc to
/// dismiss.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        prev: new_binding(vec![with_keys_str(&["up"]), with_help("↑", "previous")]),
        next: new_binding(vec![with_keys_str(&["down"]), with_help("↓", "next")]),
        prev_horizontal: new_binding(vec![with_keys_str(&["left"]), with_help("←", "previous")]),
        next_horizontal: new_binding(vec![with_keys_str(&["right"]), with_help("→", "next")]),
        accept: new_binding(vec![
            with_keys_str(&["enter", "tab"]),
            with_help("enter/tab", "select"),
        ]),
        dismiss: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "dismiss")]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev, &self.next, &self.accept, &self.dismiss]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.prev, &self.next],
            vec![&self.prev_horizontal, &self.next_horizontal],
            vec![&self.accept, &self.dismiss],
        ]
    }
}

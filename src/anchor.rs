//! The text input an autocomplete is attached to.
//!
//! The autocomplete component never edits text on its own account. It reads
//! the current value and cursor from an [`Anchor`], writes the value back on
//! selection or forced reverts, and asks whether the anchor has focus before
//! showing results. Any input widget can act as an anchor by implementing the
//! trait; [`Field`] is a small built-in one that handles single-line and
//! multi-line editing.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

/// Interface the autocomplete needs from its text input.
///
/// Cursor positions are character offsets into [`Anchor::value`].
pub trait Anchor: Send {
    /// Current text value.
    fn value(&self) -> String;

    /// Replaces the text value and moves the cursor to its end.
    fn set_value(&mut self, value: &str);

    /// Cursor offset in characters.
    fn position(&self) -> usize;

    /// Moves the cursor, clamped to the value length.
    fn set_cursor(&mut self, pos: usize);

    /// Whether the input currently has focus.
    fn focused(&self) -> bool;

    /// Gives or removes focus.
    fn set_focused(&mut self, focused: bool);

    /// Applies an editing key. Returns `true` when the key changed the value
    /// or the cursor.
    fn handle_key(&mut self, _key: &KeyMsg) -> bool {
        false
    }

    /// Renders the input.
    fn view(&self) -> String {
        self.value()
    }
}

/// A minimal editable text field.
///
/// ```rust
/// use bubbletea_autocomplete::anchor::{Anchor, Field};
///
/// let mut field = Field::new();
/// field.set_value("hello");
/// assert_eq!(field.position(), 5);
/// field.set_cursor(2);
/// assert_eq!(field.position(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    /// Text shown before the value.
    pub prompt: String,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Style of the prompt.
    pub prompt_style: Style,
    /// Style of the typed text.
    pub text_style: Style,
    /// Style of the placeholder.
    pub placeholder_style: Style,
    /// Style of the cell under the cursor.
    pub cursor_style: Style,
    value: Vec<char>,
    pos: usize,
    focus: bool,
    multiline: bool,
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    /// Creates an empty, unfocused single-line field.
    pub fn new() -> Self {
        Self {
            prompt: "> ".to_string(),
            placeholder: String::new(),
            prompt_style: Style::new(),
            text_style: Style::new(),
            placeholder_style: Style::new().foreground(Color::from("240")),
            cursor_style: Style::new().reverse(true),
            value: Vec::new(),
            pos: 0,
            focus: false,
            multiline: false,
        }
    }

    /// Creates a field where `enter` inserts a newline.
    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::new()
        }
    }

    /// Whether `enter` inserts a newline.
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Sets the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    fn insert(&mut self, ch: char) {
        self.value.insert(self.pos, ch);
        self.pos += 1;
    }
}

impl Anchor for Field {
    fn value(&self) -> String {
        self.value.iter().collect()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.pos = self.value.len();
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    fn focused(&self) -> bool {
        self.focus
    }

    fn set_focused(&mut self, focused: bool) {
        self.focus = focused;
    }

    fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }

        match key.key {
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.insert(ch);
            }
            KeyCode::Enter if self.multiline => self.insert('\n'),
            KeyCode::Backspace if self.pos > 0 => {
                self.pos -= 1;
                self.value.remove(self.pos);
            }
            KeyCode::Delete if self.pos < self.value.len() => {
                self.value.remove(self.pos);
            }
            KeyCode::Left if self.pos > 0 => self.pos -= 1,
            KeyCode::Right if self.pos < self.value.len() => self.pos += 1,
            KeyCode::Home => self.pos = 0,
            KeyCode::End => self.pos = self.value.len(),
            _ => return false,
        }
        true
    }

    fn view(&self) -> String {
        let mut v = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() {
            if self.focus {
                let first: String = self.placeholder.chars().take(1).collect();
                let rest: String = self.placeholder.chars().skip(1).collect();
                let under = if first.is_empty() { " ".to_string() } else { first };
                v.push_str(&self.cursor_style.render(&under));
                v.push_str(&self.placeholder_style.render(&rest));
            } else {
                v.push_str(&self.placeholder_style.render(&self.placeholder));
            }
            return v;
        }

        let before: String = self.value[..self.pos].iter().collect();
        v.push_str(&self.text_style.render(&before));

        if !self.focus {
            let after: String = self.value[self.pos..].iter().collect();
            v.push_str(&self.text_style.render(&after));
            return v;
        }

        match self.value.get(self.pos) {
            Some('\n') => {
                v.push_str(&self.cursor_style.render(" "));
                let after: String = self.value[self.pos..].iter().collect();
                v.push_str(&self.text_style.render(&after));
            }
            Some(ch) => {
                v.push_str(&self.cursor_style.render(&ch.to_string()));
                let after: String = self.value[self.pos + 1..].iter().collect();
                v.push_str(&self.text_style.render(&after));
            }
            None => v.push_str(&self.cursor_style.render(" ")),
        }
        v
    }
}

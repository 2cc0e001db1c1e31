//! Message and helper types for the autocomplete component.

use super::item::ResultItem;

/// Fired when a debounce period ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceMsg {
    /// Id of the component that armed the debounce.
    pub id: u64,
    /// Arm generation; only the latest one dispatches.
    pub tag: u64,
}

/// Carries the completion of an asynchronous search.
#[derive(Debug, Clone)]
pub struct FetchDoneMsg {
    /// Id of the component that dispatched the search.
    pub id: u64,
    /// Request generation the results answer.
    pub request: u64,
    /// The results, or `None` when the source ignored the search.
    pub results: Option<Vec<ResultItem>>,
}

/// Kind of pointer or touch interaction with a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// The mouse entered the row.
    Hover,
    /// A mouse button went down on the row.
    Press,
    /// A touch started on the row.
    TouchStart,
    /// The touch moved.
    TouchMove,
    /// The touch ended on the row.
    TouchEnd,
}

/// A pointer or touch interaction with the row at `index`.
///
/// Hosts translate their mouse and touch events into this message;
/// `index` counts rendered rows from the top of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMsg {
    /// Row index.
    pub index: usize,
    /// What happened.
    pub kind: PointerKind,
}

impl PointerMsg {
    /// Creates a pointer message.
    pub fn new(index: usize, kind: PointerKind) -> Self {
        Self { index, kind }
    }
}

/// Direction of index navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the first row, wrapping to the last.
    Up,
    /// Towards the last row, wrapping to the first.
    Down,
}

//! Data sources that turn a search term into results.
//!
//! A [`Source`] receives the search term and a [`Done`] handle. It completes
//! the search by calling [`Done::send`], possibly later and from another
//! thread, or [`Done::ignore`] to finish without touching the current
//! results. Dropping the handle without calling either leaves the search
//! pending for good: the loading indicator stays on.
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::{Done, ResultItem, Source};
//!
//! struct Countries;
//!
//! impl Source for Countries {
//!     fn fetch(&mut self, term: &str, done: Done) {
//!         let all = ["France", "Finland", "Fiji"];
//!         let hits = all
//!             .iter()
//!             .filter(|c| c.to_lowercase().starts_with(&term.to_lowercase()))
//!             .map(|c| ResultItem::new(*c))
//!             .collect();
//!         done.send(hits);
//!     }
//! }
//! ```

use super::item::ResultItem;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tokio::sync::oneshot::{self, error::TryRecvError};

type Payload = Option<Vec<ResultItem>>;

/// Completion handle passed to [`Source::fetch`].
#[derive(Debug)]
pub struct Done {
    tx: oneshot::Sender<Payload>,
}

impl Done {
    pub(crate) fn channel() -> (Done, oneshot::Receiver<Payload>) {
        let (tx, rx) = oneshot::channel();
        (Done { tx }, rx)
    }

    /// Completes the search with `results`.
    pub fn send(self, results: Vec<ResultItem>) {
        self.complete(Some(results));
    }

    /// Completes the search without results. The loading indicator clears
    /// but the current results are left as they are.
    pub fn ignore(self) {
        self.complete(None);
    }

    /// Completes the search with an optional result list.
    pub fn complete(self, results: Option<Vec<ResultItem>>) {
        // The receiver is gone once the component has been dropped.
        let _ = self.tx.send(results);
    }
}

/// State of a dispatched search right after `fetch` returned.
pub(crate) enum Completion {
    /// The source completed synchronously.
    Ready(Payload),
    /// The source will complete later.
    Waiting(oneshot::Receiver<Payload>),
    /// The source dropped its handle without completing.
    Abandoned,
}

impl Completion {
    pub(crate) fn poll(mut rx: oneshot::Receiver<Payload>) -> Self {
        match rx.try_recv() {
            Ok(payload) => Completion::Ready(payload),
            Err(TryRecvError::Empty) => Completion::Waiting(rx),
            Err(TryRecvError::Closed) => Completion::Abandoned,
        }
    }
}

/// Turns a search term into results.
pub trait Source: Send {
    /// Starts a search for `term`; complete it through `done`.
    fn fetch(&mut self, term: &str, done: Done);
}

impl<F> Source for F
where
    F: FnMut(&str, Done) + Send,
{
    fn fetch(&mut self, term: &str, done: Done) {
        self(term, done)
    }
}

/// How a [`StaticSource`] matches items against the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    /// Case-insensitive substring of the `text` field, in item order.
    Substring,
    /// Fuzzy match on the `text` field, best matches first.
    Fuzzy,
}

/// A source backed by a fixed list of items.
#[derive(Debug, Clone)]
pub struct StaticSource {
    items: Vec<ResultItem>,
    matching: Matching,
}

impl StaticSource {
    /// Creates a source over `items`.
    pub fn new(items: Vec<ResultItem>, matching: Matching) -> Self {
        Self { items, matching }
    }

    /// The backing items.
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Items matching `term`.
    pub fn search(&self, term: &str) -> Vec<ResultItem> {
        match self.matching {
            Matching::Substring => {
                let needle = term.to_lowercase();
                self.items
                    .iter()
                    .filter(|item| item.text().to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            Matching::Fuzzy => {
                let matcher = SkimMatcherV2::default();
                let mut scored: Vec<(i64, usize)> = self
                    .items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| {
                        matcher.fuzzy_match(&item.text(), term).map(|score| (score, i))
                    })
                    .collect();
                // Stable on equal scores.
                scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
                scored
                    .into_iter()
                    .map(|(_, i)| self.items[i].clone())
                    .collect()
            }
        }
    }
}

impl Source for StaticSource {
    fn fetch(&mut self, term: &str, done: Done) {
        done.send(self.search(term));
    }
}

/// A source filtering `items` by case-insensitive substring.
pub fn substring<I, T>(items: I) -> StaticSource
where
    I: IntoIterator<Item = T>,
    T: Into<ResultItem>,
{
    StaticSource::new(items.into_iter().map(Into::into).collect(), Matching::Substring)
}

/// A source ranking `items` by fuzzy match.
pub fn fuzzy<I, T>(items: I) -> StaticSource
where
    I: IntoIterator<Item = T>,
    T: Into<ResultItem>,
{
    StaticSource::new(items.into_iter().map(Into::into).collect(), Matching::Fuzzy)
}

/// The source used when none is configured: three sample names, one of
/// them disabled.
pub fn demo() -> StaticSource {
    substring(vec![
        ResultItem::new("Jon"),
        ResultItem::new("Bon").disabled(),
        ResultItem::new("Jovi"),
    ])
}

//! Debounced fetch scheduling.
//!
//! A [`Debouncer`] arms at most one delayed dispatch at a time. Arming again
//! bumps its tag, so the tick message of the previous arm no longer matches
//! and is dropped when it arrives. Each debouncer carries a process-unique
//! id so several components can share one program.

use super::types::DebounceMsg;
use bubbletea_rs::{tick, Cmd, Msg};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_id() -> u64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Schedules at most one pending dispatch per quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer {
    id: u64,
    tag: u64,
    pending: Option<u64>,
    delay: Duration,
}

impl Debouncer {
    /// Creates a debouncer owned by the component with `id`.
    pub fn new(id: u64, delay: Duration) -> Self {
        Self {
            id,
            tag: 0,
            pending: None,
            delay,
        }
    }

    /// Whether a dispatch is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Arms a dispatch, replacing any pending one.
    pub fn schedule(&mut self) -> Cmd {
        self.tag += 1;
        self.pending = Some(self.tag);

        let id = self.id;
        let tag = self.tag;
        tick(self.delay, move |_| Box::new(DebounceMsg { id, tag }) as Msg)
    }

    /// Disarms the pending dispatch, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consumes a tick message. Returns `true` when it belongs to this
    /// debouncer and is the armed one; the dispatch should then run.
    pub fn fire(&mut self, msg: &DebounceMsg) -> bool {
        if msg.id != self.id || self.pending != Some(msg.tag) {
            return false;
        }
        self.pending = None;
        true
    }
}

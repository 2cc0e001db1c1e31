//! Search, navigation and selection logic of the autocomplete model.

use super::highlight;
use super::item::ResultItem;
use super::model::Model;
use super::render;
use super::source::{Completion, Done};
use super::trigger;
use super::types::{DebounceMsg, Direction, FetchDoneMsg, PointerKind, PointerMsg};
use crate::anchor::Anchor;
use crate::key::matches_binding;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};

/// What a special key asks for.
enum Action {
    Move(Direction),
    MoveHorizontal(Direction),
    Accept,
    Dismiss,
}

impl<A: Anchor> Model<A> {
    /// Derives the search term from `text` and the cursor position and
    /// starts or abandons a search accordingly.
    ///
    /// Nothing happens when the derived term equals the current one. A term
    /// shorter than the threshold clears the results and cancels a search
    /// that has not been dispatched yet.
    pub fn process_input(&mut self, text: &str, cursor: usize) -> Option<Cmd> {
        let next = trigger::extract(text, cursor, self.config.options.trigger_char);
        if next == self.search_term {
            return None;
        }

        self.search_term = next;
        self.is_result_selected = false;

        if self.meets_threshold() {
            self.search()
        } else {
            self.cancel_pending();
            self.clear();
            None
        }
    }

    /// Runs [`Model::process_input`] on the anchor's current value and cursor.
    pub fn handle_typing(&mut self) -> Option<Cmd> {
        let text = self.anchor.value();
        let cursor = self.anchor.position();
        self.process_input(&text, cursor)
    }

    fn meets_threshold(&self) -> bool {
        let len = self.search_term.chars().count();
        len > 0 && len >= self.config.options.threshold.max(1) as usize
    }

    /// Marks the component loading and dispatches a fetch, either right away
    /// or after the debounce period.
    ///
    /// The request generation advances here rather than at dispatch, so a
    /// fetch still in flight is stale as soon as a newer term is scheduled.
    fn search(&mut self) -> Option<Cmd> {
        self.request += 1;
        self.loading = true;
        if self.config.options.is_synchronous() {
            self.debouncer.cancel();
            self.dispatch_fetch()
        } else {
            Some(self.debouncer.schedule())
        }
    }

    /// Drops a search that has not completed: the armed debounce, the
    /// loading state and any fetch already handed to the source.
    fn cancel_pending(&mut self) {
        self.debouncer.cancel();
        if self.loading {
            self.request += 1;
            self.loading = false;
        }
    }

    fn dispatch_fetch(&mut self) -> Option<Cmd> {
        let request = self.request;
        log::debug!(
            "autocomplete {}: fetching {:?} (request {})",
            self.id,
            self.search_term,
            request
        );

        let (done, rx) = Done::channel();
        self.config.source.fetch(&self.search_term, done);

        match Completion::poll(rx) {
            Completion::Ready(results) => {
                self.complete(results);
                None
            }
            Completion::Waiting(rx) => {
                let id = self.id;
                let cmd: Cmd = Box::pin(async move {
                    match rx.await {
                        Ok(results) => Some(Box::new(FetchDoneMsg {
                            id,
                            request,
                            results,
                        }) as Msg),
                        Err(_) => None,
                    }
                });
                Some(cmd)
            }
            Completion::Abandoned => {
                log::debug!(
                    "autocomplete {}: request {} dropped without completing",
                    self.id,
                    request
                );
                None
            }
        }
    }

    fn complete(&mut self, results: Option<Vec<ResultItem>>) {
        match results {
            Some(items) => self.ingest_results(items),
            None => self.loading = false,
        }
    }

    /// Applies an asynchronous completion. Completions for another component
    /// or for a request that has since been superseded are dropped; returns
    /// whether the message was applied.
    pub fn handle_fetch_done(&mut self, msg: FetchDoneMsg) -> bool {
        if msg.id != self.id {
            return false;
        }
        if msg.request != self.request {
            log::debug!(
                "autocomplete {}: dropping stale completion of request {} (latest {})",
                self.id,
                msg.request,
                self.request
            );
            return false;
        }
        self.complete(msg.results);
        true
    }

    /// Takes a result list from the data source.
    ///
    /// The list is cut to the configured limit. Results are shown when the
    /// anchor has focus and there is something to show (a result, or the
    /// empty template); otherwise they are cleared. Loading always ends.
    pub fn ingest_results(&mut self, mut items: Vec<ResultItem>) {
        if let Some(limit) = self.config.options.result_limit() {
            items.truncate(limit);
        }
        self.results = items;

        let has_empty_template = self.config.options.templates.empty_template().is_some();
        if (has_empty_template || !self.results.is_empty()) && self.anchor.focused() {
            if self.are_results_displayed {
                self.populate();
            } else {
                self.show();
            }
        } else {
            self.clear();
        }
        self.loading = false;
    }

    /// Renders the current results and displays them.
    ///
    /// Does nothing while the list is already displayed: the hook is not
    /// called again and the highlighted row stays where it is.
    pub fn show(&mut self) {
        if self.are_results_displayed {
            return;
        }
        if let Some(hook) = self.config.on_before_show.as_mut() {
            hook();
        }
        self.populate();
        self.are_results_displayed = true;
    }

    /// Re-renders the rows from the current results and resets the index.
    fn populate(&mut self) {
        let mut rendered = render::render(&self.results, &self.config.options.templates);
        if !self.results.is_empty() && self.config.options.search_term_highlight {
            for node in rendered.iter_mut() {
                match highlight::highlight(
                    &node.children,
                    &self.search_term,
                    &self.classes.search_term,
                ) {
                    Ok(children) => node.children = children,
                    Err(err) => {
                        log::warn!("autocomplete {}: not highlighting results: {}", self.id, err);
                        break;
                    }
                }
            }
        }

        self.rendered = rendered;
        self.result_index = None;

        if self.config.options.force_selection && self.change_index(Direction::Down) {
            self.highlight_current();
        }
    }

    /// Hides the result list, keeping results and index.
    pub fn hide(&mut self) {
        self.are_results_displayed = false;
    }

    /// Empties and hides the result list.
    pub fn clear(&mut self) {
        self.results.clear();
        self.rendered.clear();
        self.result_index = None;
        self.hide();
    }

    /// Moves the highlight one step, wrapping around and skipping disabled
    /// results. Returns whether the index changed.
    ///
    /// Nothing moves when there are no results or all of them are disabled.
    pub fn change_index(&mut self, direction: Direction) -> bool {
        let len = self.results.len();
        if len == 0 || self.results.iter().all(|r| r.is_disabled()) {
            return false;
        }

        let step = |index: Option<usize>| match (direction, index) {
            (Direction::Up, None | Some(0)) => len - 1,
            (Direction::Up, Some(i)) => i - 1,
            (Direction::Down, Some(i)) if i + 1 < len => i + 1,
            (Direction::Down, _) => 0,
        };

        let before = self.result_index;
        let mut index = step(before);
        let mut skipped = 0;
        while self.results[index].is_disabled() && skipped < len {
            index = step(Some(index));
            skipped += 1;
        }

        self.result_index = Some(index);
        self.result_index != before
    }

    /// Moves the highlight mark to the current row, unless it is disabled.
    pub fn highlight_current(&mut self) {
        let current = self.result_index;
        for (i, node) in self.rendered.iter_mut().enumerate() {
            node.set_highlighted(current == Some(i) && !node.is_disabled());
        }
    }

    /// Commits the highlighted row: hands it to the selection callback and
    /// takes the anchor's resulting value as the search term. Does nothing
    /// without a highlighted row or when that row is disabled.
    pub fn select_current(&mut self) {
        let Some(index) = self.result_index else {
            return;
        };
        let Some(node) = self.rendered.get(index) else {
            return;
        };
        if node.is_disabled() {
            return;
        }

        self.is_result_selected = true;
        (self.config.on_item)(node, &mut self.anchor);
        self.search_term = self.anchor.value();
    }

    fn action(&self, key: &KeyMsg) -> Option<Action> {
        let km = &self.key_map;
        if matches_binding(key, &km.prev) {
            Some(Action::Move(Direction::Up))
        } else if matches_binding(key, &km.next) {
            Some(Action::Move(Direction::Down))
        } else if matches_binding(key, &km.prev_horizontal) {
            Some(Action::MoveHorizontal(Direction::Up))
        } else if matches_binding(key, &km.next_horizontal) {
            Some(Action::MoveHorizontal(Direction::Down))
        } else if matches_binding(key, &km.accept) {
            Some(Action::Accept)
        } else if matches_binding(key, &km.dismiss) {
            Some(Action::Dismiss)
        } else {
            None
        }
    }

    /// Handles navigation, accept and dismiss keys while results are shown.
    /// Returns `true` when the key was consumed and must not reach the
    /// anchor.
    pub fn handle_special_key(&mut self, key: &KeyMsg) -> bool {
        if !self.are_results_displayed {
            return false;
        }

        let is_highlighted = self.result_index.is_some();
        let mut suppressed = false;
        let mut changed = false;

        match self.action(key) {
            Some(Action::Move(direction)) => {
                if !self.results.is_empty() {
                    suppressed = true;
                    changed = self.change_index(direction);
                }
            }
            Some(Action::MoveHorizontal(direction)) => {
                if self.config.options.use_horizontal_nav_keys && is_highlighted {
                    suppressed = true;
                    changed = self.change_index(direction);
                }
            }
            Some(Action::Accept) => {
                if is_highlighted {
                    suppressed = true;
                    self.select_current();
                    self.hide();
                }
            }
            Some(Action::Dismiss) => {
                suppressed = true;
                if self.config.options.force_selection {
                    self.anchor.set_value("");
                }
                self.cancel_pending();
                self.clear();
            }
            None => {}
        }

        if changed {
            self.highlight_current();
        }
        suppressed
    }

    /// Runs when the anchor loses focus. With forced selection, an input
    /// that does not hold a chosen result is reverted and then emptied.
    pub fn handle_blur(&mut self) {
        if self.config.options.force_selection {
            if self.anchor.value() != self.search_term {
                self.anchor.set_value(&self.search_term);
            }
            if !self.is_result_selected {
                self.anchor.set_value("");
            }
        }
        self.hide();
    }

    /// Runs when the anchor gains focus: an input that already holds text
    /// is searched again.
    pub fn handle_focus(&mut self) -> Option<Cmd> {
        let value = self.anchor.value();
        if value.is_empty() {
            return None;
        }

        self.search_term = trigger::extract(
            &value,
            self.anchor.position(),
            self.config.options.trigger_char,
        );
        if self.meets_threshold() {
            self.search()
        } else {
            None
        }
    }

    /// Handles a pointer or touch interaction with a result row.
    ///
    /// Hovering or touching a row highlights it. A press, or a touch that
    /// ends without moving, selects it and clears the list.
    pub fn handle_pointer(&mut self, msg: PointerMsg) {
        if !self.are_results_displayed {
            return;
        }
        if msg.kind == PointerKind::TouchMove {
            self.has_touch_moved = true;
            return;
        }
        if msg.index >= self.results.len() {
            return;
        }

        match msg.kind {
            PointerKind::Hover | PointerKind::TouchStart => {
                self.result_index = Some(msg.index);
                self.highlight_current();
                self.has_touch_moved = false;
            }
            PointerKind::Press | PointerKind::TouchEnd => {
                if self.has_touch_moved {
                    return;
                }
                self.result_index = Some(msg.index);
                self.select_current();
                self.clear();
            }
            PointerKind::TouchMove => {}
        }
    }

    /// Routes a message to the component.
    ///
    /// Key messages are only handled while the anchor has focus. A key not
    /// consumed by [`Model::handle_special_key`] is applied to the anchor and
    /// the search term is re-derived.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if !self.anchor.focused() || self.handle_special_key(key) {
                return None;
            }
            self.anchor.handle_key(key);
            return self.handle_typing();
        }

        if let Some(tick) = msg.downcast_ref::<DebounceMsg>() {
            if self.debouncer.fire(tick) {
                return self.dispatch_fetch();
            }
            return None;
        }

        let msg = match msg.downcast::<FetchDoneMsg>() {
            Ok(done) => {
                self.handle_fetch_done(*done);
                return None;
            }
            Err(msg) => msg,
        };

        if let Some(pointer) = msg.downcast_ref::<PointerMsg>() {
            self.handle_pointer(*pointer);
        }
        None
    }
}

impl<A: Anchor> Component for Model<A> {
    fn focus(&mut self) -> Option<Cmd> {
        self.anchor.set_focused(true);
        self.handle_focus()
    }

    fn blur(&mut self) {
        self.anchor.set_focused(false);
        self.handle_blur();
    }

    fn focused(&self) -> bool {
        self.anchor.focused()
    }
}

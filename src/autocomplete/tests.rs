//! Tests for the autocomplete component.

use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Anchor, Field};
    use crate::Component;
    use bubbletea_rs::{KeyMsg, Msg};
    use crossterm::event::{KeyCode, KeyModifiers};
    use lipgloss_extras::lipgloss::strip_ansi;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn abc() -> Vec<ResultItem> {
        vec![ResultItem::new("a"), ResultItem::new("b"), ResultItem::new("c")]
    }

    fn sync_options() -> Options {
        Options {
            debounce_time: 0,
            ..Options::default()
        }
    }

    fn focused(config: Config) -> Model {
        let mut m = Model::new(Field::new(), config);
        m.anchor_mut().set_focused(true);
        m
    }

    fn model(options: Options) -> Model {
        focused(Config::new(options))
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    fn highlighted_rows(m: &Model) -> Vec<usize> {
        m.rendered()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_highlighted())
            .map(|(i, _)| i)
            .collect()
    }

    /// A source that records every term it is asked for.
    fn recording(items: Vec<ResultItem>) -> (impl Source + 'static, Arc<Mutex<Vec<String>>>) {
        let terms = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&terms);
        let inner = source::substring(items);
        let source = move |term: &str, done: Done| {
            seen.lock().unwrap().push(term.to_string());
            done.send(inner.search(term));
        };
        (source, terms)
    }

    #[test]
    fn test_new_model_is_idle() {
        let m = model(Options::default());
        assert_eq!(m.search_term(), "");
        assert!(m.results().is_empty());
        assert_eq!(m.result_index(), None);
        assert!(!m.are_results_displayed());
        assert!(!m.is_result_selected());
        assert!(!m.is_loading());
    }

    #[test]
    fn test_ingest_applies_limit() {
        let mut m = model(Options {
            limit: 1,
            ..sync_options()
        });
        m.ingest_results(abc());
        assert_eq!(m.results().len(), 1);
        assert!(m.are_results_displayed());
        assert!(!m.is_loading());
    }

    #[test]
    fn test_ingest_unlimited() {
        let mut m = model(Options {
            limit: 0,
            ..sync_options()
        });
        m.ingest_results(abc());
        assert_eq!(m.results().len(), 3);
    }

    #[test]
    fn test_empty_ingest_shows_empty_template() {
        let mut m = model(sync_options());
        m.ingest_results(Vec::new());
        assert!(m.are_results_displayed());
        assert_eq!(m.rendered().len(), 1);
        assert!(m.rendered()[0].is_empty());
        assert!(m.rendered()[0].is_disabled());
        assert_eq!(m.rendered()[0].text(), "No matches found");
    }

    #[test]
    fn test_empty_ingest_without_empty_template_clears() {
        let mut options = sync_options();
        options.templates.empty = None;
        let mut m = model(options);
        m.ingest_results(Vec::new());
        assert!(!m.are_results_displayed());
        assert!(m.rendered().is_empty());
    }

    #[test]
    fn test_ingest_without_focus_clears() {
        let mut m = model(sync_options());
        m.anchor_mut().set_focused(false);
        m.ingest_results(abc());
        assert!(!m.are_results_displayed());
        assert!(m.results().is_empty());
    }

    #[test]
    fn test_force_selection_highlights_first_enabled_result() {
        let mut m = model(Options {
            force_selection: true,
            ..sync_options()
        });
        m.ingest_results(vec![ResultItem::new("a").disabled(), ResultItem::new("b")]);
        assert_eq!(m.result_index(), Some(1));
        assert_eq!(highlighted_rows(&m), vec![1]);
    }

    #[test]
    fn test_show_while_displayed_does_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut m = focused(Config::new(sync_options()).with_on_before_show(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        m.ingest_results(abc());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        m.change_index(Direction::Down);
        m.change_index(Direction::Down);
        m.highlight_current();

        m.show();
        assert!(m.are_results_displayed());
        assert_eq!(m.result_index(), Some(1));
        assert_eq!(highlighted_rows(&m), vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_results_refresh_a_displayed_list() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut m = focused(Config::new(sync_options()).with_on_before_show(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        m.ingest_results(abc());
        m.change_index(Direction::Down);
        m.ingest_results(vec![ResultItem::new("Jovi")]);

        assert!(m.are_results_displayed());
        assert_eq!(m.rendered().len(), 1);
        assert_eq!(m.rendered()[0].text(), "Jovi");
        assert_eq!(m.result_index(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_show_after_hide_rerenders_and_forces_selection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let options = Options {
            force_selection: true,
            ..sync_options()
        };
        let mut m = focused(Config::new(options).with_on_before_show(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        m.ingest_results(abc());
        m.change_index(Direction::Down);
        m.highlight_current();
        assert_eq!(m.result_index(), Some(1));

        m.hide();
        m.show();
        assert!(m.are_results_displayed());
        assert_eq!(m.result_index(), Some(0));
        assert_eq!(highlighted_rows(&m), vec![0]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hide_keeps_results_and_clear_empties_them() {
        let mut m = model(sync_options());
        m.ingest_results(abc());
        m.change_index(Direction::Down);

        m.hide();
        assert!(!m.are_results_displayed());
        assert_eq!(m.results().len(), 3);
        assert_eq!(m.result_index(), Some(0));

        m.clear();
        assert!(m.results().is_empty());
        assert!(m.rendered().is_empty());
        assert_eq!(m.result_index(), None);
        assert!(!m.are_results_displayed());
    }

    #[test]
    fn test_results_are_search_term_highlighted() {
        let mut m = model(sync_options());
        let _ = m.process_input("jo", 2);
        let row = &m.rendered()[0];
        let class = &m.classes().search_term;
        let has_span = row.children.iter().any(|n| match n {
            markup::Node::Element(strong) => strong.children.iter().any(
                |c| matches!(c, markup::Node::Element(s) if s.tag == "span" && s.has_class(class)),
            ),
            _ => false,
        });
        assert!(has_span);
        assert_eq!(row.text(), "Jon");
    }

    #[test]
    fn test_highlight_skips_disabled_item() {
        let mut m = model(sync_options());
        m.ingest_results(vec![
            ResultItem::new("a"),
            ResultItem::new("b").disabled(),
            ResultItem::new("c"),
        ]);
        m.handle_pointer(PointerMsg::new(1, PointerKind::Hover));
        assert_eq!(m.result_index(), Some(1));
        assert!(highlighted_rows(&m).is_empty());

        m.handle_pointer(PointerMsg::new(2, PointerKind::Hover));
        assert_eq!(highlighted_rows(&m), vec![2]);
    }

    #[test]
    fn test_select_calls_on_item() {
        let picked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&picked);
        let mut m = focused(Config::new(sync_options()).with_on_item(
            move |node: &RenderNode, anchor: &mut dyn Anchor| {
                sink.lock().unwrap().push(node.value.clone());
                anchor.set_value(&format!("picked {}", node.value));
            },
        ));

        m.ingest_results(abc());
        m.change_index(Direction::Down);
        m.change_index(Direction::Down);
        m.select_current();

        assert_eq!(*picked.lock().unwrap(), vec!["b".to_string()]);
        assert!(m.is_result_selected());
        assert_eq!(m.anchor().value(), "picked b");
        assert_eq!(m.search_term(), "picked b");
    }

    #[test]
    fn test_select_disabled_or_missing_row_does_nothing() {
        let mut m = model(sync_options());
        m.ingest_results(vec![ResultItem::new("a").disabled(), ResultItem::new("b")]);

        m.select_current();
        assert!(!m.is_result_selected());

        m.handle_pointer(PointerMsg::new(0, PointerKind::Hover));
        m.select_current();
        assert!(!m.is_result_selected());
        assert_eq!(m.anchor().value(), "");
    }

    #[test]
    fn test_default_on_item_writes_value() {
        let mut m = model(sync_options());
        m.ingest_results(vec![ResultItem::new("Jovi")]);
        m.change_index(Direction::Down);
        m.select_current();
        assert_eq!(m.anchor().value(), "Jovi");
        assert_eq!(m.search_term(), "Jovi");
    }

    #[test]
    fn test_esc_with_force_selection_clears_input() {
        let mut m = model(Options {
            force_selection: true,
            ..sync_options()
        });
        m.anchor_mut().set_value("ab");
        m.ingest_results(abc());

        let _ = m.update(key(KeyCode::Esc));
        assert_eq!(m.anchor().value(), "");
        assert!(!m.are_results_displayed());
        assert!(m.results().is_empty());
    }

    #[test]
    fn test_esc_without_force_selection_keeps_input() {
        let mut m = model(sync_options());
        m.anchor_mut().set_value("ab");
        m.ingest_results(abc());

        let _ = m.update(key(KeyCode::Esc));
        assert_eq!(m.anchor().value(), "ab");
        assert!(!m.are_results_displayed());
    }

    #[test]
    fn test_blur_clears_input_unless_selected() {
        let mut m = model(Options {
            force_selection: true,
            ..sync_options()
        });
        m.anchor_mut().set_value("zz");
        let _ = m.handle_typing();
        m.blur();
        assert_eq!(m.anchor().value(), "");
        assert!(!m.focused());
        assert!(!m.are_results_displayed());
    }

    #[test]
    fn test_blur_keeps_selected_value() {
        let mut m = model(Options {
            force_selection: true,
            threshold: 1,
            ..sync_options()
        });
        m.anchor_mut().set_value("jo");
        let _ = m.handle_typing();
        assert_eq!(m.result_index(), Some(0));

        let _ = m.update(key(KeyCode::Enter));
        assert!(m.is_result_selected());
        assert_eq!(m.anchor().value(), "Jon");

        m.blur();
        assert_eq!(m.anchor().value(), "Jon");
    }

    #[test]
    fn test_blur_reverts_edited_value_to_search_term() {
        let mut m = model(Options {
            force_selection: true,
            ..sync_options()
        });
        m.ingest_results(vec![ResultItem::new("Jovi")]);
        let _ = m.update(key(KeyCode::Enter));
        assert!(m.is_result_selected());

        // Edited behind the component's back.
        m.anchor_mut().set_value("Jov");
        m.blur();
        assert_eq!(m.anchor().value(), "Jovi");
    }

    #[test]
    fn test_blank_or_short_input_does_not_fetch() {
        let (source, terms) = recording(abc());
        let mut m = focused(Config::new(sync_options()).with_source(source));

        let _ = m.process_input("", 0);
        let _ = m.process_input("a", 1);
        assert!(terms.lock().unwrap().is_empty());
        assert!(!m.is_loading());

        let _ = m.process_input("ab", 2);
        assert_eq!(*terms.lock().unwrap(), vec!["ab".to_string()]);
    }

    #[test]
    fn test_identical_term_does_not_fetch_again() {
        let (source, terms) = recording(abc());
        let mut m = focused(Config::new(sync_options()).with_source(source));

        let _ = m.process_input("ab", 2);
        let _ = m.process_input("ab", 1);
        assert_eq!(terms.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_new_term_resets_selection() {
        let mut m = model(Options {
            threshold: 1,
            ..sync_options()
        });
        let _ = m.process_input("jo", 2);
        m.change_index(Direction::Down);
        m.select_current();
        assert!(m.is_result_selected());

        let _ = m.process_input("jov", 3);
        assert!(!m.is_result_selected());
    }

    #[test]
    fn test_short_term_clears_results() {
        let mut m = model(sync_options());
        let _ = m.process_input("jo", 2);
        assert!(m.are_results_displayed());

        let _ = m.process_input("j", 1);
        assert!(!m.are_results_displayed());
        assert!(m.results().is_empty());
    }

    #[test]
    fn test_trigger_char_scopes_the_search() {
        let (source, terms) = recording(vec![ResultItem::new("@jon")]);
        let mut m = focused(
            Config::new(Options {
                trigger_char: Some('@'),
                ..sync_options()
            })
            .with_source(source),
        );

        let _ = m.process_input("hi jo", 5);
        assert!(terms.lock().unwrap().is_empty());

        let _ = m.process_input("hi @jo there", 6);
        assert_eq!(m.search_term(), "@jo");
        assert_eq!(*terms.lock().unwrap(), vec!["@jo".to_string()]);
        assert!(m.are_results_displayed());
    }

    #[test]
    fn test_typing_through_update_searches() {
        let mut m = model(sync_options());
        let _ = m.update(key(KeyCode::Char('j')));
        assert!(!m.are_results_displayed());

        let _ = m.update(key(KeyCode::Char('o')));
        assert_eq!(m.search_term(), "jo");
        assert_eq!(m.results().len(), 2);
        assert!(m.are_results_displayed());
    }

    #[test]
    fn test_keys_are_ignored_without_focus() {
        let mut m = model(sync_options());
        m.anchor_mut().set_focused(false);
        assert!(m.update(key(KeyCode::Char('j'))).is_none());
        assert_eq!(m.anchor().value(), "");
    }

    #[test]
    fn test_index_wraps_around() {
        let mut m = model(sync_options());
        m.ingest_results(abc());

        assert!(m.change_index(Direction::Up));
        assert_eq!(m.result_index(), Some(2));
        assert!(m.change_index(Direction::Down));
        assert_eq!(m.result_index(), Some(0));
        assert!(m.change_index(Direction::Up));
        assert_eq!(m.result_index(), Some(2));
        assert!(m.change_index(Direction::Up));
        assert_eq!(m.result_index(), Some(1));
        assert!(m.change_index(Direction::Down));
        assert_eq!(m.result_index(), Some(2));
    }

    #[test]
    fn test_change_index_reports_no_change() {
        let mut m = model(sync_options());
        m.ingest_results(vec![ResultItem::new("only")]);
        assert!(m.change_index(Direction::Down));
        assert!(!m.change_index(Direction::Down));
        assert!(!m.change_index(Direction::Up));
        assert_eq!(m.result_index(), Some(0));
    }

    #[test]
    fn test_change_index_skips_disabled_items() {
        let mut m = model(sync_options());
        m.ingest_results(vec![
            ResultItem::new("a").disabled(),
            ResultItem::new("b").disabled(),
            ResultItem::new("c"),
        ]);
        assert!(m.change_index(Direction::Down));
        assert_eq!(m.result_index(), Some(2));
        assert!(!m.change_index(Direction::Up));
        assert_eq!(m.result_index(), Some(2));
    }

    #[test]
    fn test_change_index_with_every_item_disabled() {
        let mut m = model(sync_options());
        m.ingest_results(vec![ResultItem::new("a").disabled(), ResultItem::new("b").disabled()]);
        assert!(!m.change_index(Direction::Down));
        assert!(!m.change_index(Direction::Up));
        assert_eq!(m.result_index(), None);
    }

    #[test]
    fn test_change_index_without_results() {
        let mut m = model(sync_options());
        assert!(!m.change_index(Direction::Down));
        m.ingest_results(Vec::new());
        assert!(!m.change_index(Direction::Down));
        assert_eq!(m.result_index(), None);
    }

    #[test]
    fn test_arrow_keys_move_highlight() {
        let mut m = model(sync_options());
        m.ingest_results(abc());

        let _ = m.update(key(KeyCode::Down));
        assert_eq!(highlighted_rows(&m), vec![0]);
        let _ = m.update(key(KeyCode::Up));
        assert_eq!(highlighted_rows(&m), vec![2]);
        // Consumed keys never reach the input.
        assert_eq!(m.anchor().value(), "");
    }

    #[test]
    fn test_special_keys_ignored_while_hidden() {
        let mut m = model(sync_options());
        let down = KeyMsg {
            key: KeyCode::Down,
            modifiers: KeyModifiers::NONE,
        };
        assert!(!m.handle_special_key(&down));
    }

    #[test]
    fn test_horizontal_keys() {
        let right = KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        };

        let mut off = model(sync_options());
        off.ingest_results(abc());
        off.change_index(Direction::Down);
        assert!(!off.handle_special_key(&right));

        let mut on = model(Options {
            use_horizontal_nav_keys: true,
            ..sync_options()
        });
        on.ingest_results(abc());
        // Nothing highlighted yet.
        assert!(!on.handle_special_key(&right));

        let _ = on.update(key(KeyCode::Down));
        assert!(on.handle_special_key(&right));
        assert_eq!(on.result_index(), Some(1));
        assert_eq!(highlighted_rows(&on), vec![1]);

        let _ = on.update(key(KeyCode::Left));
        assert_eq!(on.result_index(), Some(0));
    }

    #[test]
    fn test_enter_selects_and_hides() {
        let mut m = model(sync_options());
        m.ingest_results(abc());

        // Without a highlighted row enter is not consumed.
        let enter = KeyMsg {
            key: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
        };
        assert!(!m.handle_special_key(&enter));

        let _ = m.update(key(KeyCode::Down));
        let _ = m.update(key(KeyCode::Tab));
        assert!(m.is_result_selected());
        assert!(!m.are_results_displayed());
        assert_eq!(m.anchor().value(), "a");
    }

    #[test]
    fn test_typing_after_selection_appends() {
        let mut m =
            focused(Config::new(sync_options()).with_source(source::substring(["Jon", "Jovi"])));
        let _ = m.update(key(KeyCode::Char('j')));
        let _ = m.update(key(KeyCode::Char('o')));
        assert_eq!(m.results().len(), 2);

        let _ = m.update(key(KeyCode::Down));
        let _ = m.update(key(KeyCode::Enter));
        assert_eq!(m.anchor().value(), "Jon");
        assert_eq!(m.anchor().position(), 3);

        let _ = m.update(key(KeyCode::Char('!')));
        assert_eq!(m.anchor().value(), "Jon!");
    }

    #[test]
    fn test_touch_sequence() {
        let mut m = model(sync_options());
        m.ingest_results(abc());

        m.handle_pointer(PointerMsg::new(1, PointerKind::TouchStart));
        assert_eq!(highlighted_rows(&m), vec![1]);

        m.handle_pointer(PointerMsg::new(1, PointerKind::TouchMove));
        m.handle_pointer(PointerMsg::new(1, PointerKind::TouchEnd));
        assert!(!m.is_result_selected());
        assert!(m.are_results_displayed());

        m.handle_pointer(PointerMsg::new(1, PointerKind::TouchStart));
        m.handle_pointer(PointerMsg::new(1, PointerKind::TouchEnd));
        assert!(m.is_result_selected());
        assert_eq!(m.anchor().value(), "b");
        assert!(m.results().is_empty());
        assert!(!m.are_results_displayed());
    }

    #[test]
    fn test_mouse_press_selects_through_update() {
        let mut m = model(sync_options());
        m.ingest_results(abc());
        let _ = m.update(Box::new(PointerMsg::new(2, PointerKind::Press)) as Msg);
        assert_eq!(m.anchor().value(), "c");
        assert!(!m.are_results_displayed());
    }

    #[test]
    fn test_pointer_out_of_range_is_ignored() {
        let mut m = model(sync_options());
        m.ingest_results(Vec::new());
        m.handle_pointer(PointerMsg::new(0, PointerKind::Press));
        assert!(!m.is_result_selected());
        assert!(m.are_results_displayed());
    }

    #[test]
    fn test_ignored_completion_keeps_results() {
        let mut m = focused(Config::new(sync_options()).with_source(|_: &str, done: Done| done.ignore()));
        m.ingest_results(abc());
        let _ = m.process_input("zz", 2);
        assert!(!m.is_loading());
        assert_eq!(m.results().len(), 3);
    }

    #[test]
    fn test_abandoned_fetch_stays_loading() {
        let mut m = focused(Config::new(sync_options()).with_source(|_: &str, done: Done| drop(done)));
        assert!(m.process_input("zz", 2).is_none());
        assert!(m.is_loading());
        assert!(m.wrapper_class_list().contains(&m.classes().loading));
    }

    #[test]
    fn test_focus_searches_existing_value() {
        let mut m = Model::new(Field::new(), Config::new(sync_options()));
        m.anchor_mut().set_value("jo");
        assert!(!m.are_results_displayed());

        let _ = m.focus();
        assert!(m.focused());
        assert_eq!(m.search_term(), "jo");
        assert!(m.are_results_displayed());
    }

    #[test]
    fn test_focus_with_empty_value_does_nothing() {
        let (source, terms) = recording(abc());
        let mut m = Model::new(Field::new(), Config::new(sync_options()).with_source(source));
        assert!(m.focus().is_none());
        assert!(terms.lock().unwrap().is_empty());
    }

    #[test]
    fn test_wrapper_classes() {
        let mut extra = std::collections::BTreeMap::new();
        extra.insert("wrapper".to_string(), "ohdeer".to_string());
        let mut m = model(Options {
            extra_classes: extra,
            ..sync_options()
        });
        assert_eq!(m.wrapper_class_list(), vec!["autocomplete ohdeer".to_string()]);

        m.ingest_results(abc());
        assert!(m.wrapper_class_list().contains(&"is-visible".to_string()));
    }

    #[test]
    fn test_view_lists_results() {
        let mut m = model(sync_options());
        let _ = m.process_input("jo", 2);
        let _ = m.update(key(KeyCode::Down));

        let view = strip_ansi(&m.view());
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with('>'));
        assert!(lines[1].contains("Jon"));
        assert!(!lines[2].starts_with('>'));
        assert!(lines[2].contains("Jovi"));
    }

    #[test]
    fn test_view_without_results_is_the_anchor() {
        let m = model(sync_options());
        assert_eq!(m.view(), m.anchor().view());
    }

    #[test]
    fn test_stale_completion_from_other_component_is_ignored() {
        let mut m = model(sync_options());
        let msg = FetchDoneMsg {
            id: m.id() + 1000,
            request: 1,
            results: Some(abc()),
        };
        assert!(!m.handle_fetch_done(msg));
        assert!(!m.are_results_displayed());
    }

    #[tokio::test]
    async fn test_debounced_search_dispatches_once() {
        let (source, terms) = recording(vec![ResultItem::new("Jon"), ResultItem::new("Jovi")]);
        let mut m = focused(
            Config::new(Options {
                debounce_time: 5,
                ..Options::default()
            })
            .with_source(source),
        );

        let first = m.process_input("jo", 2).expect("debounce tick");
        let second = m.process_input("jov", 3).expect("debounce tick");
        assert!(m.is_loading());
        assert!(terms.lock().unwrap().is_empty());

        let stale = first.await.expect("tick message");
        assert!(m.update(stale).is_none());
        assert!(terms.lock().unwrap().is_empty());

        let armed = second.await.expect("tick message");
        assert!(m.update(armed).is_none());
        assert_eq!(*terms.lock().unwrap(), vec!["jov".to_string()]);
        assert_eq!(m.results().len(), 1);
        assert!(!m.is_loading());
    }

    #[tokio::test]
    async fn test_short_term_cancels_pending_debounce() {
        let (source, terms) = recording(abc());
        let mut m = focused(
            Config::new(Options {
                debounce_time: 5,
                ..Options::default()
            })
            .with_source(source),
        );

        let pending = m.process_input("ab", 2).expect("debounce tick");
        let _ = m.process_input("a", 1);
        assert!(!m.is_loading());

        let tick = pending.await.expect("tick message");
        let _ = m.update(tick);
        assert!(terms.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_async_completion_is_dropped() {
        let handles: Arc<Mutex<Vec<Done>>> = Arc::new(Mutex::new(Vec::new()));
        let parked = Arc::clone(&handles);
        let mut m = focused(
            Config::new(sync_options()).with_source(move |_: &str, done: Done| {
                parked.lock().unwrap().push(done);
            }),
        );

        let first = m.process_input("jo", 2).expect("fetch command");
        let second = m.process_input("jov", 3).expect("fetch command");

        let mut dones: Vec<Done> = handles.lock().unwrap().drain(..).collect();
        let newer = dones.pop().expect("second handle");
        let older = dones.pop().expect("first handle");
        older.send(abc());
        newer.send(vec![ResultItem::new("Jovi")]);

        let msg = first.await.expect("completion");
        let _ = m.update(msg);
        assert!(!m.are_results_displayed());
        assert!(m.is_loading());

        let msg = second.await.expect("completion");
        let _ = m.update(msg);
        assert!(m.are_results_displayed());
        assert_eq!(m.results().len(), 1);
        assert!(!m.is_loading());
    }

    #[tokio::test]
    async fn test_completion_is_stale_once_a_newer_search_is_armed() {
        let handles: Arc<Mutex<Vec<Done>>> = Arc::new(Mutex::new(Vec::new()));
        let parked = Arc::clone(&handles);
        let mut m = focused(
            Config::new(Options {
                debounce_time: 5,
                ..Options::default()
            })
            .with_source(move |_: &str, done: Done| {
                parked.lock().unwrap().push(done);
            }),
        );

        let tick = m.process_input("jo", 2).expect("debounce tick");
        let tick = tick.await.expect("tick message");
        let first = m.update(tick).expect("fetch command");

        let armed = m.process_input("jov", 3).expect("debounce tick");
        let older = handles.lock().unwrap().pop().expect("first handle");
        older.send(abc());
        let msg = first.await.expect("completion");
        let _ = m.update(msg);
        assert!(!m.are_results_displayed());
        assert!(m.results().is_empty());
        assert!(m.is_loading());

        let tick = armed.await.expect("tick message");
        let second = m.update(tick).expect("fetch command");
        let newer = handles.lock().unwrap().pop().expect("second handle");
        newer.send(vec![ResultItem::new("Jovi")]);
        let msg = second.await.expect("completion");
        let _ = m.update(msg);
        assert!(m.are_results_displayed());
        assert_eq!(m.results().len(), 1);
        assert_eq!(m.results()[0].text(), "Jovi");
        assert!(!m.is_loading());
    }

    #[tokio::test]
    async fn test_dropped_async_handle_yields_no_message() {
        let handles: Arc<Mutex<Vec<Done>>> = Arc::new(Mutex::new(Vec::new()));
        let parked = Arc::clone(&handles);
        let mut m = focused(
            Config::new(sync_options()).with_source(move |_: &str, done: Done| {
                parked.lock().unwrap().push(done);
            }),
        );

        let cmd = m.process_input("jo", 2).expect("fetch command");
        handles.lock().unwrap().clear();
        assert!(cmd.await.is_none());
        assert!(m.is_loading());
    }

    proptest! {
        #[test]
        fn prop_navigation_visits_every_enabled_item(
            mask in proptest::collection::vec(any::<bool>(), 1..8),
            up in any::<bool>(),
        ) {
            prop_assume!(mask.iter().any(|disabled| !disabled));

            let items: Vec<ResultItem> = mask
                .iter()
                .enumerate()
                .map(|(i, &disabled)| {
                    let item = ResultItem::new(format!("item {i}"));
                    if disabled { item.disabled() } else { item }
                })
                .collect();
            let mut m = model(Options { limit: 0, ..sync_options() });
            m.ingest_results(items);

            let direction = if up { Direction::Up } else { Direction::Down };
            let mut seen = BTreeSet::new();
            for _ in 0..mask.len() {
                m.change_index(direction);
                let index = m.result_index().expect("an enabled item is highlighted");
                prop_assert!(index < mask.len());
                seen.insert(index);
            }

            let enabled: BTreeSet<usize> = mask
                .iter()
                .enumerate()
                .filter(|(_, disabled)| !**disabled)
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(seen, enabled);
        }
    }
}

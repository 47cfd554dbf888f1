//! End-to-end controller flows against a scripted search service.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{hit, inline_controller, page, search, Reply, ScriptedApi};
use querydesk::state::SEARCH_ERROR_MESSAGE;
use querydesk::storage::{DARK_MODE_KEY, HISTORY_KEY};
use querydesk::{
    Action, AppConfig, Controller, FilterKind, FilterSelector, MemoryStore, NavKey, Page,
    SearchPage,
};

#[test]
fn successful_search_ranks_enriches_and_highlights() {
    let api = Arc::new(
        ScriptedApi::new().on_search("foo", Reply::Ok(page(vec![hit("A", "foo bar", Some(0.9))]))),
    );
    let mut controller = inline_controller(Arc::clone(&api), MemoryStore::new());

    search(&mut controller, "foo");

    let state = controller.state();
    assert!(!state.is_loading());
    assert!(state.has_searched());
    assert_eq!(state.error(), None);

    let items = controller.filtered_results();
    assert_eq!(items.len(), 1);
    let item = items[0];
    assert_eq!(item.rank, 1);
    assert_eq!(item.title, "A");
    assert_eq!(item.doc_type, "report");
    assert_eq!(item.display_url, "#");
    assert_eq!(item.score_label(), "0.900");

    let marked: Vec<&str> = querydesk::highlight_snippet(&item.snippet, state.query())
        .into_iter()
        .filter(|s| s.is_marked())
        .map(|s| s.text())
        .collect();
    assert_eq!(marked, vec!["foo"]);

    assert_eq!(api.search_calls.lock()[0], ("foo".to_string(), Page { limit: 10, offset: 0 }));
}

#[test]
fn server_error_shows_message_and_ends_loading() {
    let api = Arc::new(ScriptedApi::new().on_search("foo", Reply::Status(500)));
    let mut controller = inline_controller(api, MemoryStore::new());

    search(&mut controller, "foo");

    let state = controller.state();
    assert_eq!(state.error(), Some(SEARCH_ERROR_MESSAGE));
    assert!(state.results().is_empty());
    assert!(state.has_searched());
    assert!(!state.is_loading());
}

#[test]
fn malformed_search_body_is_an_error_too() {
    let api = Arc::new(ScriptedApi::new().on_search("foo", Reply::Malformed));
    let mut controller = inline_controller(api, MemoryStore::new());

    search(&mut controller, "foo");

    assert_eq!(controller.state().error(), Some(SEARCH_ERROR_MESSAGE));
}

#[test]
fn empty_result_list_reports_no_results() {
    let api = Arc::new(ScriptedApi::new().on_search("nothing", Reply::Ok(page(Vec::new()))));
    let mut controller = inline_controller(api, MemoryStore::new());

    assert!(!controller.state().shows_no_results());
    search(&mut controller, "nothing");
    assert!(controller.state().shows_no_results());
    assert_eq!(controller.state().error(), None);
}

#[test]
fn suggestions_shown_in_server_order() {
    let api = Arc::new(ScriptedApi::new().on_suggest(
        "qu",
        Reply::Ok(vec!["quick".into(), "quantum".into(), "query".into()]),
    ));
    let mut controller = inline_controller(api, MemoryStore::new());

    controller.dispatch(Action::InputChanged("qu".into()));
    controller.process_messages();

    let state = controller.state();
    assert!(state.suggestions_visible());
    assert_eq!(state.suggestions(), ["quick", "quantum", "query"]);
    assert_eq!(state.selected_index(), -1);
}

#[test]
fn failed_suggest_falls_back_to_generated_list() {
    let api = Arc::new(ScriptedApi::new().on_suggest("fox", Reply::Status(503)));
    let mut controller = inline_controller(api, MemoryStore::new());

    controller.dispatch(Action::InputChanged("fox".into()));
    controller.process_messages();

    assert_eq!(controller.state().suggestions(), ["fox example", "fox test"]);
    assert!(controller.state().suggestions_visible());
}

#[test]
fn suggest_sends_trimmed_text_but_fallback_keeps_raw_input() {
    let api = Arc::new(ScriptedApi::new().on_suggest("ru", Reply::Status(500)));
    let mut controller = inline_controller(Arc::clone(&api), MemoryStore::new());

    controller.dispatch(Action::InputChanged(" ru ".into()));
    controller.process_messages();

    assert_eq!(*api.suggest_calls.lock(), vec!["ru".to_string()]);
    assert_eq!(controller.state().suggestions(), [" ru  example", " ru  test"]);
}

#[test]
fn short_input_never_calls_suggest() {
    let api = Arc::new(ScriptedApi::new());
    let mut controller = inline_controller(Arc::clone(&api), MemoryStore::new());

    controller.dispatch(Action::InputChanged("q".into()));
    controller.process_messages();
    controller.dispatch(Action::InputChanged(String::new()));
    controller.process_messages();

    assert_eq!(api.suggest_count(), 0);
    assert!(!controller.state().suggestions_visible());
}

#[test]
fn keyboard_commit_replaces_query_without_searching() {
    let api = Arc::new(
        ScriptedApi::new().on_suggest("ru", Reply::Ok(vec!["rust".into(), "ruby".into()])),
    );
    let mut controller = inline_controller(Arc::clone(&api), MemoryStore::new());

    controller.dispatch(Action::InputChanged("ru".into()));
    controller.process_messages();
    for _ in 0..5 {
        controller.dispatch(Action::Key(NavKey::ArrowDown));
    }
    assert_eq!(controller.state().selected(), Some(1));
    controller.dispatch(Action::Key(NavKey::Enter));

    assert_eq!(controller.state().query(), "ruby");
    assert!(!controller.state().suggestions_visible());
    assert_eq!(api.search_count(), 0);
}

#[test]
fn history_keeps_five_most_recent_distinct_queries() {
    let store = MemoryStore::new();
    let api = Arc::new(ScriptedApi::new());
    let mut controller = inline_controller(api, store.clone());

    for query in ["a1", "a2", "a3", "a2", "a4", "a5", "a6"] {
        search(&mut controller, query);
    }

    assert_eq!(
        controller.state().history().entries(),
        ["a6", "a5", "a4", "a2", "a3"]
    );
    assert_eq!(
        store.snapshot().get(HISTORY_KEY).map(String::as_str),
        Some(r#"["a6","a5","a4","a2","a3"]"#)
    );
}

#[test]
fn repeated_query_is_remembered_once() {
    let mut controller = inline_controller(Arc::new(ScriptedApi::new()), MemoryStore::new());

    search(&mut controller, "same");
    search(&mut controller, "same");

    assert_eq!(controller.state().history().entries(), ["same"]);
}

#[test]
fn history_and_theme_survive_restart() {
    let store = MemoryStore::new();
    {
        let mut controller = inline_controller(Arc::new(ScriptedApi::new()), store.clone());
        search(&mut controller, "first");
        controller.dispatch(Action::ToggleDarkMode);
    }
    assert_eq!(store.snapshot().get(DARK_MODE_KEY).map(String::as_str), Some("true"));

    let controller = inline_controller(Arc::new(ScriptedApi::new()), store);
    assert_eq!(controller.state().history().entries(), ["first"]);
    assert!(controller.state().dark_mode());
}

#[test]
fn garbage_in_storage_starts_clean() {
    let store = MemoryStore::new()
        .with_entry(HISTORY_KEY, "{not json")
        .with_entry(DARK_MODE_KEY, "yes");
    let controller = inline_controller(Arc::new(ScriptedApi::new()), store);

    assert!(controller.state().history().is_empty());
    assert!(!controller.state().dark_mode());
}

#[test]
fn history_pick_fills_query_and_requests_focus() {
    let api = Arc::new(ScriptedApi::new());
    let mut controller = inline_controller(Arc::clone(&api), MemoryStore::new());
    search(&mut controller, "older");

    controller.dispatch(Action::HistoryPicked("older".into()));

    assert_eq!(controller.state().query(), "older");
    assert!(controller.take_focus_request());
    assert_eq!(api.search_count(), 1);
}

#[test]
fn filters_narrow_results_and_reset_on_new_search() {
    let results = (0..6)
        .map(|i| hit(&format!("doc {}", i), "text", Some(0.1 * i as f64)))
        .collect();
    let api = Arc::new(
        ScriptedApi::new()
            .on_search("docs", Reply::Ok(page(results)))
            .on_search("again", Reply::Ok(page(vec![hit("x", "y", None)]))),
    );
    let mut controller = inline_controller(api, MemoryStore::new());
    search(&mut controller, "docs");

    controller.dispatch(Action::FilterChanged(
        FilterKind::DocType,
        FilterSelector::value("note"),
    ));
    let notes: Vec<usize> = controller.filtered_results().iter().map(|r| r.rank).collect();
    assert_eq!(notes, vec![2, 4, 6]);

    controller.dispatch(Action::FilterChanged(FilterKind::Rank, FilterSelector::value("4")));
    let narrowed: Vec<usize> = controller.filtered_results().iter().map(|r| r.rank).collect();
    assert_eq!(narrowed, vec![4]);

    search(&mut controller, "again");
    assert!(controller.state().filters().is_unfiltered());
    assert_eq!(controller.filtered_results().len(), 1);
}

#[test]
fn blank_query_is_not_submitted() {
    let api = Arc::new(ScriptedApi::new());
    let mut controller = inline_controller(Arc::clone(&api), MemoryStore::new());

    search(&mut controller, "   ");

    assert_eq!(api.search_count(), 0);
    assert!(!controller.state().has_searched());
    assert!(controller.state().history().is_empty());
}

#[test]
fn stale_search_response_is_ignored() {
    let api = Arc::new(
        ScriptedApi::new()
            .on_search("old", Reply::Ok(page(vec![hit("old", "", None)])))
            .on_search("new", Reply::Ok(page(vec![hit("new", "", None)]))),
    );
    let mut controller = inline_controller(api, MemoryStore::new());
    search(&mut controller, "old");
    search(&mut controller, "new");

    let stale_seq = controller.state().latest_search_seq() - 1;
    controller.dispatch(Action::SearchSucceeded {
        seq: stale_seq,
        page: SearchPage {
            results: vec![hit("old", "", None)],
            total: None,
        },
    });

    assert_eq!(controller.state().results()[0].title, "new");
}

#[test]
fn background_mode_delivers_on_drain() {
    let api = Arc::new(
        ScriptedApi::new().on_search("bg", Reply::Ok(page(vec![hit("B", "bg text", None)]))),
    );
    let mut controller = Controller::new(&AppConfig::default(), api, Box::new(MemoryStore::new()));

    controller.dispatch(Action::QueryCommitted("bg".into()));
    controller.dispatch(Action::Submit);
    assert!(controller.state().is_loading());

    let handled = controller.wait_for_messages(Duration::from_secs(5));
    assert_eq!(handled, 1);
    assert!(!controller.state().is_loading());
    assert_eq!(controller.state().results().len(), 1);
}

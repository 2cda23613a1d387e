use std::sync::Arc;
use std::time::Duration;

use kotoba_core::dictionary::{Dictionary, DictionaryEntry, DictionaryMetadata, LookupPattern};
use kotoba_core::error::DictionaryError;
use kotoba_core::types::AppEvent;
use kotoba_lang_japanese::{QueryNormalizer, SearchOrchestrator, SearchState, SearchStatus};

use super::{drain, test_state};
use crate::controller::ChannelSet;
use crate::events::event_loop;
use crate::events::search::{
    drive_search, handle_query, handle_quick_query, handle_select_suggestion, show_search,
};

fn result_terms(events: &[AppEvent], wanted: &str) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ShowResults { title, results, .. } if title == wanted => {
                Some(results.iter().map(|r| r.term.clone()).collect::<Vec<_>>())
            }
            _ => None,
        })
        .flatten()
        .collect()
}

#[tokio::test]
async fn query_streams_log_results_and_suggestions() {
    let state = test_state();
    let (tx, rx) = kanal::unbounded_async();

    handle_query(state.clone(), "kite".into(), &tx).await.unwrap();
    let events = drain(&rx).await;

    assert!(events.iter().any(|e| matches!(e, AppEvent::ShowLog(_))));
    assert_eq!(result_terms(&events, "Exact matches"), vec!["来手"]);

    let suggestions: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ShowSuggestions(results) => Some(results),
            _ => None,
        })
        .flatten()
        .map(|r| r.term.as_str())
        .collect();
    assert_eq!(suggestions, vec!["切手"]);

    let session = state.session.lock().await;
    assert_eq!(session.status, SearchStatus::Done);
    assert_eq!(session.canonical_query, "きて");
}

#[tokio::test]
async fn selecting_a_suggestion_searches_its_headword() {
    let state = test_state();
    let (tx, rx) = kanal::unbounded_async();

    handle_query(state.clone(), "kite".into(), &tx).await.unwrap();
    drain(&rx).await;

    handle_select_suggestion(state.clone(), 1, &tx).await.unwrap();
    let events = drain(&rx).await;
    assert_eq!(result_terms(&events, "Exact matches"), vec!["切手"]);

    handle_select_suggestion(state.clone(), 9, &tx).await.unwrap();
    assert!(matches!(drain(&rx).await.as_slice(), [AppEvent::Error(_)]));
}

#[tokio::test]
async fn single_kana_gets_one_guidance_line() {
    let state = test_state();
    let (tx, rx) = kanal::unbounded_async();

    handle_query(state.clone(), "a".into(), &tx).await.unwrap();
    let events = drain(&rx).await;

    match events.as_slice() {
        [AppEvent::ShowLog(lines)] => assert_eq!(lines.len(), 1),
        other => panic!("unexpected events: {other:?}"),
    }
    assert_eq!(state.session.lock().await.status, SearchStatus::Invalid);
}

#[tokio::test]
async fn no_results_is_a_notice_not_an_error() {
    let state = test_state();
    let (tx, rx) = kanal::unbounded_async();

    handle_query(state, "ぬぬぬ".into(), &tx).await.unwrap();
    let events = drain(&rx).await;

    assert!(events.iter().any(|e| matches!(e, AppEvent::Notify(m) if m.contains("No results"))));
    assert!(!events.iter().any(|e| matches!(e, AppEvent::Error(_))));
}

#[tokio::test]
async fn repeated_query_redisplays_without_searching_again() {
    let state = test_state();
    let (tx, rx) = kanal::unbounded_async();

    handle_query(state.clone(), "がく".into(), &tx).await.unwrap();
    let first = drain(&rx).await;
    assert_eq!(result_terms(&first, "Prefix matches"), vec!["学生"]);

    handle_query(state.clone(), " がく ".into(), &tx).await.unwrap();
    let second = drain(&rx).await;
    assert!(!second.iter().any(|e| matches!(e, AppEvent::ShowLog(_))));
    assert_eq!(result_terms(&second, "Prefix matches"), vec!["学生"]);
}

#[tokio::test]
async fn quick_query_ranks_converted_han() {
    let state = test_state();
    let (tx, rx) = kanal::unbounded_async();

    handle_quick_query(state, "学".into(), &tx).await.unwrap();
    let events = drain(&rx).await;

    match events.as_slice() {
        [AppEvent::ShowResults { numbered_from: None, results, .. }] => {
            let terms: Vec<&str> = results.iter().map(|r| r.term.as_str()).collect();
            assert_eq!(terms, vec!["学校", "学生"]);
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

/// Exact lookups answer at once, prefix lookups stall
struct StallingPrefix(Vec<DictionaryEntry>);

impl Dictionary for StallingPrefix {
    fn lookup(&self, pattern: &LookupPattern<'_>) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        if pattern.is_prefix() {
            std::thread::sleep(Duration::from_millis(300));
            return Ok(Vec::new());
        }
        Ok(self
            .0
            .iter()
            .filter(|e| e.reading_forms.iter().any(|r| r == pattern.term()))
            .cloned()
            .collect())
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "stalling".into(),
            version: "0".into(),
            language: "ja".into(),
            entry_count: self.0.len(),
        }
    }
}

#[tokio::test]
async fn slow_tier_is_skipped_and_results_kept() {
    let taberu = super::entry("1358280", &["食べる"], &["たべる"], &["to eat"]);
    let dict = StallingPrefix(vec![taberu]);
    let orchestrator = SearchOrchestrator::new(Arc::new(dict), QueryNormalizer::default());
    let (tx, rx) = kanal::unbounded_async();

    let mut search = SearchState::new();
    assert!(orchestrator.submit_query(&mut search, "taberu"));
    let search = drive_search(&orchestrator, search, Duration::from_millis(50), &tx)
        .await
        .unwrap();

    assert_eq!(search.status, SearchStatus::Done);
    assert_eq!(search.tier1_entries.len(), 1);
    assert!(search.error.is_none());
    assert!(search.log.iter().any(|l| l.contains("timed out")));

    let forwarded: usize = drain(&rx)
        .await
        .iter()
        .map(|e| match e {
            AppEvent::ShowLog(lines) => lines.len(),
            _ => 0,
        })
        .sum();
    assert_eq!(forwarded, search.log.len());
}

/// Prefix lookups answer at once, exact lookups stall
struct StallingExact(Vec<DictionaryEntry>);

impl Dictionary for StallingExact {
    fn lookup(&self, pattern: &LookupPattern<'_>) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        if !pattern.is_prefix() {
            std::thread::sleep(Duration::from_millis(300));
            return Ok(Vec::new());
        }
        Ok(self
            .0
            .iter()
            .filter(|e| e.reading_forms.iter().any(|r| r.starts_with(pattern.term())))
            .cloned()
            .collect())
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "stalling-exact".into(),
            version: "0".into(),
            language: "ja".into(),
            entry_count: self.0.len(),
        }
    }
}

#[tokio::test]
async fn slow_exact_tier_falls_through_to_prefix() {
    let taberu = super::entry("1358280", &["食べる"], &["たべる"], &["to eat"]);
    let dict = StallingExact(vec![taberu]);
    let orchestrator = SearchOrchestrator::new(Arc::new(dict), QueryNormalizer::default());
    let (tx, rx) = kanal::unbounded_async();

    let mut search = SearchState::new();
    assert!(orchestrator.submit_query(&mut search, "taberu"));
    let search = drive_search(&orchestrator, search, Duration::from_millis(50), &tx)
        .await
        .unwrap();
    drain(&rx).await;

    assert_eq!(search.status, SearchStatus::Done);
    assert_eq!(search.canonical_query, "たべる");
    assert!(search.tier1_entries.is_empty());
    assert_eq!(search.tier2_entries.len(), 1);
    assert_eq!(search.skipped, vec![SearchStatus::SearchingTier1]);

    show_search(&search, &tx).await.unwrap();
    let events = drain(&rx).await;
    assert_eq!(result_terms(&events, "Prefix matches"), vec!["食べる"]);
    assert!(events.iter().any(|e| matches!(e, AppEvent::Notify(m) if m.contains("Skipped tier 1"))));
    assert!(!events.iter().any(|e| matches!(e, AppEvent::Notify(m) if m.contains("No results"))));
}

#[tokio::test]
async fn timed_out_empty_search_is_not_reported_as_no_results() {
    let dict = StallingExact(Vec::new());
    let orchestrator = SearchOrchestrator::new(Arc::new(dict), QueryNormalizer::default());
    let (tx, rx) = kanal::unbounded_async();

    let mut search = SearchState::new();
    assert!(orchestrator.submit_query(&mut search, "ぬぬぬ"));
    let search = drive_search(&orchestrator, search, Duration::from_millis(50), &tx)
        .await
        .unwrap();
    drain(&rx).await;

    assert!(search.found_ids.is_empty());
    assert!(!search.is_no_results());

    show_search(&search, &tx).await.unwrap();
    let events = drain(&rx).await;
    assert!(events.iter().any(|e| matches!(e, AppEvent::Notify(m) if m.contains("incomplete"))));
    assert!(!events.iter().any(|e| matches!(e, AppEvent::Notify(m) if m.contains("No results"))));
}

#[tokio::test]
async fn event_loop_answers_ready_and_stops_on_quit() {
    let state = test_state();
    let channels = ChannelSet::new();

    let handle = tokio::spawn(event_loop(
        state,
        channels.ui_to_app.1.clone(),
        channels.app_to_ui.0.clone(),
    ));

    channels.ui_to_app.0.send(AppEvent::Query("学校".into())).await.unwrap();
    channels.ui_to_app.0.send(AppEvent::Quit).await.unwrap();

    let result = tokio::time::timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));

    let events = drain(&channels.app_to_ui.1).await;
    assert_eq!(result_terms(&events, "Exact matches"), vec!["学校"]);
    assert!(matches!(events.as_slice(), [.., AppEvent::Ready, AppEvent::Quit]));
}

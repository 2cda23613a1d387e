use std::sync::Arc;
use std::time::{Duration, Instant};

use kanal::AsyncSender;
use kotoba_core::dictionary::DictionaryEntry;
use kotoba_core::error::SearchError;
use kotoba_core::preprocess::{DefaultPreprocessor, Preprocessor};
use kotoba_core::types::{AppEvent, DisplayResult};
use kotoba_lang_japanese::{SearchOrchestrator, SearchState, SearchStatus};

use crate::state::AppState;

pub async fn handle_query(
    state: Arc<AppState>,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let query = DefaultPreprocessor.process(&text);
    if query.is_empty() {
        return Ok(());
    }

    let tick_timeout = {
        let config = state.config.read().await;
        Duration::from_millis(config.search.tick_timeout_ms)
    };
    let orchestrator = state.processor.orchestrator();

    let mut session = state.session.lock().await;
    if !orchestrator.submit_query(&mut session, &query) {
        tracing::debug!("'{}' is already the current query", query);
        return show_search(&session, app_to_ui_tx).await;
    }

    tracing::info!("Searching for '{}'", query);
    let submitted = std::mem::take(&mut *session);
    *session = drive_search(&orchestrator, submitted, tick_timeout, app_to_ui_tx).await?;

    show_search(&session, app_to_ui_tx).await
}

/// Advance `search` one tier at a time on the blocking pool until it is
/// terminal. A tier exceeding `tick_timeout` is skipped. New log lines are
/// forwarded after every tier.
pub async fn drive_search(
    orchestrator: &SearchOrchestrator,
    mut search: SearchState,
    tick_timeout: Duration,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<SearchState> {
    let mut sent = forward_log(&search, 0, app_to_ui_tx).await?;

    while !search.status.is_terminal() && search.status != SearchStatus::Idle {
        let before = search.clone();
        let tier = orchestrator.clone();
        let started = Instant::now();

        let tick = tokio::task::spawn_blocking(move || tier.advance(search));

        search = match tokio::time::timeout(tick_timeout, tick).await {
            Ok(Ok(next)) => next,
            Ok(Err(e)) => {
                let mut failed = before;
                failed.fail(SearchError::LookupServiceFailure(format!(
                    "search task failed: {e}"
                )));
                failed
            }
            Err(_) => {
                let mut skipped = before;
                let timeout = SearchError::Timeout {
                    stage: skipped.status.to_string(),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                };
                skipped.skip_tier(&timeout);
                skipped
            }
        };

        sent = forward_log(&search, sent, app_to_ui_tx).await?;
    }

    Ok(search)
}

async fn forward_log(
    search: &SearchState,
    sent: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<usize> {
    if search.log.len() > sent {
        app_to_ui_tx
            .send(AppEvent::ShowLog(search.log[sent..].to_vec()))
            .await?;
    }
    Ok(search.log.len())
}

fn display(entries: &[DictionaryEntry]) -> Vec<DisplayResult> {
    entries.iter().map(DisplayResult::from).collect()
}

/// Send the tiers, suggestions and outcome of a search to the UI
pub async fn show_search(
    search: &SearchState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let tiers = [
        ("Exact matches", &search.tier1_entries),
        ("Prefix matches", &search.tier2_entries),
        ("Tolerant matches", &search.tier3_entries),
    ];

    let mut next_number = 1;
    for (title, entries) in tiers {
        if entries.is_empty() {
            continue;
        }
        app_to_ui_tx
            .send(AppEvent::ShowResults {
                title: title.to_string(),
                numbered_from: Some(next_number),
                results: display(entries),
            })
            .await?;
        next_number += entries.len();

        // Suggestions sit right after the exact matches
        if title == "Exact matches" && !search.suggestions.is_empty() {
            app_to_ui_tx
                .send(AppEvent::ShowSuggestions(display(&search.suggestions)))
                .await?;
        }
    }

    if search.tier1_entries.is_empty() && !search.suggestions.is_empty() {
        app_to_ui_tx
            .send(AppEvent::ShowSuggestions(display(&search.suggestions)))
            .await?;
    }

    if !search.skipped.is_empty() {
        let tiers: Vec<String> = search.skipped.iter().map(ToString::to_string).collect();
        app_to_ui_tx
            .send(AppEvent::Notify(format!(
                "Skipped {} for '{}', results may be incomplete.",
                tiers.join(", "),
                search.raw_query
            )))
            .await?;
    }

    if let Some(error) = &search.error {
        if search.status == SearchStatus::Done {
            app_to_ui_tx
                .send(AppEvent::Error(format!("Search error: {error}")))
                .await?;
        }
    } else if search.is_no_results() {
        app_to_ui_tx
            .send(AppEvent::Notify(format!(
                "No results for '{}'. Try another word.",
                search.raw_query
            )))
            .await?;
    }

    Ok(())
}

/// Search for the headword of the n-th suggestion (1-based)
pub async fn handle_select_suggestion(
    state: Arc<AppState>,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let headword = {
        let session = state.session.lock().await;
        index
            .checked_sub(1)
            .and_then(|i| session.suggestions.get(i))
            .map(|entry| entry.headword().to_string())
    };

    match headword {
        Some(word) => handle_query(state, word, app_to_ui_tx).await,
        None => {
            app_to_ui_tx
                .send(AppEvent::Error(format!("No suggestion #{index}")))
                .await?;
            Ok(())
        }
    }
}

pub async fn handle_quick_query(
    state: Arc<AppState>,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let query = DefaultPreprocessor.process(&text);
    if query.is_empty() {
        return Ok(());
    }

    let processor_state = state.clone();
    let lookup = query.clone();
    let result =
        tokio::task::spawn_blocking(move || processor_state.processor.quick_search(&lookup))
            .await?;

    match result {
        Ok(entries) if entries.is_empty() => {
            app_to_ui_tx
                .send(AppEvent::Notify(format!("No results for '{query}'.")))
                .await?;
        }
        Ok(entries) => {
            app_to_ui_tx
                .send(AppEvent::ShowResults {
                    title: format!("{} results", entries.len()),
                    numbered_from: None,
                    results: display(&entries),
                })
                .await?;
        }
        Err(e) => {
            tracing::error!("Quick search for '{}' failed: {}", query, e);
            app_to_ui_tx
                .send(AppEvent::Error(format!("Search error: {e}")))
                .await?;
        }
    }

    Ok(())
}

use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kotoba_core::types::AppEvent;

use crate::state::AppState;

pub mod favorites;
pub mod search;

use favorites::{handle_add_favorite, handle_list_favorites, handle_remove_favorite};
use search::{handle_query, handle_quick_query, handle_select_suggestion};

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!(
        "[EVENT_LOOP] Starting with {} dictionary entries",
        state.processor.dictionary().metadata().entry_count
    );

    loop {
        let event = ui_to_app_rx.recv().await?;
        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);

        if matches!(event, AppEvent::Quit) {
            app_to_ui_tx.send(AppEvent::Quit).await?;
            tracing::info!("[EVENT_LOOP] Quit");
            return Ok(());
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
        app_to_ui_tx.send(AppEvent::Ready).await?;
    }
}

/// Dispatch one user request. Only channel failures are returned as errors,
/// everything else is reported to the UI.
pub async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Query(text) => {
            handle_query(state, text, app_to_ui_tx).await?;
        }
        AppEvent::QuickQuery(text) => {
            handle_quick_query(state, text, app_to_ui_tx).await?;
        }
        AppEvent::SelectSuggestion(index) => {
            handle_select_suggestion(state, index, app_to_ui_tx).await?;
        }
        AppEvent::AddFavorite(index) => {
            handle_add_favorite(state, index, app_to_ui_tx).await?;
        }
        AppEvent::RemoveFavorite { word, definition } => {
            handle_remove_favorite(state, &word, &definition, app_to_ui_tx).await?;
        }
        AppEvent::ListFavorites => {
            handle_list_favorites(state, app_to_ui_tx).await?;
        }
        AppEvent::ShowLog(_)
        | AppEvent::ShowResults { .. }
        | AppEvent::ShowSuggestions(_)
        | AppEvent::ShowFavorites(_)
        | AppEvent::Notify(_)
        | AppEvent::Error(_)
        | AppEvent::Ready
        | AppEvent::Quit => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}

use std::sync::Arc;

use kanal::AsyncSender;
use kotoba_core::favorites::FavoriteRecord;
use kotoba_core::types::AppEvent;
use kotoba_favorites::InsertOutcome;

use crate::state::AppState;

/// Save the n-th result (1-based, across all tiers) of the current search
pub async fn handle_add_favorite(
    state: Arc<AppState>,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let record = {
        let session = state.session.lock().await;
        index
            .checked_sub(1)
            .and_then(|i| session.all_entries().nth(i))
            .map(FavoriteRecord::from_entry)
    };

    let Some(record) = record else {
        app_to_ui_tx
            .send(AppEvent::Error(format!("No result #{index} to save")))
            .await?;
        return Ok(());
    };

    let message = match state.favorites.insert(&record) {
        Ok(InsertOutcome::Added) => {
            tracing::info!("Saved favorite '{}'", record.word);
            AppEvent::Notify(format!("'{}' added to favorites.", record.word))
        }
        Ok(InsertOutcome::Duplicate) => {
            AppEvent::Notify(format!("'{}' is already in favorites.", record.word))
        }
        Err(e) => {
            tracing::error!("Failed to save favorite '{}': {}", record.word, e);
            AppEvent::Error(format!("Could not save '{}': {e}", record.word))
        }
    };

    app_to_ui_tx.send(message).await?;
    Ok(())
}

pub async fn handle_remove_favorite(
    state: Arc<AppState>,
    word: &str,
    definition: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let message = match state.favorites.remove(word, definition) {
        Ok(true) => AppEvent::Notify(format!("'{word}' removed from favorites.")),
        Ok(false) => AppEvent::Notify(format!("'{word}' is not in favorites.")),
        Err(e) => {
            tracing::error!("Failed to remove favorite '{}': {}", word, e);
            AppEvent::Error(format!("Could not remove '{word}': {e}"))
        }
    };

    app_to_ui_tx.send(message).await?;
    Ok(())
}

pub async fn handle_list_favorites(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let message = match state.favorites.list() {
        Ok(records) => AppEvent::ShowFavorites(records),
        Err(e) => {
            tracing::error!("Failed to list favorites: {}", e);
            AppEvent::Error(format!("Could not read favorites: {e}"))
        }
    };

    app_to_ui_tx.send(message).await?;
    Ok(())
}

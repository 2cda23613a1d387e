use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncReceiver;
use kotoba_config::Config;
use kotoba_core::dictionary::{DictionaryEntry, Sense};
use kotoba_core::types::AppEvent;
use kotoba_favorites::FavoritesStore;
use kotoba_lang_japanese::{JMdict, JapaneseProcessor};
use tokio::time::timeout;

use crate::state::AppState;

mod search_flow_tests;
mod ui_tests;

fn entry(id: &str, written: &[&str], readings: &[&str], glosses: &[&str]) -> DictionaryEntry {
    DictionaryEntry {
        id: id.into(),
        written_forms: written.iter().map(|s| s.to_string()).collect(),
        reading_forms: readings.iter().map(|s| s.to_string()).collect(),
        senses: glosses
            .iter()
            .map(|g| Sense {
                part_of_speech: vec!["n".into()],
                misc: Vec::new(),
                gloss: g.to_string(),
            })
            .collect(),
        priority_tags: Default::default(),
    }
}

pub fn test_state() -> Arc<AppState> {
    let dict = JMdict::from_entries(vec![
        entry("1358280", &["食べる"], &["たべる"], &["to eat", "to live on"]),
        entry("1206900", &["学校"], &["がっこう"], &["school"]),
        entry("1206720", &["学生"], &["がくせい"], &["student"]),
        entry("1438240", &["切手"], &["きって"], &["postage stamp"]),
        entry("1208990", &["来手"], &["きて"], &["comer"]),
    ]);

    let config = Config::default();
    let processor = JapaneseProcessor::with_dictionary(dict, &config.converter).unwrap();
    let favorites = FavoritesStore::open_in_memory().unwrap();
    Arc::new(AppState::with_parts(config, processor, favorites))
}

/// Drain everything currently queued on the UI side
pub async fn drain(rx: &AsyncReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(Ok(event)) = timeout(Duration::from_millis(50), rx.recv()).await {
        events.push(event);
    }
    events
}

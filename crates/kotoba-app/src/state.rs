use std::sync::Arc;

use anyhow::Context;
use kotoba_config::Config;
use kotoba_favorites::FavoritesStore;
use kotoba_lang_japanese::{JapaneseProcessor, SearchState};
use tokio::sync::{Mutex, RwLock};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub processor: JapaneseProcessor,
    pub favorites: FavoritesStore,
    /// The staged search the user is currently looking at
    pub session: Mutex<SearchState>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let processor = JapaneseProcessor::from_config(&config).with_context(|| {
            format!("failed to load dictionary from {}", config.dictionary.path)
        })?;

        let favorites = FavoritesStore::open(&config.favorites.db_path).with_context(|| {
            format!("failed to open favorites at {}", config.favorites.db_path)
        })?;

        Ok(Self::with_parts(config, processor, favorites))
    }

    pub fn with_parts(config: Config, processor: JapaneseProcessor, favorites: FavoritesStore) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            processor,
            favorites,
            session: Mutex::new(SearchState::new()),
        }
    }
}

use std::sync::{Arc, LazyLock};

use kotoba_config::HanRegion;
use kotoba_core::convert::{HanConverter, RomajiConverter};
use kotoba_core::error::ConvertError;

use crate::classifier::Script;
use crate::han::OpenccConverter;
use crate::romaji::HepburnConverter;

/// Turns classified input into the canonical Japanese-script query
#[derive(Clone)]
pub struct QueryNormalizer {
    romaji: Arc<dyn RomajiConverter>,
    han: Arc<dyn HanConverter>,
}

impl QueryNormalizer {
    pub fn new(romaji: Arc<dyn RomajiConverter>, han: Arc<dyn HanConverter>) -> Self {
        Self { romaji, han }
    }

    pub fn normalize(&self, text: &str, script: Script) -> Result<String, ConvertError> {
        match script {
            Script::Romaji => self.romaji.to_hiragana(text),
            Script::HanOrJapanese => self.han.convert(text),
        }
    }

    pub fn han(&self) -> &dyn HanConverter {
        self.han.as_ref()
    }
}

static BUILTIN: LazyLock<QueryNormalizer> = LazyLock::new(|| {
    QueryNormalizer::new(
        Arc::new(HepburnConverter::new()),
        Arc::new(OpenccConverter::builtin(HanRegion::Simplified)),
    )
});

/// Built-in tables, simplified Chinese input. Tables are built once per process.
impl Default for QueryNormalizer {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

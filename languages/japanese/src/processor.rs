use std::path::Path;
use std::sync::Arc;

use kotoba_config::Config;
use kotoba_config::converter::ConverterConfig;
use kotoba_core::dictionary::{Dictionary, DictionaryEntry};
use kotoba_core::error::{ConvertError, DictionaryError, SearchError};

use crate::dictionary::JMdict;
use crate::han::OpenccConverter;
use crate::loader::JMdictLoader;
use crate::normalizer::QueryNormalizer;
use crate::quick::quick_search;
use crate::romaji::HepburnConverter;
use crate::search::SearchOrchestrator;

#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Japanese language processor: dictionary, converters and search settings
pub struct JapaneseProcessor {
    dictionary: Arc<dyn Dictionary>,
    normalizer: QueryNormalizer,
    result_limit: usize,
    suggestion_limit: usize,
}

impl JapaneseProcessor {
    /// Wrap an already loaded dictionary with the built-in converters
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            dictionary,
            normalizer: QueryNormalizer::default(),
            result_limit: kotoba_config::search::SearchConfig::default().result_limit,
            suggestion_limit: crate::search::DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Load the dictionaries and conversion tables named in `config`
    pub fn from_config(config: &Config) -> Result<Self, ProcessorError> {
        let dict = JMdictLoader::load_with_additional(
            Path::new(&config.dictionary.path),
            &config.dictionary.additional_paths,
        )?;

        let mut processor = Self::with_dictionary(dict, &config.converter)?;
        processor.result_limit = config.search.result_limit;
        processor.suggestion_limit = config.search.suggestion_limit;
        Ok(processor)
    }

    pub fn with_dictionary(dict: JMdict, converter: &ConverterConfig) -> Result<Self, ProcessorError> {
        let han = OpenccConverter::with_tables(
            converter.region,
            converter.to_traditional.as_deref().map(Path::new),
            converter.traditional_to_japanese.as_deref().map(Path::new),
        )?;
        tracing::info!("Han conversion region: {:?}", han.region());

        let mut processor = Self::new(Arc::new(dict));
        processor.normalizer =
            QueryNormalizer::new(Arc::new(HepburnConverter::new()), Arc::new(han));
        Ok(processor)
    }

    pub fn dictionary(&self) -> &Arc<dyn Dictionary> {
        &self.dictionary
    }

    /// Orchestrator sharing this processor's dictionary and converters
    pub fn orchestrator(&self) -> SearchOrchestrator {
        SearchOrchestrator::new(self.dictionary.clone(), self.normalizer.clone())
            .with_suggestion_limit(self.suggestion_limit)
    }

    pub fn quick_search(&self, raw_query: &str) -> Result<Vec<DictionaryEntry>, SearchError> {
        quick_search(
            self.dictionary.as_ref(),
            self.normalizer.han(),
            raw_query,
            self.result_limit,
        )
    }
}

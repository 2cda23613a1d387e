pub mod classifier;
pub mod dictionary;
pub mod han;
pub mod loader;
pub mod normalizer;
pub mod processor;
pub mod quick;
pub mod ranking;
pub mod romaji;
pub mod search;
pub mod suggest;
pub mod variants;

#[cfg(test)]
mod testutil;

pub use classifier::{Script, classify};
pub use dictionary::JMdict;
pub use han::OpenccConverter;
pub use loader::JMdictLoader;
pub use normalizer::QueryNormalizer;
pub use processor::{JapaneseProcessor, ProcessorError};
pub use quick::quick_search;
pub use ranking::rank;
pub use romaji::HepburnConverter;
pub use search::{SearchOrchestrator, SearchState, SearchStatus};
pub use suggest::find_suggestions;
pub use variants::{geminate_variants, tolerant_queries};

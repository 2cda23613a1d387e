use std::path::Path;

use kotoba_core::error::DictionaryError;

use crate::dictionary::JMdict;

pub struct JMdictLoader;

impl JMdictLoader {
    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<JMdict, DictionaryError> {
        if !path.exists() {
            return Err(DictionaryError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading JMdict from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let dict = JMdict::from_json(&json)?;
        tracing::info!("Loaded {} dictionary entries from file", dict.entry_count());
        Ok(dict)
    }

    /// Load the main dictionary and merge additional ones on top.
    /// A broken additional dictionary is skipped with a warning, a broken
    /// main dictionary is an error.
    pub fn load_with_additional(
        main: &Path,
        additional_paths: &[String],
    ) -> Result<JMdict, DictionaryError> {
        let mut dict = Self::load_from_file(main)?;

        for path in additional_paths {
            match Self::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional dictionary from: {}", path);
                    dict = Self::merge(dict, additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load dictionary from {}: {}", path, e);
                }
            }
        }

        Ok(dict)
    }

    /// Merge two dictionaries (later entries override earlier ones by ID)
    pub fn merge(base: JMdict, additional: JMdict) -> JMdict {
        base.merge(additional)
    }
}

use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryEntry;

/// Saved word, unique on `(word, definition)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub word: String,
    pub reading: String,
    pub definition: String,
}

impl FavoriteRecord {
    pub fn new(word: impl Into<String>, reading: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            reading: reading.into(),
            definition: definition.into(),
        }
    }

    pub fn from_entry(entry: &DictionaryEntry) -> Self {
        Self {
            word: entry.headword().to_string(),
            reading: entry.primary_reading().to_string(),
            definition: entry.definition_text(),
        }
    }
}

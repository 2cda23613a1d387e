use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DictionaryError;

/// Wildcard suffix marking a left-anchored prefix lookup
pub const PREFIX_WILDCARD: char = '%';

pub type EntryId = String;

/// Marker for sources that only flag a form as common, without the
/// individual JMdict priority lists
pub const COMMON_PRIORITY_TAG: &str = "common";

/// Dictionary lookup service
pub trait Dictionary: Send + Sync {
    /// Look up entries matching the pattern, in service order
    fn lookup(&self, pattern: &LookupPattern<'_>) -> Result<Vec<DictionaryEntry>, DictionaryError>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;

    fn lookup_exact(&self, query: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        self.lookup(&LookupPattern::Exact(query))
    }

    fn lookup_prefix(&self, query: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        self.lookup(&LookupPattern::Prefix(query))
    }
}

/// How a term is matched against written and reading forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPattern<'a> {
    Exact(&'a str),
    Prefix(&'a str),
}

impl<'a> LookupPattern<'a> {
    pub fn term(&self) -> &'a str {
        match self {
            LookupPattern::Exact(term) | LookupPattern::Prefix(term) => term,
        }
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self, LookupPattern::Prefix(_))
    }
}

impl std::fmt::Display for LookupPattern<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupPattern::Exact(term) => write!(f, "{term}"),
            LookupPattern::Prefix(term) => write!(f, "{term}{PREFIX_WILDCARD}"),
        }
    }
}

/// One meaning of an entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sense {
    pub part_of_speech: Vec<String>,
    /// Miscellaneous markers (usage notes, commonality markers)
    pub misc: Vec<String>,
    pub gloss: String,
}

/// Dictionary entry as returned by the lookup service.
///
/// At least one of `written_forms` / `reading_forms` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: EntryId,
    pub written_forms: Vec<String>,
    pub reading_forms: Vec<String>,
    pub senses: Vec<Sense>,
    /// Commonality markers attached to any written or reading form
    /// (`ichi1`, `news1`, ... or [`COMMON_PRIORITY_TAG`])
    pub priority_tags: BTreeSet<String>,
}

impl DictionaryEntry {
    /// First written form, falling back to the first reading
    pub fn headword(&self) -> &str {
        self.written_forms
            .first()
            .or_else(|| self.reading_forms.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn primary_reading(&self) -> &str {
        self.reading_forms
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Numbered senses joined into one line: `"1. to eat; 2. to live on"`
    pub fn definition_text(&self) -> String {
        self.senses
            .iter()
            .enumerate()
            .map(|(i, sense)| format!("{}. {}", i + 1, sense.gloss))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub version: String,
    pub language: String,
    pub entry_count: usize,
}

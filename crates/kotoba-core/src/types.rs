use crate::dictionary::DictionaryEntry;
use crate::favorites::FavoriteRecord;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Start a staged search
    Query(String),
    /// Single-shot lookup with ranking
    QuickQuery(String),
    /// Resubmit the n-th suggestion (1-based) as a new query
    SelectSuggestion(usize),
    /// Save the n-th result (1-based) of the last search
    AddFavorite(usize),
    RemoveFavorite {
        word: String,
        definition: String,
    },
    ListFavorites,
    ShowLog(Vec<String>),
    ShowResults {
        title: String,
        /// Number of the first result when results can be referenced by index
        numbered_from: Option<usize>,
        results: Vec<DisplayResult>,
    },
    /// "Did you mean" entries, selectable with `SelectSuggestion`
    ShowSuggestions(Vec<DisplayResult>),
    ShowFavorites(Vec<FavoriteRecord>),
    Notify(String),
    Error(String),
    /// Request handled, UI may prompt again
    Ready,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub term: String,
    pub reading: String,
    pub definition: String,
}

impl From<&DictionaryEntry> for DisplayResult {
    fn from(entry: &DictionaryEntry) -> Self {
        Self {
            term: entry.headword().to_string(),
            reading: entry.primary_reading().to_string(),
            definition: entry.definition_text(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lookup failed: {0}")]
    LookupFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Conversion table error: {0}")]
    Table(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failures surfaced by a search session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Lookup service failure: {0}")]
    LookupServiceFailure(String),

    #[error("{stage} timed out after {elapsed_ms}ms")]
    Timeout { stage: String, elapsed_ms: u64 },
}

impl From<DictionaryError> for SearchError {
    fn from(e: DictionaryError) -> Self {
        SearchError::LookupServiceFailure(e.to_string())
    }
}

impl From<ConvertError> for SearchError {
    fn from(e: ConvertError) -> Self {
        SearchError::LookupServiceFailure(e.to_string())
    }
}

//! Staged search: exact, then prefix, then fault-tolerant prefix lookups.
//!
//! [`SearchState`] is a plain value. [`SearchOrchestrator::advance`] takes it,
//! performs exactly one tier and hands it back, so the host decides how ticks
//! are scheduled (inline loop, blocking task with a timeout, ...).

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use kotoba_core::dictionary::{Dictionary, DictionaryEntry, EntryId, LookupPattern};
use kotoba_core::error::SearchError;
use kotoba_core::script::is_han;

use crate::classifier::{Script, classify};
use crate::normalizer::QueryNormalizer;
use crate::ranking::{commonality_score, pos_score};
use crate::suggest::find_suggestions;
use crate::variants::tolerant_queries;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

const SINGLE_CHAR_GUIDANCE: &str =
    "Please enter more than one kana or letter, or a single kanji.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Invalid,
    SearchingTier1,
    SearchingTier2,
    SearchingTier3,
    Done,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::Invalid | SearchStatus::Done)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchStatus::Idle => "idle",
            SearchStatus::Invalid => "invalid",
            SearchStatus::SearchingTier1 => "tier 1 (exact)",
            SearchStatus::SearchingTier2 => "tier 2 (prefix)",
            SearchStatus::SearchingTier3 => "tier 3 (tolerant)",
            SearchStatus::Done => "done",
        };
        f.write_str(label)
    }
}

/// Progress of one query. Reset whenever a new raw query is submitted.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub raw_query: String,
    pub canonical_query: String,
    pub status: SearchStatus,
    /// Ids in any of the tier lists. Each id is in at most one of them.
    pub found_ids: HashSet<EntryId>,
    pub tier1_entries: Vec<DictionaryEntry>,
    pub tier2_entries: Vec<DictionaryEntry>,
    pub tier3_entries: Vec<DictionaryEntry>,
    pub suggestions: Vec<DictionaryEntry>,
    pub log: Vec<String>,
    /// Tiers given up on after a tier-local failure
    pub skipped: Vec<SearchStatus>,
    pub error: Option<SearchError>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished every tier without failure and without a single match
    pub fn is_no_results(&self) -> bool {
        self.status == SearchStatus::Done
            && self.found_ids.is_empty()
            && self.error.is_none()
            && self.skipped.is_empty()
    }

    /// Tier 1, 2 and 3 entries in discovery order
    pub fn all_entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.tier1_entries
            .iter()
            .chain(&self.tier2_entries)
            .chain(&self.tier3_entries)
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!("[{}] {}", self.raw_query, line);
        self.log.push(line);
    }

    /// Append entries not seen yet to the current tier's list.
    /// Returns how many were new.
    fn accumulate(&mut self, entries: Vec<DictionaryEntry>) -> usize {
        let mut added = 0;

        for entry in entries {
            if !self.found_ids.insert(entry.id.clone()) {
                continue;
            }

            tracing::debug!(
                "{} {} commonality={} pos={}",
                entry.id,
                entry.headword(),
                commonality_score(&entry),
                pos_score(&entry)
            );

            let target = match self.status {
                SearchStatus::SearchingTier1 => &mut self.tier1_entries,
                SearchStatus::SearchingTier2 => &mut self.tier2_entries,
                _ => &mut self.tier3_entries,
            };
            target.push(entry);
            added += 1;
        }

        // Suggestions stay disjoint from found entries
        let found = &self.found_ids;
        self.suggestions.retain(|s| !found.contains(&s.id));

        added
    }

    /// Give up on the current tier after a tier-local failure such as a
    /// timeout, keeping everything found so far.
    pub fn skip_tier(&mut self, reason: &SearchError) {
        let skipped = self.status;
        let next = match skipped {
            SearchStatus::SearchingTier1 => SearchStatus::SearchingTier2,
            SearchStatus::SearchingTier2 if self.found_ids.is_empty() => {
                SearchStatus::SearchingTier3
            }
            SearchStatus::SearchingTier2 | SearchStatus::SearchingTier3 => SearchStatus::Done,
            other => {
                tracing::warn!("Cannot skip {} ({})", other, reason);
                return;
            }
        };

        tracing::warn!("Skipping {}: {}", skipped, reason);
        self.push_log(format!("Skipped {skipped}: {reason}"));
        self.skipped.push(skipped);
        self.status = next;
    }

    /// Stop the query with an error. Accumulated tiers stay as they are.
    pub fn fail(&mut self, error: SearchError) {
        tracing::error!("Search for '{}' failed: {}", self.raw_query, error);
        self.push_log(format!("Search failed in {}: {}", self.status, error));
        self.error = Some(error);
        self.status = SearchStatus::Done;
    }
}

/// Drives a [`SearchState`] through the tiers against a dictionary
#[derive(Clone)]
pub struct SearchOrchestrator {
    dictionary: Arc<dyn Dictionary>,
    normalizer: QueryNormalizer,
    suggestion_limit: usize,
}

impl SearchOrchestrator {
    pub fn new(dictionary: Arc<dyn Dictionary>, normalizer: QueryNormalizer) -> Self {
        Self {
            dictionary,
            normalizer,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Start a new query and normalize it, ready for tier 1. Returns false
    /// when `raw` is empty or is the query already held by `state`, which is
    /// then left untouched.
    pub fn submit_query(&self, state: &mut SearchState, raw: &str) -> bool {
        if raw.is_empty() || (raw == state.raw_query && state.status != SearchStatus::Idle) {
            return false;
        }

        *state = SearchState {
            raw_query: raw.to_string(),
            ..SearchState::default()
        };

        let mut chars = raw.chars();
        let single_non_han = matches!((chars.next(), chars.next()), (Some(c), None) if !is_han(c));
        if single_non_han {
            tracing::info!("Rejected single-character query '{}'", raw);
            state.status = SearchStatus::Invalid;
            state.error = Some(SearchError::InvalidQuery(raw.to_string()));
            state.push_log(SINGLE_CHAR_GUIDANCE);
            return true;
        }

        state.status = SearchStatus::SearchingTier1;
        if let Err(e) = self.normalize_query(state) {
            state.fail(e);
        }
        true
    }

    /// Perform the current tier and move to the next status.
    /// Terminal and idle states are returned unchanged.
    pub fn advance(&self, mut state: SearchState) -> SearchState {
        let result = match state.status {
            SearchStatus::SearchingTier1 => self.exact_tier(&mut state),
            SearchStatus::SearchingTier2 => self.prefix_tier(&mut state),
            SearchStatus::SearchingTier3 => self.tolerant_tier(&mut state),
            SearchStatus::Idle | SearchStatus::Invalid | SearchStatus::Done => Ok(()),
        };

        if let Err(e) = result {
            state.fail(e);
        }
        state
    }

    /// Submit `raw` and advance until a terminal state
    pub fn run(&self, raw: &str) -> SearchState {
        let mut state = SearchState::new();
        self.submit_query(&mut state, raw);
        while !state.status.is_terminal() && state.status != SearchStatus::Idle {
            state = self.advance(state);
        }
        state
    }

    /// Classify and convert the raw query. Table lookups only, so this runs
    /// at submission and a stalled tier 1 can still fall through to tier 2.
    fn normalize_query(&self, state: &mut SearchState) -> Result<(), SearchError> {
        let raw = state.raw_query.clone();
        state.push_log(format!("Raw input: {raw}"));

        let script = classify(&raw);
        let canonical = self.normalizer.normalize(&raw, script)?;
        match script {
            Script::Romaji => state.push_log(format!("Detected romaji -> {canonical}")),
            Script::HanOrJapanese if canonical != raw => {
                state.push_log(format!("Converted Chinese characters -> {canonical}"))
            }
            Script::HanOrJapanese => state.push_log("Detected Japanese"),
        }
        state.canonical_query = canonical;
        Ok(())
    }

    fn exact_tier(&self, state: &mut SearchState) -> Result<(), SearchError> {
        let canonical = state.canonical_query.clone();
        let pattern = LookupPattern::Exact(&canonical);
        let entries = self.dictionary.lookup(&pattern)?;
        let added = state.accumulate(entries);
        state.push_log(format!("Tier 1 exact match '{pattern}': {added} new results"));

        let suggestions = find_suggestions(
            self.dictionary.as_ref(),
            &canonical,
            &state.found_ids,
            self.suggestion_limit,
        )?;
        state.push_log(format!("Geminate suggestions: {} found", suggestions.len()));
        state.suggestions = suggestions;

        state.status = SearchStatus::SearchingTier2;
        Ok(())
    }

    fn prefix_tier(&self, state: &mut SearchState) -> Result<(), SearchError> {
        let query = state.canonical_query.clone();
        let pattern = LookupPattern::Prefix(&query);
        let entries = self.dictionary.lookup(&pattern)?;
        let added = state.accumulate(entries);
        state.push_log(format!("Tier 2 prefix match '{pattern}': {added} new results"));

        if state.found_ids.is_empty() {
            state.status = SearchStatus::SearchingTier3;
        } else {
            state.status = SearchStatus::Done;
            state.push_log("All searches complete");
        }
        Ok(())
    }

    fn tolerant_tier(&self, state: &mut SearchState) -> Result<(), SearchError> {
        let queries = tolerant_queries(&state.canonical_query);
        state.push_log(format!(
            "Tier 3 tolerant queries: {}",
            queries.iter().cloned().collect::<Vec<_>>().join(", ")
        ));

        let mut added = 0;
        for query in &queries {
            let entries = self.dictionary.lookup_prefix(query)?;
            added += state.accumulate(entries);
        }
        state.push_log(format!("Tier 3 tolerant match: {added} new results"));

        state.status = SearchStatus::Done;
        state.push_log("All searches complete");
        Ok(())
    }
}

//! Relevance scoring for lookup results.

use std::cmp::Reverse;

use kotoba_core::convert::HanConverter;
use kotoba_core::dictionary::{COMMON_PRIORITY_TAG, DictionaryEntry};
use kotoba_core::error::ConvertError;

const EXACT_WRITTEN_MATCH: i64 = 10_000;
const PREFIX_WRITTEN_MATCH: i64 = 5_000;
const PREFIX_COVERAGE_MAX: i64 = 100;
const EXACT_READING_MATCH: i64 = 1_000;
const COMMON_FIRST_SENSE: i64 = 500;
const HEADWORD_LENGTH_PENALTY: i64 = 10;

/// Markers that make a first sense count as common
const HIGH_COMMONALITY_MARKERS: &[&str] = &["ichi1", "news1", "spec1"];

/// Points per priority tag, unknown tags score 0
pub const COMMONALITY_SCORES: &[(&str, u32)] = &[
    (COMMON_PRIORITY_TAG, 20),
    ("ichi1", 25),
    ("ichi2", 15),
    ("news1", 20),
    ("news2", 10),
    ("gai1", 18),
    ("gai2", 8),
    ("spec1", 12),
    ("spec2", 5),
];

/// Points per coarse part of speech (tag before the first `-`), unknown score 1
pub const POS_SCORES: &[(&str, u32)] = &[("v", 10), ("adj", 8), ("adv", 6), ("n", 5)];

const UNKNOWN_POS_SCORE: u32 = 1;

/// Score `entry` against the Han-converted query and the query as typed
pub fn score(entry: &DictionaryEntry, converted: &str, original: &str) -> i64 {
    let mut score = 0;
    let query_len = converted.chars().count() as i64;

    if entry.written_forms.iter().any(|w| w == converted) {
        score += EXACT_WRITTEN_MATCH;
    } else if entry.written_forms.iter().any(|w| w.starts_with(converted)) {
        score += PREFIX_WRITTEN_MATCH;
        for form in entry.written_forms.iter().filter(|w| w.starts_with(converted)) {
            let form_len = form.chars().count() as i64;
            if form_len > 0 {
                score += PREFIX_COVERAGE_MAX * query_len / form_len;
            }
        }
    }

    if entry.reading_forms.iter().any(|r| r == original) {
        score += EXACT_READING_MATCH;
    }

    if let Some(first) = entry.senses.first() {
        let common = first
            .part_of_speech
            .iter()
            .chain(&first.misc)
            .any(|tag| HIGH_COMMONALITY_MARKERS.iter().any(|m| tag.contains(m)));
        if common {
            score += COMMON_FIRST_SENSE;
        }
    }

    if let Some(headword) = entry.written_forms.first() {
        score -= HEADWORD_LENGTH_PENALTY * headword.chars().count() as i64;
    }

    score
}

/// Order entries by descending score. Equal scores keep input order.
pub fn rank(
    entries: Vec<DictionaryEntry>,
    query: &str,
    han: &dyn HanConverter,
) -> Result<Vec<DictionaryEntry>, ConvertError> {
    let converted = han.convert(query)?;

    let mut scored: Vec<(i64, DictionaryEntry)> = entries
        .into_iter()
        .map(|entry| (score(&entry, &converted, query), entry))
        .collect();
    scored.sort_by_key(|(score, _)| Reverse(*score));

    Ok(scored.into_iter().map(|(_, entry)| entry).collect())
}

/// Sum of commonality points over all priority tags of the entry
pub fn commonality_score(entry: &DictionaryEntry) -> u32 {
    entry
        .priority_tags
        .iter()
        .filter_map(|tag| {
            COMMONALITY_SCORES
                .iter()
                .find(|(name, _)| name == tag)
                .map(|(_, points)| *points)
        })
        .sum()
}

/// Best part-of-speech score across all senses, 0 when no sense has tags
pub fn pos_score(entry: &DictionaryEntry) -> u32 {
    entry
        .senses
        .iter()
        .flat_map(|sense| &sense.part_of_speech)
        .map(|pos| {
            let coarse = pos.split('-').next().unwrap_or_default();
            POS_SCORES
                .iter()
                .find(|(name, _)| *name == coarse)
                .map_or(UNKNOWN_POS_SCORE, |(_, points)| *points)
        })
        .max()
        .unwrap_or(0)
}

use std::collections::HashSet;

use kotoba_core::dictionary::{Dictionary, DictionaryEntry, EntryId};
use kotoba_core::error::DictionaryError;

use crate::variants::geminate_variants;

/// "Did you mean" entries: exact hits on geminate respellings of `query`
/// that are not already in `exclude`. At most `limit` entries.
pub fn find_suggestions(
    dictionary: &dyn Dictionary,
    query: &str,
    exclude: &HashSet<EntryId>,
    limit: usize,
) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let mut suggestions = Vec::new();
    let mut seen: HashSet<EntryId> = HashSet::new();

    for variant in geminate_variants(query) {
        if suggestions.len() >= limit {
            break;
        }

        for entry in dictionary.lookup_exact(&variant)? {
            if exclude.contains(&entry.id) || !seen.insert(entry.id.clone()) {
                continue;
            }
            suggestions.push(entry);
            if suggestions.len() >= limit {
                break;
            }
        }
    }

    Ok(suggestions)
}

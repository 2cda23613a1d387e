use std::collections::HashMap;

use kotoba_core::convert::HanConverter;
use kotoba_core::dictionary::{Dictionary, DictionaryEntry};
use kotoba_core::error::SearchError;

use crate::ranking::rank;

/// Single-shot ranked lookup: prefix matches for the query as typed and for
/// its Han-converted form, merged by id, ranked, cut to `limit`.
pub fn quick_search(
    dictionary: &dyn Dictionary,
    han: &dyn HanConverter,
    raw_query: &str,
    limit: usize,
) -> Result<Vec<DictionaryEntry>, SearchError> {
    if raw_query.is_empty() {
        return Ok(Vec::new());
    }

    let mut merged = dictionary.lookup_prefix(raw_query)?;

    let converted = han.convert(raw_query)?;
    if converted != raw_query {
        tracing::debug!("Quick search also looks up '{}'", converted);

        let mut positions: HashMap<String, usize> = merged
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        for entry in dictionary.lookup_prefix(&converted)? {
            match positions.get(&entry.id) {
                Some(&i) => merged[i] = entry,
                None => {
                    positions.insert(entry.id.clone(), merged.len());
                    merged.push(entry);
                }
            }
        }
    }

    let mut ranked = rank(merged, raw_query, han)?;
    ranked.truncate(limit);
    Ok(ranked)
}

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

use kotoba_core::dictionary::{
    COMMON_PRIORITY_TAG, Dictionary, DictionaryEntry, DictionaryMetadata, LookupPattern, Sense,
};
use kotoba_core::error::DictionaryError;
use serde::Deserialize;

// JSON structures for parsing jmdict-simplified format
#[derive(Debug, Deserialize)]
struct JMdictJson {
    #[serde(default)]
    version: Option<String>,
    words: Vec<JMdictJsonEntry>,
}

#[derive(Debug, Deserialize)]
struct JMdictJsonEntry {
    id: String,
    #[serde(default)]
    kanji: Vec<FormElement>,
    #[serde(default)]
    kana: Vec<FormElement>,
    sense: Vec<JsonSense>,
}

/// Written or reading element. jmdict-simplified folds the `ke_pri` /
/// `re_pri` markers into a single `common` flag.
#[derive(Debug, Deserialize)]
struct FormElement {
    text: String,
    #[serde(default)]
    common: bool,
}

#[derive(Debug, Deserialize)]
struct JsonSense {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Vec<String>,
    #[serde(default)]
    misc: Vec<String>,
    #[serde(default)]
    gloss: Vec<Gloss>,
}

#[derive(Debug, Deserialize)]
struct Gloss {
    #[serde(default = "default_lang")]
    lang: String,
    text: String,
}

fn default_lang() -> String {
    "eng".to_string()
}

impl JMdictJsonEntry {
    /// None when the entry has no English gloss or no headword
    fn into_entry(self) -> Option<DictionaryEntry> {
        let mut priority_tags = BTreeSet::new();
        if self.kanji.iter().chain(&self.kana).any(|form| form.common) {
            priority_tags.insert(COMMON_PRIORITY_TAG.to_string());
        }

        let senses: Vec<Sense> = self
            .sense
            .into_iter()
            .filter_map(|sense| {
                let glosses: Vec<String> = sense
                    .gloss
                    .into_iter()
                    .filter(|g| g.lang == "eng")
                    .map(|g| g.text)
                    .collect();
                if glosses.is_empty() {
                    return None;
                }
                Some(Sense {
                    part_of_speech: sense.part_of_speech,
                    misc: sense.misc,
                    gloss: glosses.join("; "),
                })
            })
            .collect();

        if senses.is_empty() || (self.kanji.is_empty() && self.kana.is_empty()) {
            return None;
        }

        Some(DictionaryEntry {
            id: self.id,
            written_forms: self.kanji.into_iter().map(|k| k.text).collect(),
            reading_forms: self.kana.into_iter().map(|k| k.text).collect(),
            senses,
            priority_tags,
        })
    }
}

/// In-memory JMdict with a sorted form index serving exact and prefix lookups
pub struct JMdict {
    version: String,
    entries: Vec<DictionaryEntry>,
    /// Written and reading forms → entry positions, ascending
    form_index: BTreeMap<String, Vec<usize>>,
}

impl JMdict {
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    /// Build from entries, later entries replace earlier ones with the same id
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        let mut dict = Self {
            version: "custom".to_string(),
            entries: Vec::new(),
            form_index: BTreeMap::new(),
        };
        dict.insert_all(entries);
        dict
    }

    /// Load JMdict from JSON string (jmdict-simplified format)
    pub fn from_json(json_str: &str) -> Result<Self, DictionaryError> {
        let data: JMdictJson = serde_json::from_str(json_str)
            .map_err(|e| DictionaryError::ParseError(e.to_string()))?;

        let total = data.words.len();
        let entries: Vec<DictionaryEntry> = data
            .words
            .into_iter()
            .filter_map(JMdictJsonEntry::into_entry)
            .collect();

        if entries.len() < total {
            tracing::debug!(
                "Skipped {} entries without English glosses",
                total - entries.len()
            );
        }

        let mut dict = Self::from_entries(entries);
        if let Some(version) = data.version {
            dict.version = version;
        }
        Ok(dict)
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Merge another dictionary into this one.
    /// Entries from the other dictionary with the same ID replace existing ones.
    pub fn merge(mut self, other: JMdict) -> Self {
        self.insert_all(other.entries);
        self
    }

    fn insert_all(&mut self, incoming: Vec<DictionaryEntry>) {
        let mut positions: HashMap<String, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        for entry in incoming {
            match positions.get(&entry.id) {
                Some(&i) => self.entries[i] = entry,
                None => {
                    positions.insert(entry.id.clone(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }

        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.form_index.clear();
        for (idx, entry) in self.entries.iter().enumerate() {
            for form in entry.written_forms.iter().chain(&entry.reading_forms) {
                let slots = self.form_index.entry(form.clone()).or_default();
                if slots.last() != Some(&idx) {
                    slots.push(idx);
                }
            }
        }
    }

    fn collect(&self, mut indices: Vec<usize>) -> Vec<DictionaryEntry> {
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .filter_map(|idx| self.entries.get(idx))
            .cloned()
            .collect()
    }
}

impl Default for JMdict {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary for JMdict {
    fn lookup(&self, pattern: &LookupPattern<'_>) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let term = pattern.term();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let indices: Vec<usize> = match pattern {
            LookupPattern::Exact(_) => self.form_index.get(term).cloned().unwrap_or_default(),
            LookupPattern::Prefix(_) => self
                .form_index
                .range::<str, _>((Bound::Included(term), Bound::Unbounded))
                .take_while(|(form, _)| form.starts_with(term))
                .flat_map(|(_, slots)| slots.iter().copied())
                .collect(),
        };

        Ok(self.collect(indices))
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "JMdict".to_string(),
            version: self.version.clone(),
            language: "ja".to_string(),
            entry_count: self.entries.len(),
        }
    }
}

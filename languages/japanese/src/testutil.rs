use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use kotoba_core::dictionary::{
    Dictionary, DictionaryEntry, DictionaryMetadata, LookupPattern, Sense,
};
use kotoba_core::error::DictionaryError;

use crate::dictionary::JMdict;

pub fn entry(
    id: &str,
    written: &[&str],
    readings: &[&str],
    pos: &str,
    gloss: &str,
    priority: &[&str],
) -> DictionaryEntry {
    DictionaryEntry {
        id: id.into(),
        written_forms: written.iter().map(|s| s.to_string()).collect(),
        reading_forms: readings.iter().map(|s| s.to_string()).collect(),
        senses: vec![Sense {
            part_of_speech: vec![pos.to_string()],
            misc: Vec::new(),
            gloss: gloss.to_string(),
        }],
        priority_tags: priority.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
    }
}

pub fn sample_dictionary() -> JMdict {
    JMdict::from_entries(vec![
        entry("1358280", &["食べる"], &["たべる"], "v1", "to eat", &["ichi1", "news1"]),
        entry("1358300", &["食べ物"], &["たべもの"], "n", "food", &["ichi1"]),
        entry("1206900", &["学校"], &["がっこう"], "n", "school", &["ichi1", "news1"]),
        entry("1206720", &["学生"], &["がくせい"], "n", "student", &["ichi1"]),
        entry("1206730", &["学長"], &["がくちょう"], "n", "university president", &[]),
        entry("1589360", &["図書館"], &["としょかん"], "n", "library", &["ichi1"]),
        entry("1126680", &[], &["ロケット"], "n", "rocket", &["gai1"]),
        entry("1438240", &["切手"], &["きって"], "n", "postage stamp", &["ichi1"]),
        entry("1208990", &["来手"], &["きて"], "n", "comer", &[]),
    ])
}

/// Counts every lookup forwarded to the wrapped dictionary
pub struct CountingDictionary<D> {
    inner: D,
    calls: AtomicUsize,
}

impl<D: Dictionary> CountingDictionary<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<D: Dictionary> Dictionary for CountingDictionary<D> {
    fn lookup(&self, pattern: &LookupPattern<'_>) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(pattern)
    }

    fn metadata(&self) -> DictionaryMetadata {
        self.inner.metadata()
    }
}

/// Serves exact lookups, fails every prefix lookup
pub struct PrefixFailingDictionary<D>(pub D);

impl<D: Dictionary> Dictionary for PrefixFailingDictionary<D> {
    fn lookup(&self, pattern: &LookupPattern<'_>) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        if pattern.is_prefix() {
            return Err(DictionaryError::LookupFailed(format!("{pattern}: database locked")));
        }
        self.0.lookup(pattern)
    }

    fn metadata(&self) -> DictionaryMetadata {
        self.0.metadata()
    }
}

//! Lexical transition table.
//!
//! A static mapping from a context key to the words that plausibly follow
//! it. Keys are lowercase single words or lowercase space-joined n-grams:
//!
//! ```text
//! "cat"          -> sat 0.35, meowed 0.25, jumped 0.20, ...
//! "the cat sat"  -> on 0.55, quietly 0.20, ...
//! <default>      -> and 0.25, the 0.22, is 0.20, ...
//! ```
//!
//! Absence of a key is an expected outcome; the sampler falls back to the
//! default candidate set.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One candidate continuation with its hand-authored weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEntry {
    /// Continuation word.
    pub word: String,
    /// Base weight in (0, 1].
    pub base_weight: f32,
}

impl TransitionEntry {
    /// Create a new entry.
    pub fn new(word: impl Into<String>, base_weight: f32) -> Self {
        Self {
            word: word.into(),
            base_weight,
        }
    }
}

/// Normalize a context key: lowercase, whitespace collapsed to single spaces.
pub fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// On-disk shape of a transition table.
#[derive(Debug, Serialize, Deserialize)]
struct TableDocument {
    default: Vec<TransitionEntry>,
    #[serde(default)]
    transitions: HashMap<String, Vec<TransitionEntry>>,
}

/// Read-only lookup from context key to candidate continuations.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    entries: HashMap<String, Vec<TransitionEntry>>,
    default: Vec<TransitionEntry>,
    /// Longest key length in words.
    max_key_words: usize,
}

impl TransitionTable {
    /// Create an empty table with the given default candidate set.
    pub fn new(default: Vec<TransitionEntry>) -> Result<Self> {
        if default.is_empty() {
            return Err(Error::InvalidTable("default candidate set is empty".into()));
        }
        validate_entries("<default>", &default)?;
        Ok(Self {
            entries: HashMap::new(),
            default,
            max_key_words: 0,
        })
    }

    /// Add or replace the candidates for a context key.
    pub fn insert(&mut self, key: &str, candidates: Vec<TransitionEntry>) -> Result<()> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(Error::InvalidTable("empty context key".into()));
        }
        if candidates.is_empty() {
            return Err(Error::InvalidTable(format!("key '{key}' has no candidates")));
        }
        validate_entries(&key, &candidates)?;
        self.max_key_words = self.max_key_words.max(key.split(' ').count());
        self.entries.insert(key, candidates);
        Ok(())
    }

    /// Look up a context key (case-insensitive, exact match).
    pub fn resolve(&self, key: &str) -> Option<&[TransitionEntry]> {
        self.entries.get(&normalize_key(key)).map(Vec::as_slice)
    }

    /// Whether the table has an entry for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Candidates used when no key matches.
    pub fn default_candidates(&self) -> &[TransitionEntry] {
        &self.default
    }

    /// Number of context keys (excluding the default set).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keyed entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in words of the longest key.
    pub fn max_key_words(&self) -> usize {
        self.max_key_words
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parse a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: TableDocument = serde_json::from_str(json)?;
        let mut table = Self::new(doc.default)?;
        for (key, candidates) in doc.transitions {
            table.insert(&key, candidates)?;
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Serialize the table to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let doc = TableDocument {
            default: self.default.clone(),
            transitions: self.entries.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// The built-in table used by the prediction game.
    pub fn builtin() -> Self {
        let to_entries = |pairs: &[(&str, f32)]| -> Vec<TransitionEntry> {
            pairs
                .iter()
                .map(|&(w, p)| TransitionEntry::new(w, p))
                .collect()
        };

        let mut entries = HashMap::with_capacity(BUILTIN.len());
        let mut max_key_words = 0;
        for &(key, pairs) in BUILTIN {
            max_key_words = max_key_words.max(key.split(' ').count());
            entries.insert(key.to_string(), to_entries(pairs));
        }

        Self {
            entries,
            default: to_entries(DEFAULT_CANDIDATES),
            max_key_words,
        }
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_entries(key: &str, candidates: &[TransitionEntry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for entry in candidates {
        if entry.word.trim().is_empty() || entry.word.split_whitespace().count() != 1 {
            return Err(Error::InvalidTable(format!(
                "key '{key}' has a candidate that is not a single word: '{}'",
                entry.word
            )));
        }
        if !(entry.base_weight > 0.0 && entry.base_weight <= 1.0) {
            return Err(Error::InvalidTable(format!(
                "key '{key}': weight {} for '{}' is outside (0, 1]",
                entry.base_weight, entry.word
            )));
        }
        if !seen.insert(entry.word.to_lowercase()) {
            return Err(Error::InvalidTable(format!(
                "key '{key}' lists '{}' more than once",
                entry.word
            )));
        }
    }
    Ok(())
}

// =============================================================================
// BUILT-IN DATA
// =============================================================================

const DEFAULT_CANDIDATES: &[(&str, f32)] = &[
    ("and", 0.25),
    ("the", 0.22),
    ("is", 0.20),
    ("was", 0.18),
    ("with", 0.15),
];

#[rustfmt::skip]
const BUILTIN: &[(&str, &[(&str, f32)])] = &[
    // Openers
    ("the", &[("cat", 0.25), ("dog", 0.22), ("patient", 0.18), ("stock", 0.15), ("weather", 0.12)]),
    ("a", &[("warm", 0.22), ("soft", 0.22), ("cozy", 0.20), ("sunny", 0.18), ("quiet", 0.18)]),
    ("my", &[("lap", 0.28), ("bed", 0.25), ("chair", 0.25), ("desk", 0.22)]),

    // Pets
    ("cat", &[("sat", 0.35), ("meowed", 0.25), ("jumped", 0.20), ("purred", 0.12), ("slept", 0.08)]),
    ("dog", &[("barked", 0.30), ("ran", 0.25), ("wagged", 0.20), ("fetched", 0.15), ("played", 0.10)]),
    ("sat", &[("on", 0.45), ("quietly", 0.25), ("beside", 0.18), ("near", 0.12)]),
    ("on", &[("the", 0.50), ("a", 0.25), ("my", 0.15), ("her", 0.10)]),
    ("barked", &[("loudly", 0.35), ("at", 0.30), ("happily", 0.20), ("excitedly", 0.15)]),
    ("ran", &[("quickly", 0.30), ("across", 0.25), ("towards", 0.25), ("away", 0.20)]),
    ("meowed", &[("softly", 0.35), ("loudly", 0.25), ("for", 0.25), ("hungrily", 0.15)]),
    ("jumped", &[("over", 0.40), ("onto", 0.30), ("high", 0.18), ("gracefully", 0.12)]),

    // Medical
    ("patient", &[("reported", 0.30), ("experienced", 0.25), ("was", 0.22), ("showed", 0.15), ("needed", 0.08)]),
    ("reported", &[("symptoms", 0.35), ("chest", 0.25), ("fever", 0.22), ("pain", 0.18)]),
    ("symptoms", &[("including", 0.40), ("of", 0.30), ("such", 0.18), ("like", 0.12)]),
    ("experienced", &[("headaches", 0.28), ("dizziness", 0.25), ("nausea", 0.25), ("fatigue", 0.22)]),

    // Finance
    ("stock", &[("market", 0.45), ("price", 0.25), ("rose", 0.18), ("fell", 0.12)]),
    ("market", &[("crashed", 0.22), ("rallied", 0.22), ("opened", 0.20), ("volatility", 0.18), ("trends", 0.18)]),
    ("price", &[("increased", 0.30), ("dropped", 0.28), ("remained", 0.22), ("surged", 0.20)]),

    // Weather
    ("weather", &[("forecast", 0.35), ("today", 0.25), ("is", 0.22), ("will", 0.18)]),
    ("forecast", &[("predicts", 0.35), ("shows", 0.28), ("indicates", 0.22), ("suggests", 0.15)]),

    // Connectives
    ("loudly", &[("at", 0.35), ("and", 0.30), ("while", 0.20), ("until", 0.15)]),
    ("softly", &[("at", 0.30), ("and", 0.28), ("in", 0.22), ("near", 0.20)]),
    ("at", &[("the", 0.45), ("a", 0.25), ("her", 0.18), ("his", 0.12)]),
    ("quickly", &[("towards", 0.30), ("and", 0.28), ("to", 0.22), ("through", 0.20)]),
    ("across", &[("the", 0.50), ("a", 0.25), ("my", 0.15), ("our", 0.10)]),
    ("over", &[("the", 0.45), ("a", 0.28), ("my", 0.15), ("her", 0.12)]),
    ("onto", &[("the", 0.45), ("a", 0.28), ("my", 0.15), ("her", 0.12)]),
    ("warm", &[("blanket", 0.35), ("spot", 0.28), ("bed", 0.22), ("place", 0.15)]),
    ("soft", &[("pillow", 0.32), ("blanket", 0.28), ("cushion", 0.22), ("rug", 0.18)]),
    ("cozy", &[("corner", 0.35), ("spot", 0.30), ("bed", 0.20), ("nook", 0.15)]),

    // Longer context beats the last word alone
    ("the cat sat", &[("on", 0.55), ("quietly", 0.20), ("beside", 0.15), ("purring", 0.10)]),
    ("cat sat on", &[("the", 0.45), ("my", 0.30), ("a", 0.25)]),
    ("the dog ran", &[("across", 0.35), ("away", 0.30), ("towards", 0.20), ("home", 0.15)]),
    ("the patient reported", &[("symptoms", 0.40), ("chest", 0.30), ("fever", 0.20), ("pain", 0.10)]),
    ("chest pain", &[("and", 0.40), ("radiating", 0.25), ("since", 0.20), ("after", 0.15)]),
    ("the stock market", &[("crashed", 0.30), ("rallied", 0.28), ("opened", 0.22), ("closed", 0.20)]),
    ("weather forecast", &[("predicts", 0.40), ("shows", 0.25), ("says", 0.20), ("warns", 0.15)]),
    ("the weather", &[("forecast", 0.40), ("today", 0.30), ("is", 0.20), ("was", 0.10)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_are_valid() {
        let table = TransitionTable::builtin();
        assert!(validate_entries("<default>", table.default_candidates()).is_ok());
        for key in table.keys() {
            let entries = table.resolve(key).unwrap();
            assert!(!entries.is_empty());
            assert!(validate_entries(key, entries).is_ok(), "bad key {key}");
        }
        assert_eq!(table.max_key_words(), 3);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let table = TransitionTable::builtin();
        let lower = table.resolve("cat").unwrap();
        let upper = table.resolve("CAT").unwrap();
        assert_eq!(lower, upper);
        assert!(table.resolve("  The   Cat  Sat ").is_some());
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut table = TransitionTable::new(vec![TransitionEntry::new("and", 0.5)]).unwrap();
        let result = table.insert(
            "hello",
            vec![TransitionEntry::new("world", 0.5), TransitionEntry::new("World", 0.3)],
        );
        assert!(matches!(result, Err(Error::InvalidTable(_))));
    }
}

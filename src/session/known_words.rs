use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Splits raw learner input on whitespace into trimmed, lowercase, unique words.
///
/// Order of first appearance is preserved.
pub fn normalize_words(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split_whitespace()
        .map(|word| word.trim().to_lowercase())
        .filter(|word| !word.is_empty() && seen.insert(word.clone()))
        .collect()
}

/// Lowercase words a learner knows; grows only, remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KnownWordSet {
    order: Vec<String>,
    lookup: HashSet<String>,
}

impl KnownWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `raw` and adds the words; returns how many were new.
    pub fn add_words(&mut self, raw: &str) -> usize {
        normalize_words(raw)
            .into_iter()
            .filter(|word| self.insert(word.clone()))
            .count()
    }

    fn insert(&mut self, word: String) -> bool {
        if self.lookup.contains(&word) {
            return false;
        }
        self.lookup.insert(word.clone());
        self.order.push(word);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Words in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Alphabetical listing.
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.iter().collect();
        words.sort_unstable();
        words
    }

    /// Membership view for coverage scoring.
    pub fn as_set(&self) -> &HashSet<String> {
        &self.lookup
    }
}

impl From<Vec<String>> for KnownWordSet {
    fn from(words: Vec<String>) -> Self {
        let mut set = Self::new();
        for word in words {
            let word = word.trim().to_lowercase();
            if !word.is_empty() {
                set.insert(word);
            }
        }
        set
    }
}

impl From<KnownWordSet> for Vec<String> {
    fn from(set: KnownWordSet) -> Self {
        set.order
    }
}

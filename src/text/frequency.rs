// Ranked word frequencies.
//
// The report stores the top-N words of a document as a JSON object whose key
// order is the rank order ("dracula": 412, "night": 301, ...). An IndexMap
// keeps that order through serialization and back.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-N word counts, highest count first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencies {
    entries: IndexMap<String, usize>,
}

impl WordFrequencies {
    /// Rank a bag of words and keep the `top_n` most frequent entries.
    ///
    /// Ties are broken alphabetically so the ranking is deterministic.
    pub fn from_bag(bag: &HashMap<String, usize>, top_n: usize) -> Self {
        let mut ranked: Vec<(&String, &usize)> = bag.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let entries = ranked
            .into_iter()
            .take(top_n)
            .map(|(w, c)| (w.clone(), *c))
            .collect();
        Self { entries }
    }

    /// `(word, count)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count for `word`, if it made the cut.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries.get(word).copied()
    }
}

// Term dictionary over topic-model pseudo-documents.
//
// Maps each distinct token to an integer id in first-appearance order and
// tracks how many documents contain it, so that very rare and very common
// terms can be pruned before fitting.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::traits::BagOfWords;

/// Upper bound on dictionary size after pruning.
pub const DEFAULT_KEEP_N: usize = 100_000;

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
    ids: HashMap<String, usize>,
    doc_freqs: Vec<usize>,
    num_docs: usize,
}

impl Dictionary {
    /// Build a dictionary from tokenized documents.
    pub fn from_documents(documents: &[Vec<String>]) -> Self {
        let mut dictionary = Self::default();
        for document in documents {
            dictionary.add_document(document);
        }
        dictionary
    }

    fn add_document(&mut self, document: &[String]) {
        let mut seen = HashSet::new();
        for token in document {
            let id = match self.ids.get(token) {
                Some(&id) => id,
                None => {
                    let id = self.words.len();
                    self.words.push(token.clone());
                    self.ids.insert(token.clone(), id);
                    self.doc_freqs.push(0);
                    id
                }
            };
            if seen.insert(id) {
                self.doc_freqs[id] += 1;
            }
        }
        self.num_docs += 1;
    }

    /// Keep terms found in at least `no_below` documents and at most
    /// `floor(no_above * num_docs)` documents, then keep only the `keep_n`
    /// most widespread of those. Surviving ids are renumbered in their
    /// original order.
    pub fn filter_extremes(&mut self, no_below: usize, no_above: f64, keep_n: usize) {
        let max_docs = (no_above * self.num_docs as f64).floor() as usize;

        let mut kept: Vec<usize> = (0..self.words.len())
            .filter(|&id| self.doc_freqs[id] >= no_below && self.doc_freqs[id] <= max_docs)
            .collect();

        if kept.len() > keep_n {
            // Stable sort, so equal frequencies keep first-appearance order
            kept.sort_by(|&a, &b| self.doc_freqs[b].cmp(&self.doc_freqs[a]));
            kept.truncate(keep_n);
            kept.sort_unstable();
        }

        debug!(
            before = self.words.len(),
            after = kept.len(),
            max_docs,
            "Pruned topic dictionary"
        );

        let words: Vec<String> = kept.iter().map(|&id| self.words[id].clone()).collect();
        let doc_freqs: Vec<usize> = kept.iter().map(|&id| self.doc_freqs[id]).collect();
        self.ids = words
            .iter()
            .enumerate()
            .map(|(id, w)| (w.clone(), id))
            .collect();
        self.words = words;
        self.doc_freqs = doc_freqs;
    }

    /// Count the known tokens of a document. Unknown tokens are ignored.
    pub fn doc2bow(&self, document: &[String]) -> BagOfWords {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in document {
            if let Some(&id) = self.ids.get(token) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut bow: BagOfWords = counts.into_iter().collect();
        bow.sort_unstable();
        bow
    }

    pub fn word(&self, id: usize) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    pub fn id(&self, word: &str) -> Option<usize> {
        self.ids.get(word).copied()
    }

    /// Number of documents containing `word`.
    pub fn doc_freq(&self, word: &str) -> usize {
        self.id(word).map_or(0, |id| self.doc_freqs[id])
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&str]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|d| d.split_whitespace().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_ids_follow_first_appearance() {
        let dictionary = Dictionary::from_documents(&docs(&["crypt bat crypt", "bat moon"]));
        assert_eq!(dictionary.id("crypt"), Some(0));
        assert_eq!(dictionary.id("bat"), Some(1));
        assert_eq!(dictionary.id("moon"), Some(2));
        assert_eq!(dictionary.doc_freq("crypt"), 1);
        assert_eq!(dictionary.doc_freq("bat"), 2);
        assert_eq!(dictionary.num_docs(), 2);
    }

    #[test]
    fn test_filter_extremes_bounds() {
        // 4 documents: max_docs = floor(0.5 * 4) = 2
        let mut dictionary = Dictionary::from_documents(&docs(&[
            "common rare pair",
            "common pair",
            "common other",
            "other",
        ]));
        dictionary.filter_extremes(2, 0.5, DEFAULT_KEEP_N);

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.id("pair"), Some(0));
        assert_eq!(dictionary.id("other"), Some(1));
        assert_eq!(dictionary.id("common"), None);
        assert_eq!(dictionary.id("rare"), None);
    }

    #[test]
    fn test_three_documents_prune_everything() {
        // floor(0.5 * 3) = 1 is below no_below = 2
        let mut dictionary =
            Dictionary::from_documents(&docs(&["night fog", "night moor", "fog moor"]));
        dictionary.filter_extremes(2, 0.5, DEFAULT_KEEP_N);
        assert!(dictionary.is_empty());
    }

    #[test]
    fn test_keep_n_prefers_widespread_terms() {
        let mut dictionary = Dictionary::from_documents(&docs(&[
            "a b c", "a b", "a c", "a", "d e", "d e", "f", "f",
        ]));
        // max_docs = 4: a (df 4), b/c/d/e/f (df 2)
        dictionary.filter_extremes(2, 0.5, 2);
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.id("a"), Some(0));
        assert_eq!(dictionary.id("b"), Some(1));
    }

    #[test]
    fn test_doc2bow_skips_unknown_tokens() {
        let dictionary = Dictionary::from_documents(&docs(&["raven door raven"]));
        let bow = dictionary.doc2bow(&docs(&["door raven raven lenore"])[0]);
        assert_eq!(bow, vec![(0, 2), (1, 1)]);
    }
}

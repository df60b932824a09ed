// Preprocessor: tokens, stopwords, bag of words and vocabulary statistics.
//
// Wraps the configured Tokenizer with the pipeline's token policy: lowercase,
// alphabetic-only tokens, optional English stopword removal (NLTK list from
// the stop-words crate).

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;

use super::frequency::WordFrequencies;
use super::traits::Tokenizer;
use crate::numeric::{ratio, round4};

/// Vocabulary size statistics over the full and the stopword-filtered
/// token streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub total_words: usize,
    pub unique_words: usize,
    pub content_words: usize,
    pub unique_content_words: usize,
    pub type_token_ratio: f64,
    pub content_type_token_ratio: f64,
}

/// Lexical diversity metrics as reported per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalDiversity {
    pub total_words: usize,
    pub unique_words: usize,
    pub content_words: usize,
    pub unique_content_words: usize,
    /// unique / total
    pub type_token_ratio: f64,
    /// unique content / content
    pub content_ttr: f64,
    /// unique / sqrt(total)
    pub root_ttr: f64,
    /// content / total
    pub lexical_density: f64,
}

/// Result of preprocessing a single file on its own.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedText {
    pub vocabulary: VocabularyStats,
    pub bag_of_words: HashMap<String, usize>,
    /// Length of the file in characters
    pub text_length: usize,
}

/// Stopword-aware tokenizer front end.
pub struct Preprocessor {
    tokenizer: Arc<dyn Tokenizer>,
    use_stopwords: bool,
    stop_words: HashSet<String>,
}

impl Preprocessor {
    /// Build a preprocessor with the English stopword list.
    ///
    /// With `use_stopwords = false` the stopword set is empty and
    /// `remove_stopwords` is a no-op.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, use_stopwords: bool) -> Self {
        let stop_words = if use_stopwords {
            english_stop_words()
        } else {
            HashSet::new()
        };
        Self {
            tokenizer,
            use_stopwords,
            stop_words,
        }
    }

    /// Build a preprocessor with a caller-supplied stopword set.
    pub fn with_stop_words(tokenizer: Arc<dyn Tokenizer>, stop_words: HashSet<String>) -> Self {
        Self {
            tokenizer,
            use_stopwords: true,
            stop_words,
        }
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn uses_stopwords(&self) -> bool {
        self.use_stopwords
    }

    /// Lowercase alphabetic tokens, in document order. Clitics split off by
    /// the tokenizer ("'s", "n't") are not alphabetic and are dropped.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .words(text)
            .into_iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
            .collect()
    }

    /// Drop tokens that are in the stopword set.
    pub fn remove_stopwords(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !self.stop_words.contains(t.as_str()))
            .cloned()
            .collect()
    }

    /// Tokens with stopwords removed when filtering is enabled.
    pub fn content_tokens(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        if self.use_stopwords {
            self.remove_stopwords(&tokens)
        } else {
            tokens
        }
    }

    /// Frequency of every (content) token.
    pub fn create_bag_of_words(&self, text: &str) -> HashMap<String, usize> {
        let mut bag = HashMap::new();
        for token in self.content_tokens(text) {
            *bag.entry(token).or_insert(0) += 1;
        }
        bag
    }

    /// The `top_n` most frequent content tokens.
    pub fn word_frequencies(&self, text: &str, top_n: usize) -> WordFrequencies {
        WordFrequencies::from_bag(&self.create_bag_of_words(text), top_n)
    }

    /// Vocabulary statistics over the full and the content token streams.
    pub fn get_vocabulary(&self, text: &str) -> VocabularyStats {
        let counts = StreamCounts::new(self, text);
        VocabularyStats {
            total_words: counts.total,
            unique_words: counts.unique,
            content_words: counts.content,
            unique_content_words: counts.unique_content,
            type_token_ratio: round4(ratio(counts.unique, counts.total)),
            content_type_token_ratio: round4(ratio(counts.unique_content, counts.content)),
        }
    }

    /// Lexical diversity metrics for the report.
    pub fn lexical_diversity(&self, text: &str) -> LexicalDiversity {
        let counts = StreamCounts::new(self, text);
        let root_ttr = if counts.total > 0 {
            counts.unique as f64 / (counts.total as f64).sqrt()
        } else {
            0.0
        };
        LexicalDiversity {
            total_words: counts.total,
            unique_words: counts.unique,
            content_words: counts.content,
            unique_content_words: counts.unique_content,
            type_token_ratio: round4(ratio(counts.unique, counts.total)),
            content_ttr: round4(ratio(counts.unique_content, counts.content)),
            root_ttr: round4(root_ttr),
            lexical_density: round4(ratio(counts.content, counts.total)),
        }
    }

    /// Read a cleaned file and compute its vocabulary and bag of words.
    pub fn process_text_file(&self, path: &Path) -> Result<ProcessedText> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        Ok(ProcessedText {
            vocabulary: self.get_vocabulary(text),
            bag_of_words: self.create_bag_of_words(text),
            text_length: text.chars().count(),
        })
    }
}

/// Token and type counts shared by the two statistics records.
struct StreamCounts {
    total: usize,
    unique: usize,
    content: usize,
    unique_content: usize,
}

impl StreamCounts {
    fn new(preprocessor: &Preprocessor, text: &str) -> Self {
        let tokens = preprocessor.tokenize(text);
        let content = preprocessor.remove_stopwords(&tokens);
        Self {
            total: tokens.len(),
            unique: tokens.iter().collect::<HashSet<_>>().len(),
            content: content.len(),
            unique_content: content.iter().collect::<HashSet<_>>().len(),
        }
    }
}

/// The NLTK English stopword list.
pub fn english_stop_words() -> HashSet<String> {
    stop_words::get(LANGUAGE::English)
        .iter()
        .map(|w| w.to_string())
        .collect()
}

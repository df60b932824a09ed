// Topic extraction for a single document.
//
// A novel is one long token stream, so it is cut into fixed-size contiguous
// chunks that act as pseudo-documents for the topic model. The chunk
// dictionary is pruned of terms that are too rare or too common, the model is
// fitted, and each topic is reported as its highest-weighted terms.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::dictionary::{Dictionary, DEFAULT_KEEP_N};
use super::lda::{GibbsLda, LdaConfig};
use super::traits::{BagOfWords, TopicModel};
use crate::config::AnalysisSettings;
use crate::numeric::round4;

/// A term and its weight within a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWord {
    pub word: String,
    pub weight: f64,
}

/// One inferred topic, words in descending weight order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub topic_id: usize,
    pub words: Vec<TopicWord>,
}

/// Split a token stream into contiguous chunks of `chunk_size`, dropping any
/// chunk shorter than `min_chunk_size`.
pub fn chunk_tokens(
    tokens: &[String],
    chunk_size: usize,
    min_chunk_size: usize,
) -> Vec<Vec<String>> {
    if chunk_size == 0 {
        return Vec::new();
    }
    tokens
        .chunks(chunk_size)
        .filter(|chunk| chunk.len() >= min_chunk_size)
        .map(<[String]>::to_vec)
        .collect()
}

/// The `n` highest-weighted terms of a topic. Equal weights keep dictionary
/// order.
pub fn top_words(weights: &[f64], dictionary: &Dictionary, n: usize) -> Vec<TopicWord> {
    let mut ranked: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .filter_map(|(id, weight)| {
            dictionary.word(id).map(|word| TopicWord {
                word: word.to_string(),
                weight: round4(weight),
            })
        })
        .take(n)
        .collect()
}

/// Chunks, prunes and fits a topic model over one document.
pub struct TopicExtractor {
    model: Box<dyn TopicModel>,
    chunk_size: usize,
    min_chunk_size: usize,
    no_below: usize,
    no_above: f64,
    keep_n: usize,
}

impl TopicExtractor {
    pub fn new(model: Box<dyn TopicModel>, settings: &AnalysisSettings) -> Self {
        Self {
            model,
            chunk_size: settings.chunk_size,
            min_chunk_size: settings.min_chunk_size,
            no_below: settings.no_below,
            no_above: settings.no_above,
            keep_n: DEFAULT_KEEP_N,
        }
    }

    /// Gibbs LDA configured from the analysis settings.
    pub fn with_default_model(settings: &AnalysisSettings) -> Self {
        Self::new(
            Box::new(GibbsLda::new(LdaConfig::from_settings(settings))),
            settings,
        )
    }

    /// Infer up to `num_topics` topics from a content token stream.
    ///
    /// The topic count is clamped to the number of chunks (at least one
    /// topic when any chunk exists). No chunks means no topics. When pruning
    /// leaves no vocabulary the clamped number of topics is still returned,
    /// each with an empty word list.
    pub fn extract_topics(
        &self,
        tokens: &[String],
        num_topics: usize,
        words_per_topic: usize,
    ) -> Result<Vec<Topic>> {
        let chunks = chunk_tokens(tokens, self.chunk_size, self.min_chunk_size);
        if chunks.is_empty() {
            warn!(tokens = tokens.len(), "Too few tokens for topic modeling");
            return Ok(Vec::new());
        }

        let num_topics = if chunks.len() < num_topics {
            debug!(
                requested = num_topics,
                chunks = chunks.len(),
                "Clamping topic count to chunk count"
            );
            chunks.len().max(1)
        } else {
            num_topics
        };

        let mut dictionary = Dictionary::from_documents(&chunks);
        dictionary.filter_extremes(self.no_below, self.no_above, self.keep_n);

        if dictionary.is_empty() {
            warn!(
                chunks = chunks.len(),
                "Vocabulary empty after pruning, topics have no words"
            );
            return Ok(empty_topics(num_topics));
        }

        let corpus: Vec<BagOfWords> = chunks.iter().map(|c| dictionary.doc2bow(c)).collect();
        debug!(
            model = self.model.name(),
            chunks = corpus.len(),
            vocabulary = dictionary.len(),
            num_topics,
            "Fitting topic model"
        );
        let distributions = self.model.fit(&corpus, dictionary.len(), num_topics)?;

        Ok(distributions
            .iter()
            .enumerate()
            .map(|(topic_id, weights)| Topic {
                topic_id,
                words: top_words(weights, &dictionary, words_per_topic),
            })
            .collect())
    }
}

fn empty_topics(count: usize) -> Vec<Topic> {
    (0..count)
        .map(|topic_id| Topic {
            topic_id,
            words: Vec::new(),
        })
        .collect()
}

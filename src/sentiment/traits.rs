// Polarity scorer trait, the swap point for sentence scoring.
//
// This trait defines the interface for sentence-level sentiment scoring. The
// default implementation applies the VADER conventions over the published
// VADER lexicon. Anything that produces the same four components can be
// dropped in without touching the aggregator.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Sentiment components for one sentence, or averaged over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Proportion of positive valence, 0.0 to 1.0
    pub positive: f64,
    /// Proportion of negative valence, 0.0 to 1.0
    pub negative: f64,
    /// Proportion of neutral tokens, 0.0 to 1.0
    pub neutral: f64,
    /// Normalized overall intensity, -1.0 (most negative) to 1.0 (most positive)
    pub compound: f64,
}

/// Trait for scoring the polarity of a single sentence.
pub trait PolarityScorer: Send + Sync {
    /// Score one sentence.
    fn polarity_scores(&self, sentence: &str) -> Result<PolarityScores>;

    /// Score multiple sentences, returning results in the same order.
    /// Default implementation calls polarity_scores sequentially.
    fn score_batch(&self, sentences: &[String]) -> Result<Vec<PolarityScores>> {
        let mut results = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            results.push(self.polarity_scores(sentence)?);
        }
        Ok(results)
    }
}

// Document-level sentiment aggregation.
//
// Splits a document into sentences, down-samples long documents evenly,
// scores each sampled sentence and averages the four components.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{PolarityScorer, PolarityScores};
use crate::numeric::{mean, round4};
use crate::text::traits::Tokenizer;

/// Compound threshold for a positive or negative label (VADER convention).
pub const POLARITY_THRESHOLD: f64 = 0.05;

/// Categorical document sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Overall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overall::Positive => write!(f, "positive"),
            Overall::Negative => write!(f, "negative"),
            Overall::Neutral => write!(f, "neutral"),
        }
    }
}

/// Averaged sentiment for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub scores: PolarityScores,
    pub overall: Overall,
    pub sentences_analyzed: usize,
}

/// Label a compound score: >= 0.05 positive, <= -0.05 negative, else neutral.
pub fn classify(compound: f64) -> Overall {
    if compound >= POLARITY_THRESHOLD {
        Overall::Positive
    } else if compound <= -POLARITY_THRESHOLD {
        Overall::Negative
    } else {
        Overall::Neutral
    }
}

/// Sampling stride for `total` sentences under `cap`, or `None` when no
/// sampling is needed.
pub fn sample_step(total: usize, cap: usize) -> Option<usize> {
    if cap > 0 && total > cap {
        Some(total / cap)
    } else {
        None
    }
}

/// Take every `floor(n / cap)`-th item starting at the first, then truncate
/// to `cap`.
///
/// When `n` isn't a multiple of `cap` the truncation drops the tail of the
/// document rather than spreading the samples evenly to the end.
pub fn sample_sentences<T>(sentences: Vec<T>, cap: usize) -> Vec<T> {
    if cap == 0 {
        return Vec::new();
    }
    match sample_step(sentences.len(), cap) {
        Some(step) => sentences.into_iter().step_by(step).take(cap).collect(),
        None => sentences,
    }
}

/// Sentence sampler + scorer + reducer.
pub struct SentimentAggregator {
    tokenizer: Arc<dyn Tokenizer>,
    scorer: Arc<dyn PolarityScorer>,
    sample_size: usize,
}

impl SentimentAggregator {
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        scorer: Arc<dyn PolarityScorer>,
        sample_size: usize,
    ) -> Self {
        Self {
            tokenizer,
            scorer,
            sample_size,
        }
    }

    /// Score a document. Zero sentences gives all-zero scores and a neutral
    /// label; a scorer failure is returned as an error.
    pub fn analyze(&self, text: &str) -> Result<SentimentResult> {
        let sentences = self.tokenizer.sentences(text);
        let total = sentences.len();
        let sampled = sample_sentences(sentences, self.sample_size);

        debug!(
            total_sentences = total,
            sampled = sampled.len(),
            step = sample_step(total, self.sample_size).unwrap_or(1),
            "Sampled sentences for sentiment"
        );

        let results = self.scorer.score_batch(&sampled)?;
        Ok(reduce(&results))
    }
}

/// Average per-sentence scores into a document result.
pub fn reduce(results: &[PolarityScores]) -> SentimentResult {
    let component = |f: fn(&PolarityScores) -> f64| {
        let values: Vec<f64> = results.iter().map(f).collect();
        round4(mean(&values).unwrap_or(0.0))
    };

    let scores = PolarityScores {
        positive: component(|s| s.positive),
        negative: component(|s| s.negative),
        neutral: component(|s| s.neutral),
        compound: component(|s| s.compound),
    };

    SentimentResult {
        overall: classify(scores.compound),
        scores,
        sentences_analyzed: results.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(0.05), Overall::Positive);
        assert_eq!(classify(-0.05), Overall::Negative);
        assert_eq!(classify(0.0), Overall::Neutral);
        assert_eq!(classify(0.0499), Overall::Neutral);
        assert_eq!(classify(-0.0499), Overall::Neutral);
    }

    #[test]
    fn test_sample_step() {
        assert_eq!(sample_step(2500, 1000), Some(2));
        assert_eq!(sample_step(1000, 1000), None);
        assert_eq!(sample_step(1999, 1000), Some(1));
    }

    #[test]
    fn test_sampling_stride_then_truncate() {
        // 2999 sentences, stride 2 -> 1500 candidates, truncated to 1000
        let sampled = sample_sentences((0..2999).collect::<Vec<_>>(), 1000);
        assert_eq!(sampled.len(), 1000);
        assert_eq!(sampled[1], 2);
        assert_eq!(sampled.last(), Some(&1998));

        // 1500 sentences, stride 1 -> only the first 1000 are kept
        let sampled = sample_sentences((0..1500).collect::<Vec<_>>(), 1000);
        assert_eq!(sampled.len(), 1000);
        assert_eq!(sampled.last(), Some(&999));
    }

    #[test]
    fn test_reduce_empty_is_neutral() {
        let result = reduce(&[]);
        assert_eq!(result.overall, Overall::Neutral);
        assert_eq!(result.sentences_analyzed, 0);
        assert_eq!(result.scores, PolarityScores::default());
    }

    #[test]
    fn test_reduce_averages_and_rounds() {
        let a = PolarityScores {
            positive: 0.1,
            negative: 0.0,
            neutral: 0.9,
            compound: 0.2,
        };
        let b = PolarityScores {
            positive: 0.0,
            negative: 0.2,
            neutral: 0.8,
            compound: -0.1,
        };
        let result = reduce(&[a, b]);
        assert_eq!(result.scores.positive, 0.05);
        assert_eq!(result.scores.negative, 0.1);
        assert_eq!(result.scores.neutral, 0.85);
        assert_eq!(result.scores.compound, 0.05);
        assert_eq!(result.overall, Overall::Positive);
        assert_eq!(result.sentences_analyzed, 2);
    }

    #[test]
    fn test_overall_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Overall::Negative).unwrap(), "\"negative\"");
    }
}

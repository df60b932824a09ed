// Topic model trait, the swap point for topic inference.
//
// The extractor only needs per-topic term weights over a compacted
// dictionary. The default implementation is collapsed Gibbs sampling LDA;
// a variational or online LDA could replace it without touching chunking,
// pruning or reporting.

use anyhow::Result;

/// A document as `(term_id, count)` pairs, ordered by term id.
pub type BagOfWords = Vec<(usize, usize)>;

/// Trait for fitting a topic model over bag-of-words documents.
pub trait TopicModel: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Fit `num_topics` topics and return, for each topic, a weight per term
    /// id in `0..vocab_size`. Each topic's weights sum to 1.
    fn fit(
        &self,
        corpus: &[BagOfWords],
        vocab_size: usize,
        num_topics: usize,
    ) -> Result<Vec<Vec<f64>>>;
}

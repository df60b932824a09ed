// Tokenizer trait: swap-ready abstraction.
//
// Like the PolarityScorer and TopicModel traits, this lets the pipeline pick
// a segmentation backend once at startup without any call site knowing which
// one it got. The default uses Unicode text segmentation; a regex splitter
// is available as a fallback.

/// Trait for splitting text into word tokens and sentences.
///
/// Implementations return raw segments. Lowercasing and the alphabetic-only
/// policy are applied by the Preprocessor, not here.
pub trait Tokenizer: Send + Sync {
    /// Short backend name for logs and status output.
    fn name(&self) -> &'static str;

    /// Split text into word-like tokens, in document order.
    fn words(&self, text: &str) -> Vec<String>;

    /// Split text into sentences, in document order, trimmed and non-empty.
    fn sentences(&self, text: &str) -> Vec<String>;
}

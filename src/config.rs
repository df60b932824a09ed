use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Which tokenization backend to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenizerBackend {
    /// Unicode word and sentence boundaries (UAX #29), the default
    Unicode,
    /// Regex-based splitting, fallback for plain ASCII corpora
    Regex,
}

/// Central configuration loaded from environment variables.
///
/// Paths and backend choices come from env vars (or a .env file, loaded
/// automatically at startup via dotenvy). Everything has a default, so a
/// bare `folio analyze` works from the project directory.
pub struct Config {
    /// Directory holding the raw Gutenberg `.txt` downloads
    pub source_dir: PathBuf,
    /// Directory the extractor writes `*_clean.txt` files into
    pub processed_dir: PathBuf,
    /// Where the corpus analysis JSON is written
    pub output_file: PathBuf,
    /// Which tokenizer backend to use (default: Unicode)
    pub tokenizer_backend: TokenizerBackend,
    /// Directory containing downloaded linguistic resources
    pub resource_dir: PathBuf,
    /// Where to fetch the sentiment lexicon from when it is missing
    pub lexicon_url: String,
    /// Whether stopwords are filtered from bag-of-words and topic input
    pub use_stopwords: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let tokenizer_backend = match env::var("FOLIO_TOKENIZER").as_deref() {
            Ok("regex") => TokenizerBackend::Regex,
            // "unicode" or unset both default to Unicode
            Ok("unicode") | Err(_) => TokenizerBackend::Unicode,
            Ok(other) => anyhow::bail!(
                "Unknown FOLIO_TOKENIZER value '{other}'. Expected 'unicode' or 'regex'."
            ),
        };

        let use_stopwords = match env::var("FOLIO_USE_STOPWORDS").as_deref() {
            Ok("0") | Ok("false") | Ok("no") => false,
            _ => true,
        };

        let resource_dir = env::var("FOLIO_RESOURCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::resources::default_resource_dir());

        Ok(Self {
            source_dir: env::var("FOLIO_SOURCE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            processed_dir: env::var("FOLIO_PROCESSED_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/processed")),
            output_file: env::var("FOLIO_OUTPUT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/analysis_results.json")),
            tokenizer_backend,
            resource_dir,
            lexicon_url: env::var("FOLIO_LEXICON_URL")
                .unwrap_or_else(|_| crate::resources::DEFAULT_LEXICON_URL.to_string()),
            use_stopwords,
        })
    }

    /// Check that the sentiment lexicon has been downloaded.
    /// Call this before any operation that scores sentiment.
    pub fn require_lexicon(&self) -> Result<()> {
        if !crate::resources::lexicon_present(&self.resource_dir) {
            anyhow::bail!(
                "Sentiment lexicon not found in {}\n\
                 Run `folio setup` to download it.",
                self.resource_dir.display()
            );
        }
        Ok(())
    }
}

/// Tunable knobs of the analysis pipeline.
///
/// Defaults match the published pipeline; the CLI overrides individual
/// fields from flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Maximum number of sentences scored per document
    pub sentence_cap: usize,
    /// Requested number of topics
    pub num_topics: usize,
    /// Top terms reported per topic
    pub words_per_topic: usize,
    /// Tokens per topic-model pseudo-document
    pub chunk_size: usize,
    /// Trailing chunks shorter than this are discarded
    pub min_chunk_size: usize,
    /// Minimum number of chunks a term must appear in
    pub no_below: usize,
    /// Maximum fraction of chunks a term may appear in
    pub no_above: f64,
    /// Topic model passes over the corpus
    pub passes: usize,
    /// Gibbs sweeps per pass
    pub iterations: usize,
    /// Topic model random seed
    pub seed: u64,
    /// Number of word frequencies kept in the report
    pub top_words: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sentence_cap: 1000,
            num_topics: 5,
            words_per_topic: 10,
            chunk_size: 500,
            min_chunk_size: 10,
            no_below: 2,
            no_above: 0.5,
            passes: 10,
            iterations: 50,
            seed: 42,
            top_words: 100,
        }
    }
}

// Document analyzer and corpus batch run.
//
// Each document runs through sentiment, lexical diversity, topics and word
// frequencies independently. In a batch, a document that fails is logged and
// left out while the rest of the corpus carries on; the caller decides how
// to report the failures.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use super::{write_results, AnalysisRecord, AnalysisResults};
use crate::config::{AnalysisSettings, Config};
use crate::extract::{list_text_files, CLEAN_SUFFIX};
use crate::resources;
use crate::sentiment::aggregate::SentimentAggregator;
use crate::sentiment::traits::PolarityScorer;
use crate::sentiment::vader::VaderScorer;
use crate::text::preprocess::Preprocessor;
use crate::text::tokenizer_for;
use crate::topics::extractor::TopicExtractor;

/// Cleaned files whose name contains this are not books.
const IGNORED_NAME: &str = "requirements";

/// A document that could not be analyzed.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub title: String,
    pub error: String,
}

/// Outcome of a corpus run: the written records plus any failures.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: AnalysisResults,
    pub failures: Vec<DocumentFailure>,
}

/// Runs every analysis stage over one document.
pub struct TextAnalyzer {
    preprocessor: Preprocessor,
    sentiment: SentimentAggregator,
    topics: TopicExtractor,
    settings: AnalysisSettings,
}

impl TextAnalyzer {
    pub fn new(
        preprocessor: Preprocessor,
        sentiment: SentimentAggregator,
        topics: TopicExtractor,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            preprocessor,
            sentiment,
            topics,
            settings,
        }
    }

    /// Wire up the default stages for a scorer: the configured tokenizer,
    /// the English stopword list and Gibbs LDA.
    pub fn with_scorer(
        config: &Config,
        scorer: Arc<dyn PolarityScorer>,
        settings: AnalysisSettings,
    ) -> Self {
        let tokenizer = tokenizer_for(config.tokenizer_backend);
        Self::new(
            Preprocessor::new(tokenizer.clone(), config.use_stopwords),
            SentimentAggregator::new(tokenizer, scorer, settings.sentence_cap),
            TopicExtractor::with_default_model(&settings),
            settings,
        )
    }

    /// Build the default analyzer, loading the downloaded lexicon.
    pub fn from_config(config: &Config, settings: AnalysisSettings) -> Result<Self> {
        config.require_lexicon()?;
        let scorer = VaderScorer::load(&resources::lexicon_path(&config.resource_dir))?;
        Ok(Self::with_scorer(config, Arc::new(scorer), settings))
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze one document's text.
    pub fn analyze_text(&self, title: &str, text: &str) -> Result<AnalysisRecord> {
        let sentiment = self
            .sentiment
            .analyze(text)
            .with_context(|| format!("Sentiment analysis failed for {title}"))?;
        let lexical_diversity = self.preprocessor.lexical_diversity(text);

        let content = self.preprocessor.content_tokens(text);
        let topics = self
            .topics
            .extract_topics(
                &content,
                self.settings.num_topics,
                self.settings.words_per_topic,
            )
            .with_context(|| format!("Topic extraction failed for {title}"))?;

        let word_frequencies = self
            .preprocessor
            .word_frequencies(text, self.settings.top_words);

        info!(
            title,
            sentences = sentiment.sentences_analyzed,
            overall = %sentiment.overall,
            words = lexical_diversity.total_words,
            topics = topics.len(),
            "Analyzed document"
        );

        Ok(AnalysisRecord {
            title: title.to_string(),
            sentiment,
            lexical_diversity,
            topics,
            word_frequencies,
        })
    }

    /// Read and analyze one cleaned file.
    pub fn analyze_file(&self, title: &str, path: &Path) -> Result<AnalysisRecord> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        self.analyze_text(title, text)
    }

    /// Analyze every `*_clean.txt` file in `input_dir` and write the
    /// successful records to `output_file`.
    ///
    /// A failing document is logged and reported in `failures`; it never
    /// stops the rest of the corpus. Errors only when the directory can't be
    /// listed or the results can't be written.
    pub fn analyze_all(&self, input_dir: &Path, output_file: &Path) -> Result<BatchOutcome> {
        let files = list_text_files(input_dir, is_book_stem)?;
        info!(count = files.len(), dir = %input_dir.display(), "Found cleaned texts");

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Analyzing [{bar:30}] {pos}/{len} {msg}")
                .expect("valid template"),
        );

        let mut outcome = BatchOutcome::default();
        for path in &files {
            let title = title_for(path);
            pb.set_message(title.clone());

            match self.analyze_file(&title, path) {
                Ok(record) => {
                    outcome.results.insert(title, record);
                }
                Err(e) => {
                    let message = format!("{e:#}");
                    error!(
                        title = %title,
                        error = %message,
                        "Failed to analyze document, skipping"
                    );
                    outcome.failures.push(DocumentFailure {
                        title,
                        error: message,
                    });
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        write_results(&outcome.results, output_file)?;
        Ok(outcome)
    }
}

/// True for cleaned files that hold a book. Names containing "requirements"
/// in any case are not books.
pub fn is_book_stem(stem: &str) -> bool {
    stem.ends_with(CLEAN_SUFFIX) && !stem.to_lowercase().contains(IGNORED_NAME)
}

/// Document title: the file stem without the `_clean` suffix.
pub fn title_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_suffix(CLEAN_SUFFIX) {
        Some(title) => title.to_string(),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_requirements_skipped_in_any_case() {
        assert!(is_book_stem("dracula_clean"));
        assert!(!is_book_stem("dracula"));
        assert!(!is_book_stem("requirements_clean"));
        assert!(!is_book_stem("Requirements_clean"));
        assert!(!is_book_stem("PROJECT_REQUIREMENTS_clean"));
    }

    #[test]
    fn test_title_strips_clean_suffix() {
        assert_eq!(title_for(&PathBuf::from("data/dracula_clean.txt")), "dracula");
        assert_eq!(title_for(&PathBuf::from("frankenstein.txt")), "frankenstein");
        assert_eq!(
            title_for(&PathBuf::from("the_clean_room_clean.txt")),
            "the_clean_room"
        );
    }
}

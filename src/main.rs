use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use folio::config::{AnalysisSettings, Config};
use folio::output::terminal;
use folio::report::analyzer::TextAnalyzer;
use folio::report::load_results;
use folio::resources;
use folio::text::frequency::WordFrequencies;
use folio::text::preprocess::Preprocessor;
use folio::text::tokenizer_for;

/// Folio: descriptive text analysis for a corpus of public-domain novels.
///
/// Strips Project Gutenberg boilerplate, then measures sentiment, lexical
/// diversity, topics and word frequencies for every book.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the sentiment lexicon if it is missing
    Setup,

    /// Strip Gutenberg headers and footers from raw .txt files
    Extract {
        /// Directory of raw downloads (default: FOLIO_SOURCE_DIR or .)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Where to write *_clean.txt files (default: FOLIO_PROCESSED_DIR)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show vocabulary statistics and top words for one file
    Preprocess {
        /// The text file to inspect
        file: PathBuf,

        /// Number of top words to list
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Analyze every cleaned text and write the results file
    Analyze {
        /// Directory of *_clean.txt files (default: FOLIO_PROCESSED_DIR)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Results file (default: FOLIO_OUTPUT_FILE)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Topics to infer per text (default: 5)
        #[arg(long, default_value = "5")]
        topics: usize,

        /// Terms reported per topic (default: 10)
        #[arg(long, default_value = "10")]
        words_per_topic: usize,

        /// Maximum sentences scored per text (default: 1000)
        #[arg(long, default_value = "1000")]
        sample_size: usize,

        /// Word frequencies kept per text (default: 100)
        #[arg(long, default_value = "100")]
        top_words: usize,
    },

    /// Print the summary of an existing results file
    Summary {
        /// Results file (default: FOLIO_OUTPUT_FILE)
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("folio=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Setup => {
            terminal::display_banner("Folio Setup");
            let status =
                resources::ensure_present(&config.resource_dir, &config.lexicon_url).await?;
            terminal::display_setup_status(&config.resource_dir, status);
        }

        Commands::Extract { source, output } => {
            let source = source.unwrap_or_else(|| config.source_dir.clone());
            let output = output.unwrap_or_else(|| config.processed_dir.clone());

            terminal::display_banner("Gutenberg Text Extraction");
            let results = folio::extract::extract_all(&source, &output)?;
            terminal::display_extraction_summary(&results);
        }

        Commands::Preprocess { file, top } => {
            let preprocessor =
                Preprocessor::new(tokenizer_for(config.tokenizer_backend), config.use_stopwords);
            let processed = preprocessor.process_text_file(&file)?;
            let frequencies = WordFrequencies::from_bag(&processed.bag_of_words, top);
            terminal::display_preprocess(&file, &processed, &frequencies);
        }

        Commands::Analyze {
            input,
            output,
            topics,
            words_per_topic,
            sample_size,
            top_words,
        } => {
            let input = input.unwrap_or_else(|| config.processed_dir.clone());
            let output = output.unwrap_or_else(|| config.output_file.clone());
            let settings = AnalysisSettings {
                num_topics: topics,
                words_per_topic,
                sentence_cap: sample_size,
                top_words,
                ..AnalysisSettings::default()
            };

            resources::ensure_present(&config.resource_dir, &config.lexicon_url).await?;
            let analyzer = TextAnalyzer::from_config(&config, settings)?;

            terminal::display_banner("Corpus Analysis");
            info!(input = %input.display(), output = %output.display(), "Starting analysis");

            let outcome = analyzer.analyze_all(&input, &output)?;
            terminal::display_analysis_summary(&outcome.results);
            println!("Results saved to: {}", output.display().to_string().bold());

            if !outcome.failures.is_empty() {
                terminal::display_failures(&outcome.failures);
                anyhow::bail!(
                    "{} of {} documents failed to analyze",
                    outcome.failures.len(),
                    outcome.failures.len() + outcome.results.len()
                );
            }
        }

        Commands::Summary { file } => {
            let file = file.unwrap_or_else(|| config.output_file.clone());
            let results = load_results(&file)?;
            terminal::display_analysis_summary(&results);
        }
    }

    Ok(())
}

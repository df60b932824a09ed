// Colored terminal output for extraction, preprocessing and analysis runs.
//
// main.rs decides what to show; this module owns how it looks.

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;

use crate::extract::ExtractedFile;
use crate::report::analyzer::DocumentFailure;
use crate::report::AnalysisResults;
use crate::resources::ResourceStatus;
use crate::sentiment::aggregate::Overall;
use crate::text::frequency::WordFrequencies;
use crate::text::preprocess::ProcessedText;

/// Print a section banner.
pub fn display_banner(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
}

/// Report the state of the sentiment lexicon after `setup`.
pub fn display_setup_status(dir: &Path, status: ResourceStatus) {
    let state = match status {
        ResourceStatus::AlreadyPresent => "already present".dimmed(),
        ResourceStatus::Downloaded => "downloaded".green(),
    };
    println!("  {} Sentiment lexicon ({state})", "✓".green());
    println!("  Resource directory: {}", dir.display().to_string().dimmed());
    println!("\n{}", "Setup complete!".green().bold());
}

/// List the files written by `extract`.
pub fn display_extraction_summary(results: &BTreeMap<String, ExtractedFile>) {
    if results.is_empty() {
        println!("No .txt files found to extract.");
        return;
    }

    display_banner(&format!("Extraction Complete ({} texts)", results.len()));
    println!();
    for (title, file) in results {
        println!(
            "  {:<32} {:>10} words  -> {}",
            super::truncate_chars(title, 30),
            with_commas(file.word_count),
            file.processed.display().to_string().dimmed(),
        );
    }
}

/// Vocabulary statistics and top words for a single preprocessed file.
pub fn display_preprocess(path: &Path, processed: &ProcessedText, top: &WordFrequencies) {
    let vocab = &processed.vocabulary;
    display_banner(&format!("Vocabulary for {}", path.display()));
    println!("  Characters:      {}", with_commas(processed.text_length));
    println!(
        "  Words:           {}  (unique {})",
        with_commas(vocab.total_words),
        with_commas(vocab.unique_words)
    );
    println!(
        "  Content words:   {}  (unique {})",
        with_commas(vocab.content_words),
        with_commas(vocab.unique_content_words)
    );
    println!(
        "  TTR: {:.4}  Content TTR: {:.4}",
        vocab.type_token_ratio, vocab.content_type_token_ratio
    );

    if !top.is_empty() {
        println!("\n  {} most frequent content words:", top.len());
        for (i, (word, count)) in top.iter().enumerate() {
            println!("    {:>3}. {:<20} {:>8}", i + 1, word, with_commas(count));
        }
    }
}

/// Per-document summary of a results mapping.
pub fn display_analysis_summary(results: &AnalysisResults) {
    if results.is_empty() {
        println!("No documents analyzed. Run `folio extract` first.");
        return;
    }

    display_banner(&format!("Analysis Summary ({} texts)", results.len()));

    for (title, record) in results {
        let diversity = &record.lexical_diversity;
        let sentiment = &record.sentiment;
        println!("\n  {}", title.bold());
        println!(
            "    Words: {} | Unique: {} | TTR: {:.4}",
            with_commas(diversity.total_words),
            with_commas(diversity.unique_words),
            diversity.type_token_ratio
        );
        println!(
            "    Sentiment: {} (compound: {:.4}, {} sentences)",
            colorize_overall(sentiment.overall),
            sentiment.scores.compound,
            sentiment.sentences_analyzed
        );

        for topic in &record.topics {
            let words: Vec<&str> = topic.words.iter().take(5).map(|w| w.word.as_str()).collect();
            let label = if words.is_empty() {
                "(no words)".dimmed().to_string()
            } else {
                words.join(", ")
            };
            println!("    Topic {}: {}", topic.topic_id, label);
        }
    }
    println!();
}

/// List the documents that failed in a batch run.
pub fn display_failures(failures: &[DocumentFailure]) {
    if failures.is_empty() {
        return;
    }
    println!(
        "\n  {} {} document(s) failed:",
        "!!".red().bold(),
        failures.len()
    );
    for failure in failures {
        println!(
            "    {} {}",
            failure.title.red(),
            super::truncate_chars(&failure.error, 120).dimmed()
        );
    }
}

fn colorize_overall(overall: Overall) -> colored::ColoredString {
    let label = overall.to_string();
    match overall {
        Overall::Positive => label.green(),
        Overall::Negative => label.red(),
        Overall::Neutral => label.yellow(),
    }
}

/// Format an integer with thousands separators.
pub fn with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

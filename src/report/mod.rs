// Per-document analysis records and the corpus results file.
//
// The results file is one indented JSON object keyed by title, each value
// an AnalysisRecord. A BTreeMap keeps titles sorted so reruns over the same
// corpus produce identical files.

pub mod analyzer;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sentiment::aggregate::SentimentResult;
use crate::text::frequency::WordFrequencies;
use crate::text::preprocess::LexicalDiversity;
use crate::topics::extractor::Topic;

/// Everything computed for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub title: String,
    pub sentiment: SentimentResult,
    pub lexical_diversity: LexicalDiversity,
    pub topics: Vec<Topic>,
    pub word_frequencies: WordFrequencies,
}

/// Title -> record, sorted by title.
pub type AnalysisResults = BTreeMap<String, AnalysisRecord>;

/// Write results as indented JSON, creating the parent directory if needed.
pub fn write_results(results: &AnalysisResults, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(documents = results.len(), path = %path.display(), "Wrote analysis results");
    Ok(())
}

/// Read a results file written by `write_results`.
pub fn load_results(path: &Path) -> Result<AnalysisResults> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse results file {}", path.display()))
}

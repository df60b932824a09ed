// Gutenberg boilerplate extraction.
//
// Project Gutenberg plain-text files wrap the actual book between a licence
// header and footer, each introduced by a marker line such as
//
//   *** START OF THE PROJECT GUTENBERG EBOOK DRACULA ***
//
// The extractor keeps only the text between the two markers. A file without
// markers is passed through whole with a warning; this is a degraded path,
// never an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Suffix appended to the stem of every cleaned output file.
pub const CLEAN_SUFFIX: &str = "_clean";

static START_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*\* START OF (?:THE|THIS) PROJECT GUTENBERG EBOOK .+ \*\*\*")
        .expect("valid start marker pattern")
});

static END_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*\* END OF (?:THE|THIS) PROJECT GUTENBERG EBOOK .+ \*\*\*")
        .expect("valid end marker pattern")
});

/// The cleaned body of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub text: String,
    /// False when either marker was missing and the whole input was kept
    pub markers_found: bool,
    /// Whitespace-separated token count of `text`
    pub word_count: usize,
}

/// One entry of the batch extraction summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFile {
    pub original: PathBuf,
    pub processed: PathBuf,
    pub word_count: usize,
}

/// Strip boilerplate from a raw document and normalize it.
///
/// Never fails: if either marker is missing the whole document is kept and
/// `markers_found` is false so the caller can warn. An END marker that comes
/// before the START marker yields an empty text.
pub fn extract_text(raw: &str) -> Extraction {
    let content = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let start = START_MARKER.find(content);
    let end = END_MARKER.find(content);

    // An END marker ahead of the START marker leaves an empty body
    let (body, markers_found) = match (start, end) {
        (Some(s), Some(e)) => (content.get(s.end()..e.start()).unwrap_or_default(), true),
        _ => (content, false),
    };

    let text = normalize_line_endings(body.trim());
    let word_count = text.split_whitespace().count();

    Extraction {
        text,
        markers_found,
        word_count,
    }
}

/// Convert CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read and extract a single source file.
pub fn extract_file(path: &Path) -> Result<Extraction> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let extraction = extract_text(&raw);
    if !extraction.markers_found {
        warn!(
            file = %path.display(),
            "Could not find START/END markers, keeping the whole file"
        );
    }
    Ok(extraction)
}

/// Extract every `.txt` file directly inside `source_dir` into
/// `processed_dir` as `<stem>_clean.txt`.
///
/// Creates `processed_dir` if needed. Subdirectories are not searched, and
/// files that are already cleaned outputs are skipped. Returns a summary
/// keyed by source file stem.
pub fn extract_all(
    source_dir: &Path,
    processed_dir: &Path,
) -> Result<BTreeMap<String, ExtractedFile>> {
    std::fs::create_dir_all(processed_dir).with_context(|| {
        format!(
            "Failed to create processed directory: {}",
            processed_dir.display()
        )
    })?;

    let sources = list_text_files(source_dir, |stem| !stem.ends_with(CLEAN_SUFFIX))?;
    info!(count = sources.len(), dir = %source_dir.display(), "Found source texts");

    let mut results = BTreeMap::new();

    for source in sources {
        let Some(stem) = file_stem(&source) else {
            continue;
        };

        let extraction = extract_file(&source)?;
        let output = processed_dir.join(format!("{stem}{CLEAN_SUFFIX}.txt"));
        std::fs::write(&output, &extraction.text)
            .with_context(|| format!("Failed to write {}", output.display()))?;

        info!(
            file = %source.display(),
            words = extraction.word_count,
            output = %output.display(),
            "Extracted text"
        );

        results.insert(
            stem,
            ExtractedFile {
                original: source,
                processed: output,
                word_count: extraction.word_count,
            },
        );
    }

    Ok(results)
}

/// List `*.txt` files directly inside `dir` whose stem passes `keep`,
/// sorted by path.
pub fn list_text_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        if file_stem(&path).is_some_and(|stem| keep(stem.as_str())) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = "\u{feff}The Project Gutenberg eBook of Dracula\r\n\
        Licence blah\r\n\
        *** START OF THE PROJECT GUTENBERG EBOOK DRACULA ***\r\n\
        \r\n\
        CHAPTER I\r\n\
        Jonathan Harker's Journal\r\r\
        *** END OF THE PROJECT GUTENBERG EBOOK DRACULA ***\r\n\
        More licence text\r\n";

    #[test]
    fn test_extracts_between_markers() {
        let extraction = extract_text(BOOK);
        assert!(extraction.markers_found);
        assert_eq!(extraction.text, "CHAPTER I\nJonathan Harker's Journal");
        assert_eq!(extraction.word_count, 5);
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let raw = "*** start of this project gutenberg ebook carmilla ***\nbody\n\
                   *** End Of This Project Gutenberg eBook Carmilla ***";
        let extraction = extract_text(raw);
        assert!(extraction.markers_found);
        assert_eq!(extraction.text, "body");
    }

    #[test]
    fn test_missing_end_marker_passes_through() {
        let raw = "*** START OF THE PROJECT GUTENBERG EBOOK X ***\nbody only";
        let extraction = extract_text(raw);
        assert!(!extraction.markers_found);
        assert_eq!(extraction.text, raw);
    }

    #[test]
    fn test_end_before_start_leaves_empty_body() {
        let raw = "*** END OF THE PROJECT GUTENBERG EBOOK X ***\nlicence\n\
                   *** START OF THE PROJECT GUTENBERG EBOOK X ***\nbody";
        let extraction = extract_text(raw);
        assert!(extraction.markers_found);
        assert_eq!(extraction.text, "");
        assert_eq!(extraction.word_count, 0);
    }

    #[test]
    fn test_marker_requires_title() {
        // The boilerplate pattern needs a work title between EBOOK and ***
        let raw = "*** START OF THE PROJECT GUTENBERG EBOOK ***\nx\n\
                   *** END OF THE PROJECT GUTENBERG EBOOK ***";
        assert!(!extract_text(raw).markers_found);
    }

    #[test]
    fn test_bom_is_stripped_on_passthrough() {
        let extraction = extract_text("\u{feff}  plain text \r\n");
        assert_eq!(extraction.text, "plain text");
    }

    #[test]
    fn test_extract_all_writes_clean_files() {
        let base = std::env::temp_dir().join("folio-extract-test");
        let _ = std::fs::remove_dir_all(&base);
        let source = base.join("raw");
        let processed = base.join("processed");
        std::fs::create_dir_all(source.join("nested")).unwrap();
        std::fs::write(source.join("dracula.txt"), BOOK).unwrap();
        std::fs::write(source.join("nested").join("skip.txt"), BOOK).unwrap();
        std::fs::write(source.join("notes.md"), "ignored").unwrap();

        let results = extract_all(&source, &processed).unwrap();

        assert_eq!(results.len(), 1);
        let entry = &results["dracula"];
        assert_eq!(entry.word_count, 5);
        assert_eq!(entry.processed, processed.join("dracula_clean.txt"));
        let written = std::fs::read_to_string(&entry.processed).unwrap();
        assert_eq!(written, "CHAPTER I\nJonathan Harker's Journal");

        // Cleanup
        std::fs::remove_dir_all(&base).unwrap();
    }
}

// Tokenization and preprocessing: the Tokenizer strategy plus the
// stopword-aware Preprocessor built on top of it.

pub mod frequency;
pub mod preprocess;
pub mod regex;
pub mod segment;
pub mod traits;

use std::sync::Arc;

use crate::config::TokenizerBackend;
use traits::Tokenizer;

/// Build the tokenizer for the configured backend.
///
/// Called once at startup; the result is shared by every pipeline stage.
pub fn tokenizer_for(backend: TokenizerBackend) -> Arc<dyn Tokenizer> {
    match backend {
        TokenizerBackend::Unicode => Arc::new(segment::UnicodeTokenizer),
        TokenizerBackend::Regex => Arc::new(regex::RegexTokenizer::new()),
    }
}

/// Contraction suffixes split off a word, as Penn Treebank tokenizers do.
const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

/// Split a trailing clitic off `word`: "Harker's" -> "Harker", "'s" and
/// "don't" -> "do", "n't". Straight and curly apostrophes are equivalent;
/// clitics are emitted with a straight one.
pub fn split_clitics(word: &str) -> Vec<String> {
    let last_apostrophe = word
        .char_indices()
        .rev()
        .find(|(_, c)| matches!(c, '\'' | '\u{2019}'));
    let Some((pos, apostrophe)) = last_apostrophe else {
        return vec![word.to_string()];
    };
    let stem = &word[..pos];
    let suffix = &word[pos + apostrophe.len_utf8()..];

    if suffix.eq_ignore_ascii_case("t") && stem.len() > 1 && stem.ends_with(['n', 'N']) {
        return vec![stem[..stem.len() - 1].to_string(), "n't".to_string()];
    }
    if stem.is_empty() {
        return vec![word.to_string()];
    }
    if suffix.is_empty() {
        // Plural possessive ("Harkers'")
        return vec![stem.to_string()];
    }
    if CLITICS.iter().any(|c| suffix.eq_ignore_ascii_case(c)) {
        return vec![stem.to_string(), format!("'{}", suffix.to_lowercase())];
    }
    vec![word.to_string()]
}

/// Split text into paragraphs on blank lines, joining the hard-wrapped
/// lines inside each paragraph with single spaces.
///
/// Gutenberg texts wrap lines at ~70 columns, so a bare newline is not a
/// sentence boundary; a blank line is.
pub fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_join_wrapped_lines() {
        let text = "It was a dark\nand stormy night.\n\n  \nThe end.\n";
        assert_eq!(
            paragraphs(text),
            vec!["It was a dark and stormy night.".to_string(), "The end.".to_string()]
        );
    }

    #[test]
    fn test_split_clitics() {
        assert_eq!(split_clitics("Harker's"), vec!["Harker", "'s"]);
        assert_eq!(split_clitics("don't"), vec!["do", "n't"]);
        assert_eq!(split_clitics("Count\u{2019}s"), vec!["Count", "'s"]);
        assert_eq!(split_clitics("we'll"), vec!["we", "'ll"]);
        assert_eq!(split_clitics("Harkers'"), vec!["Harkers"]);
        assert_eq!(split_clitics("o'clock"), vec!["o'clock"]);
        assert_eq!(split_clitics("night"), vec!["night"]);
    }

    #[test]
    fn test_paragraphs_empty() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs("\n\n \n").is_empty());
    }
}

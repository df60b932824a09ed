// Regex tokenizer: fallback backend.
//
// ASCII-oriented splitting with regex-lite. Selected with
// FOLIO_TOKENIZER=regex for corpora where the Unicode tables are overkill.

use regex_lite::Regex;

use super::{paragraphs, split_clitics};
use super::traits::Tokenizer;

/// Regex-based word and sentence splitting.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    word: Regex,
    sentence_end: Regex,
}

impl RegexTokenizer {
    pub fn new() -> Self {
        Self {
            word: Regex::new(r"[A-Za-z0-9]+(?:['\x{2019}][A-Za-z]+)*").expect("valid word pattern"),
            // Terminal punctuation, optional closing quotes/brackets, then whitespace
            sentence_end: Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("valid sentence pattern"),
        }
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for RegexTokenizer {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn words(&self, text: &str) -> Vec<String> {
        self.word
            .find_iter(text)
            .flat_map(|m| split_clitics(m.as_str()))
            .collect()
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();

        for paragraph in paragraphs(text) {
            let mut start = 0;
            for m in self.sentence_end.find_iter(&paragraph) {
                let sentence = paragraph[start..m.end()].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = m.end();
            }
            let rest = paragraph[start..].trim();
            if !rest.is_empty() {
                sentences.push(rest.to_string());
            }
        }

        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        let words = RegexTokenizer::new().words("It's 1897, said Van Helsing.");
        assert_eq!(words, vec!["It", "'s", "1897", "said", "Van", "Helsing"]);
    }

    #[test]
    fn test_words_curly_apostrophe_matches_straight() {
        let tokenizer = RegexTokenizer::new();
        assert_eq!(
            tokenizer.words("the Count\u{2019}s plan"),
            tokenizer.words("the Count's plan")
        );
    }

    #[test]
    fn test_sentences_keep_terminators() {
        let sentences =
            RegexTokenizer::new().sentences("Who is there? \"Nobody!\" she cried.\nThen silence");
        assert_eq!(
            sentences,
            vec!["Who is there?", "\"Nobody!\"", "she cried.", "Then silence"]
        );
    }
}

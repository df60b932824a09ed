// Unicode segmentation tokenizer: the default backend.
//
// Word and sentence boundaries follow UAX #29 via the unicode-segmentation
// crate. Sentences are found per paragraph so hard line wraps don't split
// them.

use unicode_segmentation::UnicodeSegmentation;

use super::{paragraphs, split_clitics};
use super::traits::Tokenizer;

/// UAX #29 word and sentence segmentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn name(&self) -> &'static str {
        "unicode"
    }

    fn words(&self, text: &str) -> Vec<String> {
        text.unicode_words().flat_map(split_clitics).collect()
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        paragraphs(text)
            .iter()
            .flat_map(|p| {
                p.unicode_sentences()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

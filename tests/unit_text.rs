// Unit tests for extraction and preprocessing.
//
// Tests the pure text functions through the public API: marker extraction
// idempotence, vocabulary invariants, stopword handling and the ranked
// word-frequency encoding, under both tokenizer backends.

use folio::config::TokenizerBackend;
use folio::extract::extract_text;
use folio::text::frequency::WordFrequencies;
use folio::text::preprocess::Preprocessor;
use folio::text::tokenizer_for;

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog. The dog was really lazy!";

fn preprocessor(backend: TokenizerBackend) -> Preprocessor {
    Preprocessor::new(tokenizer_for(backend), true)
}

// ============================================================
// Extraction
// ============================================================

#[test]
fn extraction_is_idempotent_without_markers() {
    let raw = "  Chapter I\r\n\r\nIt was a dark and stormy night.\r\n";
    let once = extract_text(raw);
    let twice = extract_text(&once.text);
    assert!(!once.markers_found);
    assert_eq!(once.text, twice.text);
    assert_eq!(once.text, "Chapter I\n\nIt was a dark and stormy night.");
}

#[test]
fn extraction_keeps_only_the_body() {
    let raw = "Licence header\n\
               *** START OF THE PROJECT GUTENBERG EBOOK CARMILLA ***\n\
               In Styria, we, though by no means magnificent people, inhabit a castle.\n\
               *** END OF THE PROJECT GUTENBERG EBOOK CARMILLA ***\n\
               Licence footer";
    let extraction = extract_text(raw);
    assert!(extraction.markers_found);
    assert!(extraction.text.starts_with("In Styria"));
    assert!(!extraction.text.contains("Licence"));
    assert_eq!(extraction.word_count, 12);
}

// ============================================================
// Vocabulary invariants
// ============================================================

#[test]
fn vocabulary_ratios_are_bounded() {
    for backend in [TokenizerBackend::Unicode, TokenizerBackend::Regex] {
        let stats = preprocessor(backend).get_vocabulary(SAMPLE);
        assert!(stats.unique_words <= stats.total_words);
        assert!(stats.unique_content_words <= stats.content_words);
        assert!(stats.type_token_ratio > 0.0 && stats.type_token_ratio <= 1.0);
        assert!(stats.content_type_token_ratio <= 1.0);
    }
}

#[test]
fn type_token_ratio_zero_iff_no_words() {
    let p = preprocessor(TokenizerBackend::Unicode);
    let empty = p.get_vocabulary("");
    assert_eq!(empty.total_words, 0);
    assert_eq!(empty.type_token_ratio, 0.0);

    let one = p.get_vocabulary("Gloom");
    assert_eq!(one.total_words, 1);
    assert_eq!(one.type_token_ratio, 1.0);
}

#[test]
fn both_backends_agree_on_the_sample() {
    let unicode = preprocessor(TokenizerBackend::Unicode).create_bag_of_words(SAMPLE);
    let regex = preprocessor(TokenizerBackend::Regex).create_bag_of_words(SAMPLE);
    assert_eq!(unicode, regex);
}

#[test]
fn possessives_and_contractions_keep_their_stems() {
    let text = "Harker's journal. I don't know the Count\u{2019}s plan.";
    for backend in [TokenizerBackend::Unicode, TokenizerBackend::Regex] {
        let tokens = preprocessor(backend).tokenize(text);
        assert_eq!(
            tokens,
            vec!["harker", "journal", "i", "do", "know", "the", "count", "plan"],
            "{backend:?}"
        );
    }
}

#[test]
fn sample_bag_of_words_with_stopwords() {
    let bag = preprocessor(TokenizerBackend::Unicode).create_bag_of_words(SAMPLE);
    assert_eq!(bag.get("lazy"), Some(&2));
    assert_eq!(bag.get("fox"), Some(&1));
    assert!(!bag.contains_key("the"));
}

#[test]
fn lexical_density_is_content_share() {
    let p = preprocessor(TokenizerBackend::Unicode);
    let diversity = p.lexical_diversity(SAMPLE);
    let vocab = p.get_vocabulary(SAMPLE);
    assert_eq!(diversity.total_words, vocab.total_words);
    assert_eq!(diversity.content_words, vocab.content_words);
    assert!(diversity.lexical_density > 0.0 && diversity.lexical_density < 1.0);
}

// ============================================================
// Word frequencies
// ============================================================

#[test]
fn word_frequencies_rank_by_count_then_word() {
    let p = preprocessor(TokenizerBackend::Unicode);
    let top = p.word_frequencies(SAMPLE, 3);
    let words: Vec<&str> = top.iter().map(|(w, _)| w).collect();
    assert_eq!(words, vec!["dog", "lazy", "brown"]);
}

#[test]
fn word_frequencies_serialize_in_rank_order() {
    let p = preprocessor(TokenizerBackend::Unicode);
    let top = p.word_frequencies(SAMPLE, 3);
    let json = serde_json::to_string(&top).unwrap();
    assert_eq!(json, r#"{"dog":2,"lazy":2,"brown":1}"#);

    let back: WordFrequencies = serde_json::from_str(&json).unwrap();
    assert_eq!(back, top);
}

#[test]
fn stopwords_can_be_disabled() {
    let p = Preprocessor::new(tokenizer_for(TokenizerBackend::Unicode), false);
    assert!(!p.uses_stopwords());
    let top = p.word_frequencies(SAMPLE, 1);
    assert_eq!(top.iter().collect::<Vec<_>>(), vec![("the", 3)]);
}

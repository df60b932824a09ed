// Unit tests for topic extraction.
//
// Tests the chunking and topic-count clamping rules, dictionary pruning on
// realistic chunk counts, and reproducibility of seeded fits.

use folio::config::AnalysisSettings;
use folio::topics::dictionary::{Dictionary, DEFAULT_KEEP_N};
use folio::topics::extractor::{chunk_tokens, TopicExtractor};

const GRAVEYARD: [&str; 5] = ["grave", "crypt", "coffin", "bones", "tomb"];
const GARDEN: [&str; 5] = ["rose", "meadow", "blossom", "lark", "brook"];

/// Ten 20-token chunks: five about graveyards, five about gardens.
fn two_theme_tokens() -> Vec<String> {
    (0..10)
        .flat_map(|chunk| {
            let words = if chunk < 5 { GRAVEYARD } else { GARDEN };
            (0..20).map(move |i| words[(i + chunk) % words.len()].to_string())
        })
        .collect()
}

fn small_settings() -> AnalysisSettings {
    AnalysisSettings {
        chunk_size: 20,
        passes: 3,
        iterations: 20,
        ..AnalysisSettings::default()
    }
}

// ============================================================
// Chunking and clamping
// ============================================================

#[test]
fn three_chunks_five_requested_gives_three_topics() {
    let tokens: Vec<String> = (0..1500).map(|i| format!("word{}", i % 40)).collect();
    assert_eq!(chunk_tokens(&tokens, 500, 10).len(), 3);

    let extractor = TopicExtractor::with_default_model(&AnalysisSettings::default());
    let topics = extractor.extract_topics(&tokens, 5, 10).unwrap();
    assert_eq!(topics.len(), 3);
    let ids: Vec<usize> = topics.iter().map(|t| t.topic_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn single_chunk_gives_one_topic() {
    let tokens: Vec<String> = (0..12).map(|i| format!("word{i}")).collect();
    let extractor = TopicExtractor::with_default_model(&AnalysisSettings::default());
    let topics = extractor.extract_topics(&tokens, 5, 10).unwrap();
    assert_eq!(topics.len(), 1);
    assert!(topics[0].words.is_empty());
}

#[test]
fn no_chunks_gives_no_topics() {
    let extractor = TopicExtractor::with_default_model(&AnalysisSettings::default());
    assert!(extractor.extract_topics(&[], 5, 10).unwrap().is_empty());
}

// ============================================================
// Dictionary pruning
// ============================================================

#[test]
fn themed_terms_survive_pruning() {
    let chunks = chunk_tokens(&two_theme_tokens(), 20, 10);
    assert_eq!(chunks.len(), 10);

    let mut dictionary = Dictionary::from_documents(&chunks);
    dictionary.filter_extremes(2, 0.5, DEFAULT_KEEP_N);
    // Every term appears in exactly 5 of 10 chunks: at the no_above limit
    assert_eq!(dictionary.len(), 10);
    assert_eq!(dictionary.word(0), Some("grave"));
    assert_eq!(dictionary.doc_freq("rose"), 5);
}

// ============================================================
// Fitted topics
// ============================================================

#[test]
fn fitted_topics_are_well_formed() {
    let extractor = TopicExtractor::with_default_model(&small_settings());
    let topics = extractor.extract_topics(&two_theme_tokens(), 2, 4).unwrap();

    assert_eq!(topics.len(), 2);
    for topic in &topics {
        assert_eq!(topic.words.len(), 4);
        for pair in topic.words.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
        for word in &topic.words {
            assert!(word.weight > 0.0 && word.weight <= 1.0);
            let word = word.word.as_str();
            assert!(GRAVEYARD.contains(&word) || GARDEN.contains(&word));
        }
    }
}

#[test]
fn fits_are_reproducible_for_a_fixed_seed() {
    let extractor = TopicExtractor::with_default_model(&small_settings());
    let first = extractor.extract_topics(&two_theme_tokens(), 2, 5).unwrap();
    let second = extractor.extract_topics(&two_theme_tokens(), 2, 5).unwrap();
    assert_eq!(first, second);
}

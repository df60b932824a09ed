// VADER-convention polarity scorer.
//
// Scores a sentence against the VADER lexicon using the VADER heuristics:
// booster words scale a neighbouring valence and a negation in the preceding
// three tokens flips and dampens it ("never so" intensifies, "without doubt"
// is neutral, "least" negates). Fixed idioms override a word's valence,
// ALL-CAPS words in mixed-case text are emphasized, "but" shifts weight to
// the second clause, and trailing exclamation/question marks amplify the
// total. The sum is squashed into a compound score in [-1, 1] with
// s / sqrt(s^2 + 15).

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;

use super::lexicon::Lexicon;
use super::traits::{PolarityScorer, PolarityScores};
use crate::numeric::round_to;

/// Booster increment/decrement.
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
/// Emphasis added to an ALL-CAPS word in mixed-case text.
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
const N_SCALAR: f64 = -0.74;
/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

static BOOSTERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let increments = [
        "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
        "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
        "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping",
        "flippin", "frackin", "fracking", "fricking", "frickin", "frigging", "friggin", "fully",
        "fuckin", "fucking", "fuggin", "fugging", "greatly", "hella", "highly", "hugely",
        "incredible", "incredibly", "intensely", "major", "majorly", "more", "most",
        "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
        "thoroughly", "total", "totally", "tremendous", "tremendously", "uber", "unbelievably",
        "unusually", "utter", "utterly", "very",
    ];
    let decrements = [
        "almost", "barely", "hardly", "kinda", "kindof", "kind-of", "less", "little",
        "marginal", "marginally", "occasional", "occasionally", "partly", "scarce", "scarcely",
        "slight", "slightly", "somewhat", "sorta", "sortof", "sort-of", "kind of", "sort of",
    ];
    increments
        .into_iter()
        .map(|w| (w, B_INCR))
        .chain(decrements.into_iter().map(|w| (w, B_DECR)))
        .collect()
});

/// Phrases whose valence replaces that of the word they contain.
static SPECIAL_CASES: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([
        ("the shit", 3.0),
        ("the bomb", 3.0),
        ("bad ass", 1.5),
        ("badass", 1.5),
        ("bus stop", 0.0),
        ("yeah right", -2.0),
        ("kiss of death", -1.5),
        ("to die for", 3.0),
        ("beating heart", 3.1),
        ("broken heart", -2.9),
    ])
});

/// Polarity scorer over a VADER-format lexicon.
pub struct VaderScorer {
    lexicon: Lexicon,
}

impl VaderScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Load the lexicon file and build a scorer.
    pub fn load(lexicon_path: &Path) -> Result<Self> {
        Ok(Self::new(Lexicon::load(lexicon_path)?))
    }

    /// Score one sentence. Infallible once the lexicon is loaded.
    pub fn score(&self, text: &str) -> PolarityScores {
        let tokens: Vec<&str> = text.split_whitespace().map(strip_punctuation).collect();
        if tokens.is_empty() {
            return PolarityScores::default();
        }
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_diff = is_cap_diff(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let word = lowered[i].as_str();
            let is_kind_of = word == "kind" && lowered.get(i + 1).is_some_and(|n| n == "of");
            if BOOSTERS.contains_key(word) || is_kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.valence_at(i, &tokens, &lowered, cap_diff));
        }

        but_check(&lowered, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn valence_at(&self, i: usize, tokens: &[&str], lowered: &[String], cap_diff: bool) -> f64 {
        let word = lowered[i].as_str();
        let Some(base) = self.lexicon.get(word) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" right before another lexicon word negates it instead of scoring
        if word == "no" && lowered.get(i + 1).is_some_and(|next| self.lexicon.contains(next)) {
            valence = 0.0;
        }
        let back = |distance: usize| i.checked_sub(distance).map(|j| lowered[j].as_str());
        if back(1) == Some("no")
            || back(2) == Some("no")
            || (back(3) == Some("no") && matches!(back(1), Some("or" | "nor")))
        {
            valence = base * N_SCALAR;
        }

        if cap_diff && is_upper(tokens[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        // Boosters, negations and idioms within three tokens to the left.
        // Words that carry their own valence are skipped.
        for start in 0..3 {
            if i <= start || self.lexicon.contains(&lowered[i - start - 1]) {
                continue;
            }
            let prior = i - start - 1;
            let mut scalar = scalar_inc_dec(tokens[prior], &lowered[prior], valence, cap_diff);
            scalar *= match start {
                1 => 0.95,
                2 => 0.9,
                _ => 1.0,
            };
            valence += scalar;
            valence = negation_check(valence, lowered, start, i);
            if start == 2 {
                valence = special_idioms_check(valence, lowered, i);
            }
        }

        self.least_check(valence, lowered, i)
    }

    /// "least" before a word negates it, except in "at least" and "very least".
    fn least_check(&self, valence: f64, lowered: &[String], i: usize) -> f64 {
        if i == 0 || lowered[i - 1] != "least" || self.lexicon.contains("least") {
            return valence;
        }
        if i > 1 && matches!(lowered[i - 2].as_str(), "at" | "very") {
            return valence;
        }
        valence * N_SCALAR
    }
}

impl PolarityScorer for VaderScorer {
    fn polarity_scores(&self, sentence: &str) -> Result<PolarityScores> {
        Ok(self.score(sentence))
    }
}

/// Strip surrounding punctuation unless that leaves two characters or fewer
/// (which keeps emoticons like ":)" intact).
fn strip_punctuation(token: &str) -> &str {
    // Gutenberg texts use typographic quotes and dashes as well as ASCII ones
    let stripped = token.trim_matches(|c: char| {
        c.is_ascii_punctuation()
            || matches!(c, '\u{2018}' | '\u{2019}' | '\u{201c}' | '\u{201d}' | '\u{2014}')
    });
    if stripped.chars().count() <= 2 {
        token
    } else {
        stripped
    }
}

fn is_upper(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

/// True when some but not all tokens are ALL CAPS.
fn is_cap_diff(tokens: &[&str]) -> bool {
    let upper = tokens.iter().filter(|t| is_upper(t)).count();
    upper > 0 && upper < tokens.len()
}

fn is_negated(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

/// Negation of the word `start + 1` places before `i`. "never so/this"
/// intensifies rather than negates, and "without doubt" is left alone.
fn negation_check(valence: f64, lowered: &[String], start: usize, i: usize) -> f64 {
    let w = |distance: usize| lowered[i - distance].as_str();
    match start {
        0 if is_negated(w(1)) => valence * N_SCALAR,
        1 if w(2) == "never" && matches!(w(1), "so" | "this") => valence * 1.25,
        1 if w(2) == "without" && w(1) == "doubt" => valence,
        1 if is_negated(w(2)) => valence * N_SCALAR,
        2 if (w(3) == "never" && matches!(w(2), "so" | "this"))
            || matches!(w(1), "so" | "this") =>
        {
            valence * 1.25
        }
        2 if w(3) == "without" && (w(2) == "doubt" || w(1) == "doubt") => valence,
        2 if is_negated(w(3)) => valence * N_SCALAR,
        _ => valence,
    }
}

/// Fixed-valence phrases around `i` ("broken heart", "to die for") and
/// two-word boosters just before it ("kind of"). Needs `i >= 3`.
fn special_idioms_check(mut valence: f64, lowered: &[String], i: usize) -> f64 {
    let w = |j: usize| lowered[j].as_str();
    let one_zero = format!("{} {}", w(i - 1), w(i));
    let two_one_zero = format!("{} {} {}", w(i - 2), w(i - 1), w(i));
    let two_one = format!("{} {}", w(i - 2), w(i - 1));
    let three_two_one = format!("{} {} {}", w(i - 3), w(i - 2), w(i - 1));
    let three_two = format!("{} {}", w(i - 3), w(i - 2));

    let preceding = [&one_zero, &two_one_zero, &two_one, &three_two_one, &three_two];
    if let Some(&fixed) = preceding.iter().find_map(|seq| SPECIAL_CASES.get(seq.as_str())) {
        valence = fixed;
    }
    if i + 1 < lowered.len() {
        let zero_one = format!("{} {}", w(i), w(i + 1));
        if let Some(&fixed) = SPECIAL_CASES.get(zero_one.as_str()) {
            valence = fixed;
        }
    }
    if i + 2 < lowered.len() {
        let zero_one_two = format!("{} {} {}", w(i), w(i + 1), w(i + 2));
        if let Some(&fixed) = SPECIAL_CASES.get(zero_one_two.as_str()) {
            valence = fixed;
        }
    }

    for n_gram in [&three_two_one, &three_two, &two_one] {
        if let Some(&boost) = BOOSTERS.get(n_gram.as_str()) {
            valence += boost;
        }
    }
    valence
}

fn scalar_inc_dec(token: &str, lowered: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(&boost) = BOOSTERS.get(lowered) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -boost } else { boost };
    if cap_diff && is_upper(token) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

/// Halve the weight of everything before "but" and boost everything after.
fn but_check(lowered: &[String], sentiments: &mut [f64]) {
    let Some(but_index) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < but_index {
            *sentiment *= 0.5;
        } else if i > but_index {
            *sentiment *= 1.5;
        }
    }
}

/// Emphasis from "!" (up to four) and repeated "?".
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + question_emphasis
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    PolarityScores {
        positive: round_to((pos_sum / total).abs(), 3),
        negative: round_to((neg_sum / total).abs(), 3),
        neutral: round_to((neu_count / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

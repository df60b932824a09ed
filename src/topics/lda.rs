// Latent Dirichlet Allocation by collapsed Gibbs sampling.
//
// Every token carries a topic assignment. A sweep resamples each assignment
// from its conditional given all the others:
//
//   p(z = k) ∝ (n_dk + alpha_k) * (n_kw + eta) / (n_k + V * eta)
//
// The document-topic prior alpha starts symmetric at 1/K and is re-estimated
// after every pass with Minka's fixed-point iteration, so topics that are
// common across the corpus get a larger prior. The topic-word prior eta is
// fixed at 1/K. A seeded StdRng makes fits reproducible.

use std::iter;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::traits::{BagOfWords, TopicModel};
use crate::config::AnalysisSettings;

/// Smallest value an alpha component may shrink to.
const MIN_ALPHA: f64 = 1e-6;

/// Sampler schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct LdaConfig {
    /// Passes over the corpus; alpha is re-estimated after each
    pub passes: usize,
    /// Gibbs sweeps per pass
    pub iterations: usize,
    pub seed: u64,
    /// Learn an asymmetric alpha from the data
    pub learn_alpha: bool,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self::from_settings(&AnalysisSettings::default())
    }
}

impl LdaConfig {
    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self {
            passes: settings.passes,
            iterations: settings.iterations,
            seed: settings.seed,
            learn_alpha: true,
        }
    }
}

/// Collapsed Gibbs sampling LDA, the default topic model.
#[derive(Debug, Clone, Default)]
pub struct GibbsLda {
    pub config: LdaConfig,
}

impl GibbsLda {
    pub fn new(config: LdaConfig) -> Self {
        Self { config }
    }
}

impl TopicModel for GibbsLda {
    fn name(&self) -> &'static str {
        "gibbs-lda"
    }

    fn fit(
        &self,
        corpus: &[BagOfWords],
        vocab_size: usize,
        num_topics: usize,
    ) -> Result<Vec<Vec<f64>>> {
        if num_topics == 0 {
            return Ok(Vec::new());
        }
        if vocab_size == 0 {
            return Ok(vec![Vec::new(); num_topics]);
        }
        if let Some(&(id, _)) = corpus.iter().flatten().find(|(id, _)| *id >= vocab_size) {
            anyhow::bail!("Term id {id} is outside the vocabulary of {vocab_size} terms");
        }

        let mut state = SamplerState::new(corpus, vocab_size, num_topics, self.config.seed);
        for pass in 0..self.config.passes {
            for _ in 0..self.config.iterations {
                state.sweep();
            }
            if self.config.learn_alpha {
                state.update_alpha();
            }
            debug!(
                pass = pass + 1,
                alpha_sum = state.alpha.iter().sum::<f64>(),
                "LDA pass complete"
            );
        }

        Ok(state.topic_word_distribution())
    }
}

struct SamplerState {
    rng: StdRng,
    /// Word id of every token, per document
    docs: Vec<Vec<usize>>,
    /// Topic of every token, parallel to `docs`
    assignments: Vec<Vec<usize>>,
    doc_topic: Vec<Vec<usize>>,
    topic_word: Vec<Vec<usize>>,
    topic_totals: Vec<usize>,
    alpha: Vec<f64>,
    eta: f64,
    vocab_size: usize,
}

impl SamplerState {
    fn new(corpus: &[BagOfWords], vocab_size: usize, num_topics: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let docs: Vec<Vec<usize>> = corpus
            .iter()
            .map(|bow| {
                bow.iter()
                    .flat_map(|&(id, count)| iter::repeat_n(id, count))
                    .collect()
            })
            .collect();

        let mut doc_topic = vec![vec![0; num_topics]; docs.len()];
        let mut topic_word = vec![vec![0; vocab_size]; num_topics];
        let mut topic_totals = vec![0; num_topics];
        let mut assignments = Vec::with_capacity(docs.len());

        for (d, doc) in docs.iter().enumerate() {
            let mut topics = Vec::with_capacity(doc.len());
            for &w in doc {
                let k = rng.random_range(0..num_topics);
                doc_topic[d][k] += 1;
                topic_word[k][w] += 1;
                topic_totals[k] += 1;
                topics.push(k);
            }
            assignments.push(topics);
        }

        let prior = 1.0 / num_topics as f64;
        Self {
            rng,
            docs,
            assignments,
            doc_topic,
            topic_word,
            topic_totals,
            alpha: vec![prior; num_topics],
            eta: prior,
            vocab_size,
        }
    }

    fn sweep(&mut self) {
        let num_topics = self.alpha.len();
        let v_eta = self.vocab_size as f64 * self.eta;
        let mut weights = vec![0.0; num_topics];

        for d in 0..self.docs.len() {
            for i in 0..self.docs[d].len() {
                let w = self.docs[d][i];
                let old = self.assignments[d][i];
                self.doc_topic[d][old] -= 1;
                self.topic_word[old][w] -= 1;
                self.topic_totals[old] -= 1;

                let mut total = 0.0;
                for (k, weight) in weights.iter_mut().enumerate() {
                    *weight = (self.doc_topic[d][k] as f64 + self.alpha[k])
                        * (self.topic_word[k][w] as f64 + self.eta)
                        / (self.topic_totals[k] as f64 + v_eta);
                    total += *weight;
                }

                let mut target = self.rng.random::<f64>() * total;
                let mut new = num_topics - 1;
                for (k, &weight) in weights.iter().enumerate() {
                    if target < weight {
                        new = k;
                        break;
                    }
                    target -= weight;
                }

                self.assignments[d][i] = new;
                self.doc_topic[d][new] += 1;
                self.topic_word[new][w] += 1;
                self.topic_totals[new] += 1;
            }
        }
    }

    /// One step of Minka's fixed-point update for an asymmetric Dirichlet.
    fn update_alpha(&mut self) {
        let alpha_sum: f64 = self.alpha.iter().sum();
        let denominator: f64 = self
            .docs
            .iter()
            .filter(|doc| !doc.is_empty())
            .map(|doc| digamma(doc.len() as f64 + alpha_sum) - digamma(alpha_sum))
            .sum();
        if denominator <= 0.0 {
            return;
        }

        for k in 0..self.alpha.len() {
            let alpha_k = self.alpha[k];
            let numerator: f64 = self
                .doc_topic
                .iter()
                .map(|counts| digamma(counts[k] as f64 + alpha_k) - digamma(alpha_k))
                .sum();
            self.alpha[k] = (alpha_k * numerator / denominator).max(MIN_ALPHA);
        }
    }

    /// Smoothed `p(word | topic)` for every topic.
    fn topic_word_distribution(&self) -> Vec<Vec<f64>> {
        let v_eta = self.vocab_size as f64 * self.eta;
        self.topic_word
            .iter()
            .zip(&self.topic_totals)
            .map(|(counts, &total)| {
                let denominator = total as f64 + v_eta;
                counts
                    .iter()
                    .map(|&c| (c as f64 + self.eta) / denominator)
                    .collect()
            })
            .collect()
    }
}

/// Digamma function for positive arguments.
///
/// Shifts small arguments up with psi(x) = psi(x + 1) - 1/x, then applies
/// the asymptotic series.
pub fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln() - 0.5 * inv
        - inv2 * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 / 240.0)))
}

//! Latent Dirichlet Allocation topic models.
//!
//! A stored model carries the vocabulary (word id = position), the Dirichlet
//! prior over topics, and `exp(E[log beta])` for every topic/word pair, which is
//! everything the variational E-step needs. Inference output is always a
//! dense vector of [`LDA_TOPIC_DIM`] topic weights.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{InferenceConfig, ModelFamily};
use crate::model::VectorModel;

/// Length of every topic-weight vector.
pub const LDA_TOPIC_DIM: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LdaModel {
    pub num_topics: usize,
    /// `vocabulary[id]` is the word with that id.
    pub vocabulary: Vec<String>,
    /// Dirichlet prior, one entry per topic.
    pub alpha: Vec<f64>,
    /// `exp_elog_beta[topic][word_id]`.
    pub exp_elog_beta: Vec<Vec<f64>>,
    /// Topics below this probability are reported as zero.
    #[serde(default = "default_minimum_probability")]
    pub minimum_probability: f64,
    /// Upper bound on E-step iterations.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// E-step stops once the mean absolute gamma change drops below this.
    #[serde(default = "default_gamma_threshold")]
    pub gamma_threshold: f64,
}

fn default_minimum_probability() -> f64 {
    0.01
}

fn default_iterations() -> usize {
    50
}

fn default_gamma_threshold() -> f64 {
    0.001
}

impl LdaModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.num_topics == 0 {
            return Err("num_topics must be >= 1".into());
        }
        if self.alpha.len() != self.num_topics {
            return Err(format!(
                "alpha has {} entries for {} topics",
                self.alpha.len(),
                self.num_topics
            ));
        }
        if self.alpha.iter().any(|&a| !(a > 0.0)) {
            return Err("alpha entries must be > 0".into());
        }
        if self.exp_elog_beta.len() != self.num_topics {
            return Err(format!(
                "exp_elog_beta has {} rows for {} topics",
                self.exp_elog_beta.len(),
                self.num_topics
            ));
        }
        let vocab_len = self.vocabulary.len();
        if let Some(topic) = self.exp_elog_beta.iter().position(|row| row.len() != vocab_len) {
            return Err(format!("exp_elog_beta row {topic} length differs from vocabulary"));
        }
        Ok(())
    }

    /// Bag of words: `(word_id, count)` sorted by id, unknown words dropped.
    pub fn doc2bow(&self, tokens: &[String]) -> Vec<(usize, f64)> {
        let ids: FxHashMap<&str, usize> = self
            .vocabulary
            .iter()
            .enumerate()
            .map(|(id, word)| (word.as_str(), id))
            .collect();
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
        for token in tokens {
            if let Some(&id) = ids.get(token.as_str()) {
                *counts.entry(id).or_default() += 1.0;
            }
        }
        let mut bow: Vec<(usize, f64)> = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }

    /// Sparse topic distribution for a document, topics under
    /// `minimum_probability` removed.
    pub fn topic_distribution(&self, tokens: &[String]) -> Vec<(usize, f64)> {
        let gamma = self.infer_gamma(&self.doc2bow(tokens));
        let total: f64 = gamma.iter().sum();
        gamma
            .iter()
            .enumerate()
            .map(|(topic, &g)| (topic, g / total))
            .filter(|&(_, p)| p >= self.minimum_probability)
            .collect()
    }

    /// Dense topic weights indexed by topic id, zero for topics that did not
    /// make the cut.
    pub fn topic_weights(&self, tokens: &[String]) -> Vec<f32> {
        let mut weights = vec![0f32; LDA_TOPIC_DIM];
        for (topic, p) in self.topic_distribution(tokens) {
            match weights.get_mut(topic) {
                Some(slot) => *slot = p as f32,
                None => warn!(topic, limit = LDA_TOPIC_DIM, "lda_topic_out_of_range"),
            }
        }
        weights
    }

    /// Variational E-step for one document.
    fn infer_gamma(&self, bow: &[(usize, f64)]) -> Vec<f64> {
        let k = self.num_topics;
        let mut gamma = vec![1.0f64; k];
        let mut exp_elog_theta = exp_dirichlet_expectation(&gamma);
        let mut phinorm = self.phinorm(bow, &exp_elog_theta);

        for _ in 0..self.iterations {
            let last = gamma.clone();
            for (topic, g) in gamma.iter_mut().enumerate() {
                let beta = &self.exp_elog_beta[topic];
                let expected: f64 = bow
                    .iter()
                    .zip(&phinorm)
                    .map(|(&(id, count), &norm)| count / norm * beta[id])
                    .sum();
                *g = self.alpha[topic] + exp_elog_theta[topic] * expected;
            }
            exp_elog_theta = exp_dirichlet_expectation(&gamma);
            phinorm = self.phinorm(bow, &exp_elog_theta);

            let change = gamma
                .iter()
                .zip(&last)
                .map(|(a, b)| (a - b).abs())
                .sum::<f64>()
                / k as f64;
            if change < self.gamma_threshold {
                break;
            }
        }
        gamma
    }

    fn phinorm(&self, bow: &[(usize, f64)], exp_elog_theta: &[f64]) -> Vec<f64> {
        bow.iter()
            .map(|&(id, _)| {
                exp_elog_theta
                    .iter()
                    .zip(&self.exp_elog_beta)
                    .map(|(theta, beta)| theta * beta[id])
                    .sum::<f64>()
                    + 1e-100
            })
            .collect()
    }
}

impl VectorModel for LdaModel {
    fn family(&self) -> ModelFamily {
        ModelFamily::Lda
    }

    fn dimension(&self) -> usize {
        LDA_TOPIC_DIM
    }

    fn embed(&self, tokens: &[String], _cfg: &InferenceConfig) -> Vec<f32> {
        self.topic_weights(tokens)
    }
}

/// `exp(psi(a) - psi(sum(a)))` element-wise.
fn exp_dirichlet_expectation(alpha: &[f64]) -> Vec<f64> {
    let psi_total = digamma(alpha.iter().sum());
    alpha
        .iter()
        .map(|&a| (digamma(a) - psi_total).exp())
        .collect()
}

/// Digamma via recurrence up to x >= 6 and the asymptotic series.
fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let f = 1.0 / (x * x);
    result + x.ln()
        - 0.5 / x
        - f * (1.0 / 12.0 - f * (1.0 / 120.0 - f * (1.0 / 252.0 - f * (1.0 / 240.0 - f / 132.0))))
}

//! Paragraph-vector (doc2vec) models.
//!
//! Only the parts of a trained model that inference needs are stored: the
//! vocabulary with corpus counts, the negative-sampling output weights
//! (`syn1neg`), and the per-document vectors learned during training.
//!
//! Inference is PV-DBOW with negative sampling. The output weights are
//! frozen and only the new document vector moves.

use std::collections::BTreeMap;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{InferenceConfig, ModelFamily};
use crate::model::VectorModel;
use crate::normalize::cosine_similarity;
use crate::seed::{seed_for_tokens, seeded_vector};

/// One vocabulary word with its training-corpus frequency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VocabEntry {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doc2VecModel {
    pub vector_size: usize,
    /// Noise words drawn per positive example.
    #[serde(default = "default_negative")]
    pub negative: usize,
    /// Exponent applied to word counts when building the noise distribution.
    #[serde(default = "default_ns_exponent")]
    pub ns_exponent: f64,
    pub vocab: Vec<VocabEntry>,
    /// Output weights, one row of `vector_size` per vocabulary entry.
    pub syn1neg: Vec<Vec<f32>>,
    /// Trained document vectors keyed by document tag (the source file path).
    #[serde(default)]
    pub doctags: BTreeMap<String, Vec<f32>>,
}

fn default_negative() -> usize {
    5
}

fn default_ns_exponent() -> f64 {
    0.75
}

/// Best stored match for a query vector.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctagMatch {
    pub tag: String,
    pub similarity: f32,
}

impl Doc2VecModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.vector_size == 0 {
            return Err("vector_size must be >= 1".into());
        }
        if self.syn1neg.len() != self.vocab.len() {
            return Err(format!(
                "syn1neg has {} rows for {} vocabulary entries",
                self.syn1neg.len(),
                self.vocab.len()
            ));
        }
        if let Some(row) = self.syn1neg.iter().position(|r| r.len() != self.vector_size) {
            return Err(format!("syn1neg row {row} length differs from vector_size"));
        }
        if let Some((tag, _)) = self
            .doctags
            .iter()
            .find(|(_, v)| v.len() != self.vector_size)
        {
            return Err(format!("doctag {tag} length differs from vector_size"));
        }
        Ok(())
    }

    /// Infers a vector for an unseen document. Words outside the vocabulary
    /// are ignored; a document with no known words returns its seeded
    /// starting vector.
    pub fn infer_vector(&self, tokens: &[String], cfg: &InferenceConfig) -> Vec<f32> {
        let seed = seed_for_tokens(tokens);
        let mut doc = seeded_vector(seed, self.vector_size);

        let index = self.word_index();
        let words: Vec<usize> = tokens
            .iter()
            .filter_map(|token| index.get(token.as_str()).copied())
            .collect();
        if words.is_empty() {
            return doc;
        }

        let noise = NoiseTable::new(&self.vocab, self.ns_exponent);
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut neu1e = vec![0f32; self.vector_size];

        let steps = cfg.steps.max(1);
        let alpha_delta = (cfg.alpha - cfg.min_alpha) / steps.saturating_sub(1).max(1) as f32;
        let mut alpha = cfg.alpha;
        for _ in 0..steps {
            for &word in &words {
                self.train_pair(&mut doc, word, alpha, &noise, &mut rng, &mut neu1e);
            }
            alpha = (alpha - alpha_delta).max(cfg.min_alpha);
        }
        doc
    }

    pub fn docvec(&self, tag: &str) -> Option<&[f32]> {
        self.doctags.get(tag).map(Vec::as_slice)
    }

    /// Stored document whose vector is closest (cosine) to `query`.
    pub fn nearest_doctag(&self, query: &[f32]) -> Option<DoctagMatch> {
        self.doctags
            .iter()
            .map(|(tag, vector)| (tag, cosine_similarity(query, vector)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(tag, similarity)| DoctagMatch {
                tag: tag.clone(),
                similarity,
            })
    }

    fn word_index(&self) -> FxHashMap<&str, usize> {
        self.vocab
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.word.as_str(), idx))
            .collect()
    }

    /// One positive word plus `negative` noise words against the document
    /// vector.
    fn train_pair(
        &self,
        doc: &mut [f32],
        word: usize,
        alpha: f32,
        noise: &NoiseTable,
        rng: &mut fastrand::Rng,
        neu1e: &mut [f32],
    ) {
        neu1e.fill(0.0);
        for draw in 0..=self.negative {
            let (target, label) = if draw == 0 {
                (word, 1.0f32)
            } else {
                let sampled = noise.sample(rng);
                if sampled == word {
                    continue;
                }
                (sampled, 0.0)
            };
            let row = &self.syn1neg[target];
            let dot: f32 = doc.iter().zip(row).map(|(a, b)| a * b).sum();
            let gradient = (label - sigmoid(dot)) * alpha;
            for (e, w) in neu1e.iter_mut().zip(row) {
                *e += gradient * w;
            }
        }
        for (x, e) in doc.iter_mut().zip(neu1e.iter()) {
            *x += e;
        }
    }
}

impl VectorModel for Doc2VecModel {
    fn family(&self) -> ModelFamily {
        ModelFamily::Doc2Vec
    }

    fn dimension(&self) -> usize {
        self.vector_size
    }

    fn embed(&self, tokens: &[String], cfg: &InferenceConfig) -> Vec<f32> {
        self.infer_vector(tokens, cfg)
    }

    fn stored_vector(&self, key: &str) -> Option<&[f32]> {
        self.docvec(key)
    }
}

/// Cumulative unigram^ns_exponent distribution for drawing noise words.
struct NoiseTable {
    cumulative: Vec<f64>,
}

impl NoiseTable {
    fn new(vocab: &[VocabEntry], exponent: f64) -> Self {
        let mut total = 0f64;
        let cumulative = vocab
            .iter()
            .map(|entry| {
                total += (entry.count.max(1) as f64).powf(exponent);
                total
            })
            .collect();
        Self { cumulative }
    }

    fn sample(&self, rng: &mut fastrand::Rng) -> usize {
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        let target = rng.f64() * total;
        self.cumulative
            .partition_point(|&c| c <= target)
            .min(self.cumulative.len().saturating_sub(1))
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn tiny_model() -> Doc2VecModel {
        let words = ["water", "cycle", "plant", "energy"];
        Doc2VecModel {
            vector_size: 4,
            negative: 2,
            ns_exponent: 0.75,
            vocab: words
                .iter()
                .enumerate()
                .map(|(i, w)| VocabEntry {
                    word: w.to_string(),
                    count: (i as u64 + 1) * 10,
                })
                .collect(),
            syn1neg: vec![
                vec![0.5, -0.1, 0.2, 0.0],
                vec![0.4, 0.0, 0.3, -0.2],
                vec![-0.3, 0.6, 0.0, 0.1],
                vec![-0.2, 0.5, -0.1, 0.3],
            ],
            doctags: BTreeMap::from([
                ("corpus/a/en-text".to_string(), vec![1.0, 0.0, 0.5, 0.0]),
                ("corpus/b/en-text".to_string(), vec![-0.5, 1.0, 0.0, 0.2]),
            ]),
        }
    }

    #[test]
    fn infer_vector_has_model_dimension() {
        let model = tiny_model();
        let v = model.infer_vector(&toks(&["water", "cycle"]), &InferenceConfig::default());
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn infer_vector_is_deterministic() {
        let model = tiny_model();
        let cfg = InferenceConfig::default();
        let tokens = toks(&["plant", "energy", "water"]);
        assert_eq!(model.infer_vector(&tokens, &cfg), model.infer_vector(&tokens, &cfg));
    }

    #[test]
    fn unknown_words_return_seed_vector() {
        let model = tiny_model();
        let tokens = toks(&["zebra", "quasar"]);
        let v = model.infer_vector(&tokens, &InferenceConfig::default());
        assert_eq!(v, seeded_vector(seed_for_tokens(&tokens), 4));
    }

    #[test]
    fn inference_moves_toward_word_outputs() {
        let model = tiny_model();
        let cfg = InferenceConfig {
            steps: 50,
            ..Default::default()
        };
        let water = model.infer_vector(&toks(&["water", "cycle"]), &cfg);
        let plant = model.infer_vector(&toks(&["plant", "energy"]), &cfg);
        // The inferred vectors should score their own words above the others.
        let score = |doc: &[f32], row: usize| -> f32 {
            doc.iter().zip(&model.syn1neg[row]).map(|(a, b)| a * b).sum()
        };
        assert!(score(&water, 0) > score(&water, 2));
        assert!(score(&plant, 2) > score(&plant, 0));
    }

    #[test]
    fn stored_vectors_by_tag() {
        let model = tiny_model();
        assert_eq!(model.docvec("corpus/a/en-text"), Some(&[1.0, 0.0, 0.5, 0.0][..]));
        assert!(model.docvec("corpus/zzz/en-text").is_none());
    }

    #[test]
    fn nearest_doctag_picks_highest_cosine() {
        let model = tiny_model();
        let hit = model.nearest_doctag(&[0.9, 0.1, 0.4, 0.0]).unwrap();
        assert_eq!(hit.tag, "corpus/a/en-text");
        assert!(hit.similarity > 0.9);

        let empty = Doc2VecModel {
            doctags: BTreeMap::new(),
            ..tiny_model()
        };
        assert!(empty.nearest_doctag(&[1.0, 0.0, 0.0, 0.0]).is_none());
    }

    #[test]
    fn validate_catches_shape_errors() {
        assert!(tiny_model().validate().is_ok());

        let mut model = tiny_model();
        model.syn1neg.pop();
        assert!(model.validate().unwrap_err().contains("syn1neg has 3 rows"));

        let mut model = tiny_model();
        model.syn1neg[1].push(0.0);
        assert!(model.validate().is_err());

        let mut model = tiny_model();
        model.doctags.insert("bad".into(), vec![1.0]);
        assert!(model.validate().unwrap_err().contains("doctag bad"));

        let model = Doc2VecModel {
            vector_size: 0,
            ..tiny_model()
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn noise_table_samples_in_range() {
        let model = tiny_model();
        let table = NoiseTable::new(&model.vocab, model.ns_exponent);
        let mut rng = fastrand::Rng::with_seed(3);
        let mut seen = [0usize; 4];
        for _ in 0..2000 {
            seen[table.sample(&mut rng)] += 1;
        }
        assert!(seen.iter().all(|&n| n > 0));
        // Higher counts are drawn more often.
        assert!(seen[3] > seen[0]);
    }
}

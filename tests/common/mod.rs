#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use semantic::{save_model, Doc2VecModel, LdaModel, ModelFile, VocabEntry};
use tempfile::TempDir;

pub const DIM: usize = 8;

const WORDS: [&str; 6] = ["water", "cycle", "rain", "plant", "leaf", "math"];

/// Small doc2vec model with deterministic weights.
pub fn doc2vec_model(doctags: BTreeMap<String, Vec<f32>>) -> Doc2VecModel {
    Doc2VecModel {
        vector_size: DIM,
        negative: 3,
        ns_exponent: 0.75,
        vocab: WORDS
            .iter()
            .enumerate()
            .map(|(i, w)| VocabEntry {
                word: w.to_string(),
                count: 10 + i as u64,
            })
            .collect(),
        syn1neg: (0..WORDS.len())
            .map(|row| {
                (0..DIM)
                    .map(|col| (((row * 7 + col * 3) % 11) as f32 - 5.0) / 10.0)
                    .collect()
            })
            .collect(),
        doctags,
    }
}

/// Same weights cut down to the first `size` columns.
pub fn doc2vec_model_of_size(size: usize) -> Doc2VecModel {
    let mut model = doc2vec_model(BTreeMap::new());
    model.vector_size = size;
    for row in &mut model.syn1neg {
        row.truncate(size);
    }
    model
}

pub fn lda_model() -> LdaModel {
    LdaModel {
        num_topics: 2,
        vocabulary: WORDS.iter().map(|w| w.to_string()).collect(),
        alpha: vec![0.5, 0.5],
        exp_elog_beta: vec![
            vec![0.3, 0.3, 0.3, 0.03, 0.03, 0.04],
            vec![0.03, 0.03, 0.04, 0.3, 0.3, 0.3],
        ],
        minimum_probability: 0.01,
        iterations: 50,
        gamma_threshold: 0.001,
    }
}

pub fn write_model(dir: &Path, name: &str, model: impl Into<ModelFile>) {
    save_model(&dir.join(name), &model.into()).unwrap();
}

/// `models/en-text` only.
pub fn default_models() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_model(dir.path(), "en-text", doc2vec_model(BTreeMap::new()));
    dir
}

pub fn write_field(corpus: &Path, item: &str, name: &str, body: &[u8]) {
    let folder = corpus.join(item);
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join(name), body).unwrap();
}

pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

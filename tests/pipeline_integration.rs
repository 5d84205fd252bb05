mod common;

use std::collections::BTreeMap;
use std::fs;

use common::{
    default_models, doc2vec_model, doc2vec_model_of_size, lda_model, norm, write_field,
    write_model, DIM,
};
use object2vec::{
    infer_query, ContentVectors, Field, InferRequest, InferenceConfig, ModelFamily,
    Object2VecConfig, QueryDocument, TokenizeConfig, VectorPipeline,
};
use tempfile::tempdir;

fn pipeline(model_dir: &std::path::Path) -> VectorPipeline {
    VectorPipeline::new(
        model_dir,
        InferenceConfig::default(),
        TokenizeConfig::default(),
    )
    .unwrap()
}

#[test]
fn batch_covers_every_item_in_name_order() {
    let models = default_models();
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "item2", "hi-text", "जल चक्र".as_bytes());
    write_field(corpus.path(), "item1", "en-text", b"The water cycle moves rain");
    write_field(corpus.path(), "item1", "tags", b"Science, Water");
    fs::create_dir(corpus.path().join("item3")).unwrap();

    let out = pipeline(models.path()).infer_corpus(corpus.path()).unwrap();
    let ids: Vec<&str> = out
        .content_vectors
        .iter()
        .map(|r| r.content_id.as_str())
        .collect();
    assert_eq!(ids, ["item1", "item2", "item3"]);

    let item1 = &out.content_vectors[0];
    assert_eq!(item1.text_vec.len(), DIM);
    assert!((norm(&item1.text_vec) - 1.0).abs() < 1e-5);
    // tags fall back to the en-text model
    assert!((norm(&item1.tag_vec) - 1.0).abs() < 1e-5);

    let item2 = &out.content_vectors[1];
    assert!((norm(&item2.text_vec) - 1.0).abs() < 1e-5);
    assert_eq!(item2.tag_vec, vec![0.0; DIM]);

    let item3 = &out.content_vectors[2];
    assert_eq!(item3.text_vec, vec![0.0; DIM]);
    assert_eq!(item3.tag_vec, vec![0.0; DIM]);
}

#[test]
fn no_models_gives_zero_vectors_of_default_dimension() {
    let models = tempdir().unwrap();
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "do_9", "en-text", b"water cycle");
    write_field(corpus.path(), "do_9", "tags", b"science");

    let out = pipeline(models.path()).infer_corpus(corpus.path()).unwrap();
    assert_eq!(out.len(), 1);
    let record = &out.content_vectors[0];
    assert_eq!(record.content_id, "do_9");
    assert_eq!(record.text_vec, vec![0.0; 50]);
    assert_eq!(record.tag_vec, vec![0.0; 50]);
}

#[test]
fn single_query_document() {
    let models = default_models();
    let doc = QueryDocument::from_json(
        r#"{"contentId": "do_1", "document": {"en": "Water and rain", "tags": "Math, math"}}"#,
    )
    .unwrap();

    let out = pipeline(models.path()).infer_document(&doc).unwrap();
    assert_eq!(out.len(), 1);
    let record = &out.content_vectors[0];
    assert_eq!(record.content_id, "do_1");
    assert!((norm(&record.text_vec) - 1.0).abs() < 1e-5);
    assert!((norm(&record.tag_vec) - 1.0).abs() < 1e-5);
}

#[test]
fn single_query_without_fields_is_all_zero() {
    let models = default_models();
    let out = pipeline(models.path())
        .infer_document(&QueryDocument::new("do_empty"))
        .unwrap();
    let record = &out.content_vectors[0];
    assert_eq!(record.text_vec, vec![0.0; DIM]);
    assert_eq!(record.tag_vec, vec![0.0; DIM]);
}

#[test]
fn repeated_runs_are_identical() {
    let models = default_models();
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "a", "en-text", b"plant leaf water");
    write_field(corpus.path(), "b", "tags", b"rain, cycle");

    let p = pipeline(models.path());
    let first = p.infer_corpus(corpus.path()).unwrap().to_json().unwrap();
    let second = p.infer_corpus(corpus.path()).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn calls_do_not_accumulate() {
    let models = default_models();
    let p = pipeline(models.path());
    let doc = QueryDocument::new("do_1").with_field("en", "water");
    assert_eq!(p.infer_document(&doc).unwrap().len(), 1);
    assert_eq!(p.infer_document(&doc).unwrap().len(), 1);
}

#[test]
fn later_text_field_overwrites_earlier() {
    let models = default_models();
    let mut hi = doc2vec_model(BTreeMap::new());
    for row in &mut hi.syn1neg {
        row.reverse();
    }
    write_model(models.path(), "hi-text", hi);

    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "both", "en-text", b"water cycle");
    write_field(corpus.path(), "both", "hi-text", b"plant leaf");
    write_field(corpus.path(), "only_hi", "hi-text", b"plant leaf");

    let out = pipeline(models.path()).infer_corpus(corpus.path()).unwrap();
    assert_eq!(out.content_vectors[0].content_id, "both");
    // hi-text sorts after en-text, so it is the one kept
    assert_eq!(out.content_vectors[0].text_vec, out.content_vectors[1].text_vec);
}

#[test]
fn nested_field_files_resolve_against_item_folder() {
    let models = default_models();
    let corpus = tempdir().unwrap();
    let nested = corpus.path().join("item").join("sub");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("en-text"), b"water cycle").unwrap();

    let out = pipeline(models.path()).infer_corpus(corpus.path()).unwrap();
    let record = &out.content_vectors[0];
    assert_eq!(record.content_id, "item");
    assert_eq!(record.text_vec, vec![0.0; DIM]);
}

#[test]
fn invalid_utf8_is_decoded_lossily() {
    let models = default_models();
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "item", "en-text", b"water \xff\xfe cycle");

    let out = pipeline(models.path()).infer_corpus(corpus.path()).unwrap();
    assert!((norm(&out.content_vectors[0].text_vec) - 1.0).abs() < 1e-5);
}

#[test]
fn lda_family_uses_fifty_topics() {
    let models = tempdir().unwrap();
    write_model(models.path(), "en-text", lda_model());
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "item", "en-text", b"plant leaf leaf math");

    let cfg = InferenceConfig {
        family: ModelFamily::Lda,
        ..Default::default()
    };
    let p = VectorPipeline::new(models.path(), cfg, TokenizeConfig::default()).unwrap();
    assert_eq!(p.n_dim(), 50);

    let out = p.infer_corpus(corpus.path()).unwrap();
    let record = &out.content_vectors[0];
    assert_eq!(record.text_vec.len(), 50);
    assert_eq!(record.tag_vec, vec![0.0; 50]);
    assert!(record.text_vec[1] > record.text_vec[0]);
    assert!((norm(&record.text_vec) - 1.0).abs() < 1e-5);
}

#[test]
fn precomputed_vectors_keyed_by_file_path() {
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "item1", "en-text", b"water");
    write_field(corpus.path(), "item2", "en-text", b"rain");
    let key = corpus
        .path()
        .join("item1")
        .join("en-text")
        .display()
        .to_string();

    let mut stored = vec![0.0; DIM];
    stored[0] = 3.0;
    stored[1] = 4.0;
    let models = tempdir().unwrap();
    write_model(
        models.path(),
        "en-text",
        doc2vec_model(BTreeMap::from([(key, stored)])),
    );

    let out = pipeline(models.path())
        .precomputed_corpus(corpus.path())
        .unwrap();
    let item1 = &out.content_vectors[0];
    assert!((item1.text_vec[0] - 0.6).abs() < 1e-6);
    assert!((item1.text_vec[1] - 0.8).abs() < 1e-6);
    // no stored vector for item2
    assert_eq!(out.content_vectors[1].text_vec, vec![0.0; DIM]);
}

#[test]
fn infer_query_returns_response_json() {
    let models = default_models();
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "item1", "en-text", b"water");

    let json = infer_query(
        InferRequest::Corpus(corpus.path().to_path_buf()),
        models.path(),
        &Object2VecConfig::default(),
    )
    .unwrap();
    let parsed: ContentVectors = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.content_vectors[0].content_id, "item1");

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["content_vectors"][0].get("contentId").is_some());

    let doc = QueryDocument::new("do_2").with_field("tags", "rain");
    let request = InferRequest::from_flag("false", corpus.path().to_path_buf(), Some(doc)).unwrap();
    let json = infer_query(request, models.path(), &Object2VecConfig::default()).unwrap();
    assert!(json.contains("\"contentId\":\"do_2\""));
}

#[test]
fn nearest_stored_document() {
    let mut doctags = BTreeMap::new();
    doctags.insert("corpus/a/en-text".to_string(), vec![1.0; DIM]);
    doctags.insert("corpus/b/en-text".to_string(), vec![-1.0; DIM]);
    let models = tempdir().unwrap();
    write_model(models.path(), "en-text", doc2vec_model(doctags));

    let p = pipeline(models.path());
    let hit = p
        .nearest_doctag(&Field::text("en"), "water cycle rain")
        .unwrap()
        .unwrap();
    assert!(hit.tag.starts_with("corpus/"));

    let none = p.nearest_doctag(&Field::text("en"), "").unwrap();
    assert!(none.is_some());

    let empty = tempdir().unwrap();
    assert!(
        pipeline(empty.path())
            .nearest_doctag(&Field::tags(), "water")
            .unwrap()
            .is_none()
    );
}

#[test]
fn vector_of_another_length_is_zero_filled() {
    let models = default_models();
    write_model(models.path(), "tags", doc2vec_model_of_size(3));
    let corpus = tempdir().unwrap();
    write_field(corpus.path(), "item1", "en-text", b"water cycle");
    write_field(corpus.path(), "item1", "tags", b"rain, plant");

    let p = pipeline(models.path());
    assert_eq!(p.n_dim(), DIM);

    let out = p.infer_corpus(corpus.path()).unwrap();
    let record = &out.content_vectors[0];
    assert_eq!(record.text_vec.len(), DIM);
    assert!((norm(&record.text_vec) - 1.0).abs() < 1e-5);
    assert_eq!(record.tag_vec, vec![0.0; DIM]);

    let doc = QueryDocument::new("do_1")
        .with_field("en", "water cycle")
        .with_field("tags", "rain, plant");
    let out = p.infer_document(&doc).unwrap();
    let record = &out.content_vectors[0];
    assert_eq!(record.text_vec.len(), DIM);
    assert_eq!(record.tag_vec, vec![0.0; DIM]);
}

#[cfg(unix)]
#[test]
fn linked_field_file_is_vectorized() {
    let models = default_models();
    let corpus = tempdir().unwrap();
    let source = tempdir().unwrap();
    let real = source.path().join("body.txt");
    fs::write(&real, b"water cycle rain").unwrap();
    fs::create_dir(corpus.path().join("item1")).unwrap();
    std::os::unix::fs::symlink(&real, corpus.path().join("item1").join("en-text")).unwrap();

    let out = pipeline(models.path()).infer_corpus(corpus.path()).unwrap();
    let record = &out.content_vectors[0];
    assert_eq!(record.content_id, "item1");
    assert!((norm(&record.text_vec) - 1.0).abs() < 1e-5);
}

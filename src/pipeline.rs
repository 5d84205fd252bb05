//! Orchestrators that turn a corpus or a query document into a
//! [`ContentVectors`] response.

use std::path::{Path, PathBuf};

use canonical::{normalize_field, Field, TokenizeConfig};
use ingest::{list_content_items, read_field_text, ContentItem, IngestError, QueryDocument};
use semantic::{
    embed_field, probe_dimension, stored_field_vector, DoctagMatch, FieldEmbedding,
    InferenceConfig,
};
use tracing::{debug, info, warn};

use crate::config::Object2VecConfig;
use crate::response::{ContentVectors, RecordBuilder, VectorRecord};
use crate::PipelineError;

/// What a single `infer_query` call should vectorize.
#[derive(Debug, Clone, PartialEq)]
pub enum InferRequest {
    /// Every item folder under the corpus root.
    Corpus(PathBuf),
    /// One supplied document.
    Document(QueryDocument),
}

impl InferRequest {
    /// Maps the legacy `inferFlag` switch: `"true"` walks the corpus, anything
    /// else needs a query document.
    pub fn from_flag(
        flag: &str,
        corpus_root: PathBuf,
        document: Option<QueryDocument>,
    ) -> Result<Self, PipelineError> {
        if flag == "true" {
            return Ok(InferRequest::Corpus(corpus_root));
        }
        document.map(InferRequest::Document).ok_or_else(|| {
            IngestError::InvalidQuery("no query document supplied".to_string()).into()
        })
    }
}

/// Runs one request end to end and returns the response JSON.
pub fn infer_query(
    request: InferRequest,
    model_dir: &Path,
    cfg: &Object2VecConfig,
) -> Result<String, PipelineError> {
    let pipeline = VectorPipeline::new(model_dir, cfg.inference.clone(), cfg.tokenize.clone())?;
    let vectors = match request {
        InferRequest::Corpus(root) => pipeline.infer_corpus(&root)?,
        InferRequest::Document(doc) => pipeline.infer_document(&doc)?,
    };
    Ok(vectors.to_json()?)
}

/// Model directory, settings and the output dimension probed from the
/// models on construction.
#[derive(Debug, Clone)]
pub struct VectorPipeline {
    model_dir: PathBuf,
    inference: InferenceConfig,
    tokenize: TokenizeConfig,
    n_dim: usize,
}

impl VectorPipeline {
    pub fn new(
        model_dir: impl Into<PathBuf>,
        inference: InferenceConfig,
        tokenize: TokenizeConfig,
    ) -> Result<Self, PipelineError> {
        inference.validate()?;
        let model_dir = model_dir.into();
        let n_dim = probe_dimension(&model_dir, &inference);
        info!(
            model_dir = %model_dir.display(),
            family = %inference.family,
            n_dim,
            "pipeline_ready"
        );
        Ok(Self {
            model_dir,
            inference,
            tokenize,
            n_dim,
        })
    }

    pub fn from_config(cfg: &Object2VecConfig) -> Result<Self, PipelineError> {
        let model_dir = cfg.model_dir()?;
        Self::new(model_dir, cfg.inference.clone(), cfg.tokenize.clone())
    }

    /// Length of every vector in the records this pipeline emits.
    pub fn n_dim(&self) -> usize {
        self.n_dim
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Batch mode: one record per item folder, in folder name order.
    pub fn infer_corpus(&self, root: &Path) -> Result<ContentVectors, PipelineError> {
        self.walk(root, |field, path| {
            let raw = read_field_text(path)?;
            let tokens = normalize_field(&raw, field.kind, &self.tokenize);
            Ok(embed_field(&self.model_dir, field, &tokens, &self.inference)?)
        })
    }

    /// Single-query mode: one record for the document, fields in document
    /// order.
    pub fn infer_document(&self, doc: &QueryDocument) -> Result<ContentVectors, PipelineError> {
        doc.validate()?;
        let mut record = RecordBuilder::new(&doc.content_id);
        for (field, raw) in doc.fields() {
            let tokens = normalize_field(raw, field.kind, &self.tokenize);
            if let Some(embedding) = embed_field(&self.model_dir, &field, &tokens, &self.inference)? {
                if self.fits_dimension(&embedding) {
                    record.add(embedding);
                }
            }
        }
        let mut out = ContentVectors::new();
        out.push(record.finish(self.n_dim));
        info!(content_id = %doc.content_id, "document_inferred");
        Ok(out)
    }

    /// Same walk as [`infer_corpus`](Self::infer_corpus), but reads the
    /// vectors the field models stored during training, keyed by field file
    /// path.
    pub fn precomputed_corpus(&self, root: &Path) -> Result<ContentVectors, PipelineError> {
        self.walk(root, |field, path| {
            let key = path.display().to_string();
            Ok(stored_field_vector(
                &self.model_dir,
                field,
                &key,
                &self.inference,
            )?)
        })
    }

    /// Stored document closest to `raw_text` (split on whitespace only).
    pub fn nearest_doctag(
        &self,
        field: &Field,
        raw_text: &str,
    ) -> Result<Option<DoctagMatch>, PipelineError> {
        let tokens: Vec<String> = raw_text.split_whitespace().map(str::to_owned).collect();
        Ok(semantic::nearest_doctag(
            &self.model_dir,
            field,
            &tokens,
            &self.inference,
        )?)
    }

    fn walk<F>(&self, root: &Path, mut vectorize: F) -> Result<ContentVectors, PipelineError>
    where
        F: FnMut(&Field, &Path) -> Result<Option<FieldEmbedding>, PipelineError>,
    {
        let items = list_content_items(root)?;
        let mut out = ContentVectors::new();
        for item in &items {
            out.push(self.vectorize_item(item, &mut vectorize)?);
        }
        info!(
            corpus = %root.display(),
            items = out.len(),
            n_dim = self.n_dim,
            "corpus_inferred"
        );
        Ok(out)
    }

    fn vectorize_item<F>(
        &self,
        item: &ContentItem,
        vectorize: &mut F,
    ) -> Result<VectorRecord, PipelineError>
    where
        F: FnMut(&Field, &Path) -> Result<Option<FieldEmbedding>, PipelineError>,
    {
        let mut record = RecordBuilder::new(&item.content_id);
        for (field, path) in item.fields() {
            if !path.is_file() {
                warn!(
                    content_id = %item.content_id,
                    path = %path.display(),
                    "field_file_missing"
                );
                continue;
            }
            match vectorize(&field, &path)? {
                Some(embedding) if self.fits_dimension(&embedding) => record.add(embedding),
                Some(_) => {}
                None => debug!(
                    content_id = %item.content_id,
                    model = %field.model_name,
                    "field_skipped"
                ),
            }
        }
        Ok(record.finish(self.n_dim))
    }

    /// An embedding of another length is dropped so its modality is
    /// zero-filled like a skipped field.
    fn fits_dimension(&self, embedding: &FieldEmbedding) -> bool {
        if embedding.embedding_dim == self.n_dim {
            return true;
        }
        warn!(
            model = %embedding.model_path.display(),
            expected = self.n_dim,
            found = embedding.embedding_dim,
            "dimension_mismatch"
        );
        false
    }
}

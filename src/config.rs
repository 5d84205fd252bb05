//! Configuration file support for object2vec.
//!
//! Settings come from one file plus `OBJECT2VEC__*` environment overrides.
//! The file format follows the extension: `.properties`, `.ini` and `.cfg`
//! are read as INI, anything else (`.yaml`, `.toml`, `.json`) by the format
//! the `config` crate associates with it.
//!
//! ## Example properties file
//!
//! ```ini
//! [FilePath]
//! log_path = /var/log/object2vec
//! model_path = /data/models
//! corpus_path = /data/corpus
//!
//! [inference]
//! family = doc2vec
//! steps = 20
//! normalize = true
//!
//! [logging]
//! level = info
//! json = false
//! ```
//!
//! The same keys in YAML:
//!
//! ```yaml
//! file_path:
//!   model_path: /data/models
//!   corpus_path: /data/corpus
//! inference:
//!   family: lda
//! ```
//!
//! Environment overrides use `__` between levels, e.g.
//! `OBJECT2VEC__FILE_PATH__MODEL_PATH=/tmp/models` or
//! `OBJECT2VEC__INFERENCE__STEPS=5`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use canonical::TokenizeConfig;
use config::{Config, Environment, File, FileFormat};
use semantic::InferenceConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "OBJECT2VEC";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to load config: {0}")]
    Source(#[from] config::ConfigError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("missing required setting: {0}")]
    MissingField(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Object2VecConfig {
    /// Filesystem locations (the `[FilePath]` section).
    #[serde(alias = "FilePath", alias = "filepath")]
    pub file_path: FilePathConfig,

    pub inference: InferenceConfig,

    pub tokenize: TokenizeConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilePathConfig {
    /// Directory that receives `inferQuery.log`. Unset means stderr.
    pub log_path: Option<PathBuf>,
    /// Directory holding one model file per field model name.
    pub model_path: Option<PathBuf>,
    /// Corpus root for batch and precomputed runs.
    pub corpus_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `semantic=debug,info`.
    pub level: String,
    /// Emit JSON lines instead of plain text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Object2VecConfig {
    /// Load `path` with environment overrides from the process environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        Self::load(Some(path.as_ref()), None)
    }

    /// Environment overrides only.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::load(None, None)
    }

    /// Load from an optional file and environment.
    ///
    /// `env` replaces the process environment as the override source when
    /// given, which keeps tests independent of the caller's shell.
    pub fn load(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigLoadError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(file_format(path)));
        }
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(env);
        let cfg: Object2VecConfig = builder.add_source(environment).build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse configuration text in the given format, without environment
    /// overrides.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self, ConfigLoadError> {
        let cfg: Object2VecConfig = Config::builder()
            .add_source(File::from_str(content, format))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.inference
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))?;
        if self.tokenize.min_token_len == 0 {
            return Err(ConfigLoadError::Validation(
                "tokenize.min_token_len must be >= 1".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn model_dir(&self) -> Result<&Path, ConfigLoadError> {
        self.file_path
            .model_path
            .as_deref()
            .ok_or_else(|| ConfigLoadError::MissingField("file_path.model_path".to_string()))
    }

    pub fn corpus_dir(&self) -> Result<&Path, ConfigLoadError> {
        self.file_path
            .corpus_path
            .as_deref()
            .ok_or_else(|| ConfigLoadError::MissingField("file_path.corpus_path".to_string()))
    }
}

/// INI unless the extension names another format.
fn file_format(path: &Path) -> FileFormat {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("yaml" | "yml") => FileFormat::Yaml,
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Ini,
    }
}

//! Subscriber setup for the binary.
//!
//! Events go to `<log_path>/inferQuery.log` when a log directory is
//! configured, stderr otherwise. `RUST_LOG` wins over `logging.level`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "inferQuery.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid log filter '{0}'")]
    Filter(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(cfg: &LoggingConfig, log_dir: Option<&Path>) -> Result<(), LoggingError> {
    let filter = build_filter(&cfg.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_dir {
        Some(dir) => {
            let file = open_log_file(dir)?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if cfg.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        None => {
            let builder = builder.with_writer(io::stderr);
            if cfg.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
    };
    result.map_err(|err| LoggingError::Init(err.to_string()))
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|_| LoggingError::Filter(level.to_string())),
    }
}

fn open_log_file(dir: &Path) -> Result<File, LoggingError> {
    let path = log_file_path(dir);
    let io_err = |source| LoggingError::Io {
        path: path.display().to_string(),
        source,
    };
    fs::create_dir_all(dir).map_err(io_err)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_file_lives_in_log_dir() {
        assert_eq!(
            log_file_path(Path::new("/var/log/o2v")),
            PathBuf::from("/var/log/o2v/inferQuery.log")
        );
    }

    #[test]
    fn log_file_is_created_with_parents() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("logs").join("today");
        open_log_file(&nested).unwrap();
        assert!(nested.join(LOG_FILE_NAME).is_file());
    }

    #[test]
    fn log_file_under_a_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let err = open_log_file(&blocker.join("logs")).unwrap_err();
        assert!(matches!(err, LoggingError::Io { .. }));
    }
}

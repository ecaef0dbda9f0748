use std::path::PathBuf;

use thiserror::Error;

use camt_extractor::ExtractError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot prepare input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not UTF-8 (invalid byte at offset {valid_up_to})")]
    NotUtf8 { path: PathBuf, valid_up_to: usize },

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

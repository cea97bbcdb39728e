//! Ingestion error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Corpus file not found: {0}")]
    FileNotFound(String),

    #[error("Malformed corpus {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("Corpus {0} contains no usable papers")]
    EmptyCorpus(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

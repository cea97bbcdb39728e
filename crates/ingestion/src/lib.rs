//! CiteGraph Ingestion
//!
//! Reads a corpus of papers from a JSON array on disk. Each record needs an
//! `id`; every other field falls back to an empty value when absent or null.

pub mod corpus;
pub mod errors;

pub use corpus::{load_corpus, parse_corpus, CorpusReport};
pub use errors::IngestionError;

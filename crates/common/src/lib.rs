//! CiteGraph Common Library
//!
//! Shared code for the CiteGraph crates including:
//! - The `Paper` corpus model
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use models::Paper;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

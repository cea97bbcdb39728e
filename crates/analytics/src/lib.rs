//! CiteGraph Analytics
//!
//! In-memory citation graph and the analyses run over its visible overlay:
//! - Graph store with the visible overlay
//! - Undirected projection used by the structural analyses
//! - Betweenness centrality (Brandes)
//! - K-core decomposition
//! - H-index, h-core and h-median
//! - Exploration session tying them together

pub mod betweenness;
pub mod explorer;
pub mod graph;
pub mod hindex;
pub mod kcore;
pub mod projection;

// Re-export commonly used types
pub use betweenness::{top_scores, BetweennessEngine};
pub use explorer::{Explorer, HIndexReport};
pub use graph::GraphStore;
pub use hindex::{h_median, HIndexEngine, HIndexResult};
pub use kcore::{KCoreEngine, KCoreResult};
pub use projection::UndirectedProjection;

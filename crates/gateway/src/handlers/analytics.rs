//! Graph analytics handlers
//!
//! Betweenness and k-core are CPU bound, so they run on the blocking pool
//! while holding the explorer write lock.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{papers::PaperQuery, required_param};
use crate::AppState;
use citegraph_analytics::{top_scores, Explorer};
use citegraph_common::{
    errors::{AppError, Result},
    metrics,
};

/// K-core query; `k` is parsed by hand so bad input gets a structured error
#[derive(Debug, Deserialize)]
pub struct KCoreQuery {
    pub k: Option<String>,
}

/// H-index response
#[derive(Serialize)]
pub struct HIndexResponse {
    pub paper_id: String,
    pub paper_title: String,
    pub h_index: usize,
    pub h_median: f64,
    pub h_core_count: usize,
    pub h_core_nodes: Vec<HCoreEntry>,
    pub new_nodes_added: usize,
}

#[derive(Serialize)]
pub struct HCoreEntry {
    pub short_id: String,
    pub title: String,
    pub citations: usize,
}

/// Betweenness response
#[derive(Serialize)]
pub struct BetweennessResponse {
    pub success: bool,
    pub node_count: usize,
    pub top: Vec<ScoreEntry>,
}

#[derive(Serialize)]
pub struct ScoreEntry {
    pub id: String,
    pub score: f64,
}

/// K-core response
#[derive(Serialize)]
pub struct KCoreResponse {
    pub success: bool,
    pub k: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<String>,
    pub edges: Vec<CoreEdge>,
}

#[derive(Serialize)]
pub struct CoreEdge {
    pub source: String,
    pub target: String,
}

/// Run `f` against the explorer on the blocking pool
async fn with_explorer_blocking<T, F>(state: &AppState, f: F) -> Result<T>
where
    F: FnOnce(&mut Explorer) -> T + Send + 'static,
    T: Send + 'static,
{
    let explorer = state.explorer.clone();

    tokio::task::spawn_blocking(move || {
        let mut guard = explorer.blocking_write();
        f(&mut guard)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Analysis task failed: {}", e),
    })
}

fn short_id_of(explorer: &Explorer, id: &str) -> String {
    explorer
        .store()
        .paper(id)
        .map(|p| p.short_id().to_string())
        .unwrap_or_default()
}

/// Compute the h-index of a paper and pull its h-core onto the canvas
pub async fn h_index(
    State(state): State<AppState>,
    Query(query): Query<PaperQuery>,
) -> Result<Json<HIndexResponse>> {
    let paper_ref = query.paper_ref()?;
    let start = Instant::now();

    let mut explorer = state.explorer.write().await;
    let report = explorer
        .h_index(paper_ref)
        .ok_or_else(|| AppError::PaperNotFound {
            id: paper_ref.to_string(),
        })?;

    metrics::record_analysis("h_index", start.elapsed().as_secs_f64());
    metrics::record_overlay("h_index", explorer.store().visible_node_count());

    let store = explorer.store();
    let (paper_id, paper_title) = store
        .paper(&report.result.paper_id)
        .map(|p| (p.short_id().to_string(), p.short_title()))
        .unwrap_or_default();

    let h_core_nodes = report
        .result
        .h_core
        .iter()
        .zip(&report.result.h_core_citations)
        .map(|(id, &citations)| {
            let paper = store.paper(id);
            HCoreEntry {
                short_id: paper.map(|p| p.short_id().to_string()).unwrap_or_default(),
                title: paper.map(|p| p.short_title()).unwrap_or_default(),
                citations,
            }
        })
        .collect();

    Ok(Json(HIndexResponse {
        paper_id,
        paper_title,
        h_index: report.result.h_index,
        h_median: report.result.h_median,
        h_core_count: report.result.h_core.len(),
        h_core_nodes,
        new_nodes_added: report.new_nodes,
    }))
}

/// Score the visible papers by betweenness centrality
pub async fn betweenness(State(state): State<AppState>) -> Result<Json<BetweennessResponse>> {
    let limit = state.config.analytics.max_betweenness_nodes;
    let top = state.config.analytics.betweenness_top;

    let start = Instant::now();
    let response = with_explorer_blocking(&state, move |explorer| {
        // Checked under the same guard the computation runs with
        let visible = explorer.store().visible_node_count();
        if visible > limit {
            return Err(AppError::Validation {
                message: format!(
                    "Betweenness is limited to {} visible papers, {} are visible",
                    limit, visible
                ),
                field: None,
            });
        }

        let ranked = top_scores(explorer.betweenness(), top);
        let node_count = explorer.last_betweenness().map_or(0, |scores| scores.len());

        Ok(BetweennessResponse {
            success: true,
            node_count,
            top: ranked
                .into_iter()
                .map(|(id, score)| ScoreEntry {
                    id: short_id_of(explorer, &id),
                    score,
                })
                .collect(),
        })
    })
    .await??;

    metrics::record_analysis("betweenness", start.elapsed().as_secs_f64());

    Ok(Json(response))
}

/// Extract the k-core of the visible subgraph
pub async fn k_core(
    State(state): State<AppState>,
    Query(query): Query<KCoreQuery>,
) -> Result<Json<KCoreResponse>> {
    let raw = required_param(&query.k, "k")?;
    let k = raw
        .parse::<usize>()
        .ok()
        .filter(|&k| k >= 1)
        .ok_or_else(|| AppError::Validation {
            message: format!("k must be an integer >= 1, got '{}'", raw),
            field: Some("k".to_string()),
        })?;

    let start = Instant::now();
    let response = with_explorer_blocking(&state, move |explorer| {
        let result = explorer.k_core(k).clone();

        KCoreResponse {
            success: true,
            k,
            node_count: result.node_count(),
            edge_count: result.edge_count(),
            nodes: result
                .nodes
                .iter()
                .map(|id| short_id_of(explorer, id))
                .collect(),
            edges: result
                .edges
                .iter()
                .map(|(a, b)| CoreEdge {
                    source: short_id_of(explorer, a),
                    target: short_id_of(explorer, b),
                })
                .collect(),
        }
    })
    .await?;

    metrics::record_analysis("k_core", start.elapsed().as_secs_f64());

    Ok(Json(response))
}

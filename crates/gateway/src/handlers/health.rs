//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub corpus: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    pub papers: usize,
    pub edges: usize,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - the corpus must hold at least one paper
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let explorer = state.explorer.read().await;
    let store = explorer.store();

    let corpus_check = CheckResult {
        status: if store.node_count() > 0 { "up" } else { "down" }.to_string(),
        papers: store.node_count(),
        edges: store.edge_count(),
    };

    let all_healthy = corpus_check.status == "up";

    Json(ReadyResponse {
        status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            corpus: corpus_check,
        },
    })
}

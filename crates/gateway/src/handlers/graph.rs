//! Visible graph handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::export::{self, GlobalStatsView, GraphView, StatsView};
use crate::AppState;
use citegraph_common::metrics;

#[derive(Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

/// Visible subgraph with colors, labels and sizes
pub async fn graph(State(state): State<AppState>) -> Json<GraphView> {
    let explorer = state.explorer.read().await;
    Json(export::graph_view(&explorer))
}

/// Visible-scope statistics
pub async fn stats(State(state): State<AppState>) -> Json<StatsView> {
    let explorer = state.explorer.read().await;
    Json(export::stats_view(explorer.store()))
}

/// Whole-corpus statistics
pub async fn global_stats(State(state): State<AppState>) -> Json<GlobalStatsView> {
    let explorer = state.explorer.read().await;
    Json(export::global_stats_view(explorer.store()))
}

/// Reset the exploration
pub async fn clear(State(state): State<AppState>) -> Json<ClearResponse> {
    state.explorer.write().await.clear();
    metrics::record_overlay("clear", 0);

    Json(ClearResponse { success: true })
}

//! Paper lookup handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::required_param;
use crate::AppState;
use citegraph_common::{
    errors::{AppError, Result},
    metrics,
};

/// Query naming one paper by full id or short id
#[derive(Debug, Deserialize, Validate)]
pub struct PaperQuery {
    #[validate(length(max = 512))]
    pub id: Option<String>,
}

impl PaperQuery {
    /// Validated paper reference
    pub fn paper_ref(&self) -> Result<&str> {
        self.validate().map_err(|e| AppError::Validation {
            message: e.to_string(),
            field: Some("id".to_string()),
        })?;

        required_param(&self.id, "id")
    }
}

/// Search query
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 256))]
    #[serde(default)]
    pub q: Option<String>,
}

/// Selection response
#[derive(Serialize)]
pub struct SelectResponse {
    pub success: bool,
    pub id: String,
    pub short_id: String,
}

/// Search response
#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

#[derive(Serialize)]
pub struct SearchResultItem {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub year: i32,
}

/// Add a paper to the visible overlay
pub async fn select(
    State(state): State<AppState>,
    Query(query): Query<PaperQuery>,
) -> Result<Json<SelectResponse>> {
    let paper_ref = query.paper_ref()?;

    let mut explorer = state.explorer.write().await;
    let paper = explorer
        .select(paper_ref)
        .ok_or_else(|| AppError::PaperNotFound {
            id: paper_ref.to_string(),
        })?;

    metrics::record_overlay("select", explorer.store().visible_node_count());

    Ok(Json(SelectResponse {
        success: true,
        short_id: paper.short_id().to_string(),
        id: paper.id,
    }))
}

/// Find papers by short id, title or author
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    query.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("q".to_string()),
    })?;

    let text = query.q.as_deref().map(str::trim).unwrap_or_default();
    let limits = &state.config.analytics;

    // Too-short queries match nothing rather than the whole corpus
    if text.chars().count() < limits.search_min_query_len {
        return Ok(Json(SearchResponse {
            query: text.to_string(),
            total_results: 0,
            results: Vec::new(),
        }));
    }

    let explorer = state.explorer.read().await;
    let results: Vec<SearchResultItem> = explorer
        .store()
        .search(text, limits.search_limit)
        .into_iter()
        .map(|paper| SearchResultItem {
            id: paper.id.clone(),
            short_id: paper.short_id().to_string(),
            title: paper.short_title(),
            year: paper.year,
        })
        .collect();

    tracing::debug!(query = %text, results = results.len(), "Search completed");

    Ok(Json(SearchResponse {
        query: text.to_string(),
        total_results: results.len(),
        results,
    }))
}

//! Prometheus exposition handler

use axum::extract::State;
use citegraph_common::errors::{AppError, Result};

use crate::AppState;

/// Render the Prometheus text format
pub async fn render(State(state): State<AppState>) -> Result<String> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| AppError::NotFound {
            resource_type: "metrics".to_string(),
            id: "prometheus".to_string(),
        })
}

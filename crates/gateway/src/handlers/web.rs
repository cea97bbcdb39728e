//! Visualization page handler

use axum::{extract::State, response::Html};
use tracing::warn;

use crate::AppState;

const FALLBACK_PAGE: &str = "<!DOCTYPE html>\n<html><head><title>CiteGraph</title></head>\
<body><h1>CiteGraph</h1><p>index.html not found. Set web.index_path to the visualization page.</p>\
</body></html>";

/// Serve the configured index page, or a built-in notice when it is missing
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let path = &state.config.web.index_path;

    match tokio::fs::read_to_string(path).await {
        Ok(page) => Html(page),
        Err(e) => {
            warn!(path = %path, error = %e, "Index page unavailable, serving fallback");
            Html(FALLBACK_PAGE.to_string())
        }
    }
}

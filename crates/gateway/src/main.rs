//! CiteGraph Gateway
//!
//! HTTP entry point for interactive citation exploration.
//! Handles:
//! - Corpus loading at startup
//! - Request routing to the exploration session
//! - Rate limiting
//! - Observability (logging, metrics, tracing)

mod export;
mod handlers;
mod middleware;

use anyhow::Context;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use citegraph_analytics::Explorer;
use citegraph_common::{config::AppConfig, metrics};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::RwLock;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub explorer: Arc<RwLock<Explorer>>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: AppConfig, explorer: Explorer) -> Self {
        Self {
            config: Arc::new(config),
            explorer: Arc::new(RwLock::new(explorer)),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration; the first argument overrides the corpus path
    let config = AppConfig::load()
        .context("Failed to load configuration")?
        .with_corpus_override(std::env::args().nth(1));

    init_tracing(&config);

    info!(
        service = %config.observability.service_name,
        "Starting CiteGraph Gateway v{}",
        citegraph_common::VERSION
    );

    // Initialize metrics
    let prometheus = if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                metrics::ANALYSIS_BUCKETS,
            )?
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        metrics::register_metrics();
        Some(handle)
    } else {
        None
    };

    // Load the corpus
    info!(path = %config.corpus.path, "Loading corpus...");
    let report = citegraph_ingestion::load_corpus(Path::new(&config.corpus.path))
        .await
        .with_context(|| format!("Failed to load corpus from {}", config.corpus.path))?;

    let explorer = Explorer::new(report.papers);
    let store = explorer.store();
    metrics::record_corpus(store.node_count(), store.edge_count());
    info!(
        papers = store.node_count(),
        edges = store.edge_count(),
        skipped = report.skipped,
        "Corpus ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    // Create app state
    let mut state = AppState::new(config, explorer);
    if let Some(handle) = prometheus {
        state = state.with_metrics(handle);
    }

    // Build the router
    let app = create_router(state);

    // Start the server
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let mut app = Router::new()
        // Visualization page
        .route("/", get(handlers::web::index))

        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::metrics::render))

        // Visible graph views
        .route("/graph", get(handlers::graph::graph))
        .route("/stats", get(handlers::graph::stats))
        .route("/global-stats", get(handlers::graph::global_stats))
        .route("/clear", post(handlers::graph::clear))

        // Paper lookup
        .route("/search", get(handlers::papers::search))
        .route("/select", post(handlers::papers::select))

        // Analytics
        .route("/h-index", post(handlers::analytics::h_index))
        .route("/betweenness", post(handlers::analytics::betweenness))
        .route("/k-core", post(handlers::analytics::k_core));

    if state.config.rate_limit.enabled {
        let limit = middleware::rate_limit::create_rate_limiter(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        app = app.layer(axum::middleware::from_fn_with_state(
            limit,
            middleware::rate_limit::rate_limit_middleware,
        ));
    }

    app.layer(axum::middleware::from_fn(middleware::metrics::track_metrics))
        .layer(CompressionLayer::new())
        .layer(timeout_layer(&state.config))
        .layer(GlobalConcurrencyLimitLayer::new(state.config.server.max_concurrent_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Requests running past the configured timeout are answered with 408
fn timeout_layer(config: &AppConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}

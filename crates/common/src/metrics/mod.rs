//! Metrics and observability utilities
//!
//! Provides metric descriptions and recording helpers with
//! standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all CiteGraph metrics
pub const METRICS_PREFIX: &str = "citegraph";

/// Histogram buckets for analysis latency (in seconds)
/// Betweenness is O(V*E), so the upper buckets are wide.
pub const ANALYSIS_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    5.000,  // 5s
    15.00,  // 15s
    60.00,  // 60s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    describe_counter!(
        format!("{}_analysis_runs_total", METRICS_PREFIX),
        Unit::Count,
        "Total analytics computations by kind"
    );

    describe_histogram!(
        format!("{}_analysis_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Analytics computation latency in seconds"
    );

    describe_gauge!(
        format!("{}_visible_nodes", METRICS_PREFIX),
        Unit::Count,
        "Number of nodes in the visible overlay"
    );

    describe_counter!(
        format!("{}_overlay_mutations_total", METRICS_PREFIX),
        Unit::Count,
        "Total visible overlay mutations by operation"
    );

    describe_gauge!(
        format!("{}_corpus_papers", METRICS_PREFIX),
        Unit::Count,
        "Papers in the loaded corpus"
    );

    describe_gauge!(
        format!("{}_corpus_edges", METRICS_PREFIX),
        Unit::Count,
        "Citation edges in the loaded corpus"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record an analytics run (betweenness, k_core, h_index)
pub fn record_analysis(kind: &str, duration_secs: f64) {
    counter!(
        format!("{}_analysis_runs_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_analysis_duration_seconds", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .record(duration_secs);
}

/// Helper to record an overlay mutation and the resulting overlay size
pub fn record_overlay(op: &str, visible_nodes: usize) {
    counter!(
        format!("{}_overlay_mutations_total", METRICS_PREFIX),
        "op" => op.to_string()
    )
    .increment(1);

    gauge!(format!("{}_visible_nodes", METRICS_PREFIX)).set(visible_nodes as f64);
}

/// Helper to record the loaded corpus size
pub fn record_corpus(papers: usize, edges: usize) {
    gauge!(format!("{}_corpus_papers", METRICS_PREFIX)).set(papers as f64);
    gauge!(format!("{}_corpus_edges", METRICS_PREFIX)).set(edges as f64);
}

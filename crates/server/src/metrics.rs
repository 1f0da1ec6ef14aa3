//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Quravel search server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Search and catalog metrics (registered from the core crate)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "quravel_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("quravel_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "quravel_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Core metrics (search passes, catalog loads)
    for metric in quravel_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Paths served by the API router, kept verbatim as metric labels.
const API_ROUTES: &[&str] = &[
    "/api/v1/health",
    "/api/v1/config",
    "/api/v1/search",
    "/api/v1/search/all",
    "/api/v1/search/stats",
    "/api/v1/search/facets",
    "/api/v1/search/refresh",
];

/// Normalize a path for metric labels.
///
/// Registered routes keep their path. Any other API path collapses into
/// `/api/v1/other` and everything served from the static site into `/site`.
pub fn normalize_path(path: &str) -> String {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };

    if trimmed == "/metrics" || API_ROUTES.contains(&trimmed) {
        trimmed.to_string()
    } else if trimmed == "/api/v1" || trimmed.starts_with("/api/v1/") {
        "/api/v1/other".to_string()
    } else {
        "/site".to_string()
    }
}

//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search passes (count, duration, result sizes)
//! - Catalog loads and the size of the current index

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Searches total by entry point and outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("quravel_searches_total", "Total search pipeline passes"),
        // entry: "preview", "full"; outcome: "results", "no_results", "unavailable"
        &["entry", "outcome"],
    )
    .unwrap()
});

/// Search pass duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "quravel_search_duration_seconds",
            "Duration of a filter/sort/score pass",
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
        &["entry"],
    )
    .unwrap()
});

/// Results returned per search.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "quravel_search_results",
            "Number of results returned per search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &["entry"],
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog loads by source and result.
pub static CATALOG_LOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("quravel_catalog_loads_total", "Total catalog load attempts"),
        &["source", "result"], // result: "success", "error"
    )
    .unwrap()
});

/// Items in the current search index.
pub static CATALOG_ITEMS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "quravel_catalog_items",
        "Number of items in the current search index",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(CATALOG_LOADS.clone()),
        Box::new(CATALOG_ITEMS.clone()),
    ]
}

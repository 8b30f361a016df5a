//! Prometheus metrics for the bookkeeping engine.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Journal entry counter (no high-cardinality labels).
pub static ENTRIES_POSTED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bookkeeping_entries_posted_total",
        "Total number of journal entries posted",
        &["status"] // ok, error
    )
    .expect("Failed to register entries_posted")
});

/// Category resolution counter by outcome.
pub static CATEGORY_RESOLUTIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bookkeeping_category_resolutions_total",
        "Total number of category resolutions",
        &["source"] // manual, mapping, default, unresolved
    )
    .expect("Failed to register category_resolutions")
});

/// Recalculation failures. Non-zero means cached balances may be stale and a
/// reconciliation sweep is due.
pub static RECALCULATION_FAILURES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bookkeeping_recalculation_failures_total",
        "Balance recalculations that failed after an entry was persisted",
        &["error_type"]
    )
    .expect("Failed to register recalculation_failures")
});

/// Account counter by type.
pub static ACCOUNTS_CREATED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bookkeeping_accounts_created_total",
        "Total number of accounts created",
        &["account_type"]
    )
    .expect("Failed to register accounts_created")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bookkeeping_errors_total",
        "Total number of errors by type",
        &["error_type"]
    )
    .expect("Failed to register errors_total")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "bookkeeping_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&ENTRIES_POSTED);
    Lazy::force(&CATEGORY_RESOLUTIONS);
    Lazy::force(&RECALCULATION_FAILURES);
    Lazy::force(&ACCOUNTS_CREATED);
    Lazy::force(&ERRORS_TOTAL);
    Lazy::force(&DB_QUERY_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}

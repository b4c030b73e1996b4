//! Prometheus metrics for the data-access layer.
//!
//! - Query metrics (outcome counts and latency per operation)
//! - JSON column decode failures
//! - Pool connection churn

mod helpers;

pub use helpers::{encode_metrics, DecodeMetrics, PoolMetrics, QueryTimer};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "mech";

lazy_static! {
    // ============================================================================
    // Query Metrics
    // ============================================================================

    /// Total statements executed, by operation and outcome
    pub static ref DB_QUERIES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_db_queries_total", METRIC_PREFIX),
        "Total database statements executed",
        &["operation", "outcome"]
    ).unwrap();

    /// Statement latency in seconds
    pub static ref DB_QUERY_LATENCY: HistogramVec = register_histogram_vec!(
        format!("{}_db_query_latency_seconds", METRIC_PREFIX),
        "Database statement latency in seconds",
        &["operation"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5]
    ).unwrap();

    // ============================================================================
    // Data Shape Metrics
    // ============================================================================

    /// JSON text columns that failed to decode and fell back to empty
    pub static ref JSON_DECODE_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_json_decode_failures_total", METRIC_PREFIX),
        "JSON columns that failed to decode and were replaced with an empty default",
        &["column"]
    ).unwrap();

    // ============================================================================
    // Pool Metrics
    // ============================================================================

    /// Physical connections opened by the pool
    pub static ref POOL_CONNECTIONS_OPENED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_pool_connections_opened_total", METRIC_PREFIX),
        "Physical database connections opened by the pool"
    ).unwrap();

    /// Idle connections found dead and discarded
    pub static ref POOL_STALE_CONNECTIONS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_pool_stale_connections_total", METRIC_PREFIX),
        "Idle connections that failed a liveness check and were discarded"
    ).unwrap();
}

//! Metrics helper structs for convenient metric recording

use std::time::Instant;

use prometheus::{Encoder, TextEncoder};

use super::{
    DB_QUERIES_TOTAL, DB_QUERY_LATENCY, JSON_DECODE_FAILURES_TOTAL, POOL_CONNECTIONS_OPENED_TOTAL,
    POOL_STALE_CONNECTIONS_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Times one statement and records its outcome.
pub struct QueryTimer {
    operation: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    pub fn success(self) {
        self.finish("success");
    }

    pub fn failure(self) {
        self.finish("error");
    }

    fn finish(self, outcome: &str) {
        DB_QUERY_LATENCY
            .with_label_values(&[self.operation])
            .observe(self.start.elapsed().as_secs_f64());
        DB_QUERIES_TOTAL
            .with_label_values(&[self.operation, outcome])
            .inc();
    }
}

/// Helper struct for recording JSON column decode metrics
pub struct DecodeMetrics;

impl DecodeMetrics {
    /// Record a column that fell back to its empty default
    pub fn record_failure(column: &str) {
        JSON_DECODE_FAILURES_TOTAL.with_label_values(&[column]).inc();
    }

    pub fn failures(column: &str) -> u64 {
        JSON_DECODE_FAILURES_TOTAL.with_label_values(&[column]).get()
    }
}

/// Helper struct for recording pool metrics
pub struct PoolMetrics;

impl PoolMetrics {
    pub fn record_connection_opened() {
        POOL_CONNECTIONS_OPENED_TOTAL.inc();
    }

    pub fn record_stale_connection() {
        POOL_STALE_CONNECTIONS_TOTAL.inc();
    }
}

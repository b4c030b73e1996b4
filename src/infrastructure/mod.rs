//! Infrastructure layer modules
//!
//! This module contains shared infrastructure components:
//! - `config`: Application configuration and settings
//! - `error`: Unified error types
//! - `metrics`: Prometheus metrics helpers
//! - `postgres`: PostgreSQL connection pool, startup probe, migrations

pub mod config;
pub mod error;
pub mod metrics;
pub mod postgres;

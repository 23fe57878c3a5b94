//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database sessions and repositories (PostgreSQL)
//! - In-memory repositories for tests and local runs
//! - Prometheus metrics

pub mod database;
pub mod memory;
pub mod metrics;
pub mod repositories;

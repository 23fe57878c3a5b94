//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod address;
pub mod customer;
pub mod dish;
pub mod health;

//! HTTP Layer
//!
//! REST handlers and route table.

pub mod handlers;
pub mod routes;

//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes. Batch endpoints share one path per resource: the body
/// carries the items or IDs.
fn api_routes() -> Router<AppState> {
    use handlers::{address, customer, dish};

    Router::new()
        .route(
            "/dishes",
            post(dish::create_dish)
                .patch(dish::update_dish)
                .delete(dish::delete_dish)
                .get(dish::get_dishes),
        )
        .route(
            "/customers",
            post(customer::create_customer)
                .patch(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route("/customers/{customer_id}", get(customer::get_customer))
        .route(
            "/customers/{customer_id}/addresses",
            get(customer::get_customer_addresses),
        )
        .route(
            "/addresses",
            post(address::create_address)
                .patch(address::update_address)
                .delete(address::delete_address),
        )
}

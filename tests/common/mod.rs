//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use serde_json::{json, Value};

use restaurant_backend::application::dto::CustomerResponse;
use restaurant_backend::config::Settings;
use restaurant_backend::infrastructure::memory::MemoryUnitOfWork;
use restaurant_backend::shared::snowflake::SnowflakeGenerator;
use restaurant_backend::startup::{build_router, AppState};

/// Test application backed by in-memory storage
pub struct TestApp {
    pub server: TestServer,
    pub db: MemoryUnitOfWork,
}

impl TestApp {
    pub fn new() -> Self {
        let settings = test_settings();
        let db = MemoryUnitOfWork::new();
        let state = AppState::new(Arc::new(db.clone()), Arc::new(SnowflakeGenerator::default()));
        let server = TestServer::new(build_router(state, &settings)).unwrap();

        Self { server, db }
    }

    /// Create a customer through the API
    pub async fn create_customer(&self) -> CustomerResponse {
        let response = self
            .server
            .post("/api/v1/customers")
            .json(&json!([customer_body(&unique_username())]))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        response
            .json::<Vec<CustomerResponse>>()
            .into_iter()
            .next()
            .unwrap()
    }
}

/// Settings with the memory backend, independent of config files
pub fn test_settings() -> Settings {
    Settings::builder("test")
        .unwrap()
        .set_override("database.backend", "memory")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap()
        .validate()
        .unwrap()
}

/// Customer create body with fake personal details
pub fn customer_body(username: &str) -> Value {
    let email: String = SafeEmail().fake();
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    json!({
        "accountInfo": {
            "username": username,
            "email": email,
            "contactNumber": "555-0100"
        },
        "firstName": first_name,
        "lastName": last_name
    })
}

/// Generate a unique test username
pub fn unique_username() -> String {
    format!("user_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

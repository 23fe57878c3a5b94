//! Address API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use restaurant_backend::application::dto::{AddressCreateResponse, AddressResponse};

use crate::common::TestApp;

fn address_body(customer_id: i64, street: &str) -> Value {
    json!({
        "customerId": customer_id,
        "province": "Ontario",
        "city": "Toronto",
        "streetName": street,
        "buildingNumber": "12"
    })
}

#[tokio::test]
async fn test_create_and_list_addresses() {
    let app = TestApp::new();
    let customer = app.create_customer().await;

    let response = app
        .server
        .post("/api/v1/addresses")
        .json(&json!([
            address_body(customer.id, "King St"),
            address_body(customer.id, "Queen St")
        ]))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Vec<AddressCreateResponse> = response.json();
    assert_eq!(created.len(), 2);

    let listed = app
        .server
        .get(&format!("/api/v1/customers/{}/addresses", customer.id))
        .await;

    listed.assert_status_ok();
    let listed: Vec<AddressResponse> = listed.json();
    let streets: Vec<&str> = listed.iter().map(|a| a.street_name.as_str()).collect();
    assert_eq!(streets, vec!["King St", "Queen St"]);
}

#[tokio::test]
async fn test_create_for_unknown_customer_is_not_found() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/addresses")
        .json(&json!([address_body(777, "King St")]))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.db.address_count(), 0);
}

#[tokio::test]
async fn test_update_address_city() {
    let app = TestApp::new();
    let customer = app.create_customer().await;
    let created: Vec<AddressCreateResponse> = app
        .server
        .post("/api/v1/addresses")
        .json(&json!([address_body(customer.id, "King St")]))
        .await
        .json();

    let response = app
        .server
        .patch("/api/v1/addresses")
        .json(&json!([{ "id": created[0].id, "city": "Ottawa" }]))
        .await;

    response.assert_status_ok();
    let updated: Vec<AddressResponse> = response.json();
    assert_eq!(updated[0].city, "Ottawa");
    assert_eq!(updated[0].street_name, "King St");
}

#[tokio::test]
async fn test_delete_unknown_address_is_not_found() {
    let app = TestApp::new();

    let response = app
        .server
        .delete("/api/v1/addresses")
        .json(&json!([5]))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

//! Customer API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use restaurant_backend::application::dto::CustomerResponse;

use crate::common::{customer_body, unique_username, TestApp};

#[tokio::test]
async fn test_create_and_get_customer() {
    let app = TestApp::new();
    let created = app.create_customer().await;

    let response = app
        .server
        .get(&format!("/api/v1/customers/{}", created.id))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<CustomerResponse>(), created);
}

#[tokio::test]
async fn test_get_unknown_customer_is_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/customers/12345").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Customer with id 12345 does not exist");
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new();
    let username = unique_username();

    app.server
        .post("/api/v1/customers")
        .json(&json!([customer_body(&username)]))
        .await
        .assert_status(StatusCode::CREATED);
    let response = app
        .server
        .post("/api/v1/customers")
        .json(&json!([customer_body(&username)]))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], 10005);
}

#[tokio::test]
async fn test_invalid_nested_email_is_rejected() {
    let app = TestApp::new();
    let mut body = customer_body(&unique_username());
    body["accountInfo"]["email"] = json!("not-an-email");

    let response = app.server.post("/api/v1/customers").json(&json!([body])).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "accountInfo.email");
}

#[tokio::test]
async fn test_update_customer_name_and_contact() {
    let app = TestApp::new();
    let created = app.create_customer().await;

    let response = app
        .server
        .patch("/api/v1/customers")
        .json(&json!([{
            "id": created.id,
            "firstName": "Ada",
            "accountInfo": { "contactNumber": "555-0199" }
        }]))
        .await;

    response.assert_status_ok();
    let updated: Vec<CustomerResponse> = response.json();
    assert_eq!(updated[0].first_name, "Ada");
    assert_eq!(updated[0].last_name, created.last_name);
    assert_eq!(updated[0].contact_number.as_deref(), Some("555-0199"));
    assert_eq!(updated[0].username, created.username);
    assert!(updated[0].updated.is_some());
}

#[tokio::test]
async fn test_delete_customer_removes_addresses() {
    let app = TestApp::new();
    let customer = app.create_customer().await;
    app.server
        .post("/api/v1/addresses")
        .json(&json!([{
            "customerId": customer.id,
            "province": "Ontario",
            "city": "Toronto",
            "streetName": "King St",
            "buildingNumber": "12"
        }]))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .delete("/api/v1/customers")
        .json(&json!([customer.id]))
        .await;

    response.assert_status_ok();
    assert_eq!(app.db.address_count(), 0);
    app.server
        .get(&format!("/api/v1/customers/{}", customer.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

//! Dish API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use restaurant_backend::application::dto::DishResponse;

use crate::common::TestApp;

async fn create_dishes(app: &TestApp, names: &[&str]) -> Vec<DishResponse> {
    let body: Vec<Value> = names
        .iter()
        .map(|name| json!({ "name": name, "description": format!("{} of the day", name) }))
        .collect();

    let response = app.server.post("/api/v1/dishes").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_dishes_returns_created() {
    let app = TestApp::new();

    let created = create_dishes(&app, &["Pasta", "Soup"]).await;

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].name, "Pasta");
    assert_eq!(created[1].description, "Soup of the day");
    assert_ne!(created[0].id, created[1].id);
    assert!(created[0].updated.is_none());
    assert_eq!(app.db.dish_count(), 2);
}

#[tokio::test]
async fn test_create_dish_serializes_camel_case() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/dishes")
        .json(&json!([{ "name": "Pasta", "description": "Fresh" }]))
        .await;

    let body: Value = response.json();
    assert!(body[0].get("createdBy").is_some());
    assert!(body[0].get("created_by").is_none());
}

#[tokio::test]
async fn test_create_empty_batch() {
    let app = TestApp::new();

    let response = app.server.post("/api/v1/dishes").json(&json!([])).await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Vec<DishResponse>>(), Vec::new());
}

#[tokio::test]
async fn test_create_too_long_name_is_rejected() {
    let app = TestApp::new();
    let name = "x".repeat(256);

    let response = app
        .server
        .post("/api/v1/dishes")
        .json(&json!([{ "name": name, "description": "" }]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 10007);
    assert_eq!(app.db.dish_count(), 0);
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = TestApp::new();
    let created = create_dishes(&app, &["Pasta"]).await;
    let id = created[0].id;

    let response = app
        .server
        .patch("/api/v1/dishes")
        .json(&json!([{ "id": id, "name": "Lasagna" }]))
        .await;

    response.assert_status_ok();
    let updated: Vec<DishResponse> = response.json();
    assert_eq!(updated[0].id, id);
    assert_eq!(updated[0].name, "Lasagna");
    assert_eq!(updated[0].description, "Pasta of the day");
    assert!(updated[0].updated.is_some());
}

#[tokio::test]
async fn test_update_missing_dish_rolls_back_batch() {
    let app = TestApp::new();
    let created = create_dishes(&app, &["Pasta"]).await;
    let id = created[0].id;

    let response = app
        .server
        .patch("/api/v1/dishes")
        .json(&json!([
            { "id": id, "name": "Lasagna" },
            { "id": 999, "name": "Ghost" }
        ]))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], 10001);
    assert_eq!(body["message"], "Dish with id 999 does not exist");

    // The first update was discarded with the batch
    let deleted = app.server.delete("/api/v1/dishes").json(&json!([id])).await;
    let deleted: Vec<DishResponse> = deleted.json();
    assert_eq!(deleted[0].name, "Pasta");
}

#[tokio::test]
async fn test_update_empty_name_is_bad_request() {
    let app = TestApp::new();
    let created = create_dishes(&app, &["Pasta"]).await;

    let response = app
        .server
        .patch("/api/v1/dishes")
        .json(&json!([{ "id": created[0].id, "name": "" }]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 10002);
}

#[tokio::test]
async fn test_delete_returns_last_state_and_removes() {
    let app = TestApp::new();
    let created = create_dishes(&app, &["Pasta", "Soup"]).await;
    let ids: Vec<i64> = created.iter().map(|d| d.id).collect();

    let response = app.server.delete("/api/v1/dishes").json(&ids).await;

    response.assert_status_ok();
    let deleted: Vec<DishResponse> = response.json();
    assert_eq!(deleted, created);
    assert_eq!(app.db.dish_count(), 0);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = TestApp::new();
    let created = create_dishes(&app, &["Pasta"]).await;
    let ids = vec![created[0].id];

    app.server
        .delete("/api/v1/dishes")
        .json(&ids)
        .await
        .assert_status_ok();
    let response = app.server.delete("/api/v1/dishes").json(&ids).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_with_missing_id_keeps_everything() {
    let app = TestApp::new();
    let created = create_dishes(&app, &["Pasta"]).await;

    let response = app
        .server
        .delete("/api/v1/dishes")
        .json(&json!([created[0].id, 424242]))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.db.dish_count(), 1);
}

#[tokio::test]
async fn test_get_dishes_is_empty() {
    let app = TestApp::new();
    create_dishes(&app, &["Pasta"]).await;

    let response = app
        .server
        .get("/api/v1/dishes")
        .add_query_param("id", 1)
        .add_query_param("customerId", 2)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

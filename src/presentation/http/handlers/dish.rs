//! Dish Handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    DishCreateRequest, DishCreateResponse, DishDeleteResponse, DishQueryParams, DishResponse,
    DishUpdateRequest, DishUpdateResponse,
};
use crate::shared::error::AppError;
use crate::shared::validation::validate_batch;
use crate::startup::AppState;

/// Create dishes
pub async fn create_dish(
    State(state): State<AppState>,
    Json(body): Json<Vec<DishCreateRequest>>,
) -> Result<(StatusCode, Json<Vec<DishCreateResponse>>), AppError> {
    validate_batch(&body)?;

    let created = state.dishes.create_dish(body).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update dishes
pub async fn update_dish(
    State(state): State<AppState>,
    Json(body): Json<Vec<DishUpdateRequest>>,
) -> Result<Json<Vec<DishUpdateResponse>>, AppError> {
    validate_batch(&body)?;

    let updated = state.dishes.update_dish(body).await?;

    Ok(Json(updated))
}

/// Delete dishes by ID
pub async fn delete_dish(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Result<Json<Vec<DishDeleteResponse>>, AppError> {
    let deleted = state.dishes.delete_dish(ids).await?;

    Ok(Json(deleted))
}

/// List dishes
pub async fn get_dishes(
    State(state): State<AppState>,
    Query(query): Query<DishQueryParams>,
) -> Result<Json<Vec<DishResponse>>, AppError> {
    let dishes = state
        .dishes
        .get_dishes(query.id, query.customer_id)
        .await?;

    Ok(Json(dishes.into_iter().map(DishResponse::from).collect()))
}

//! Address Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{
    AddressCreateRequest, AddressCreateResponse, AddressDeleteResponse, AddressUpdateRequest,
    AddressUpdateResponse,
};
use crate::shared::error::AppError;
use crate::shared::validation::validate_batch;
use crate::startup::AppState;

pub async fn create_address(
    State(state): State<AppState>,
    Json(body): Json<Vec<AddressCreateRequest>>,
) -> Result<(StatusCode, Json<Vec<AddressCreateResponse>>), AppError> {
    validate_batch(&body)?;

    let created = state.addresses.create_address(body).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_address(
    State(state): State<AppState>,
    Json(body): Json<Vec<AddressUpdateRequest>>,
) -> Result<Json<Vec<AddressUpdateResponse>>, AppError> {
    validate_batch(&body)?;

    let updated = state.addresses.update_address(body).await?;

    Ok(Json(updated))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Result<Json<Vec<AddressDeleteResponse>>, AppError> {
    let deleted = state.addresses.delete_address(ids).await?;

    Ok(Json(deleted))
}

//! Customer Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    AddressResponse, CustomerCreateRequest, CustomerCreateResponse, CustomerDeleteResponse,
    CustomerResponse, CustomerUpdateRequest, CustomerUpdateResponse,
};
use crate::shared::error::AppError;
use crate::shared::validation::validate_batch;
use crate::startup::AppState;

/// Create customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<Vec<CustomerCreateRequest>>,
) -> Result<(StatusCode, Json<Vec<CustomerCreateResponse>>), AppError> {
    validate_batch(&body)?;

    let created = state.customers.create_customer(body).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update customers
pub async fn update_customer(
    State(state): State<AppState>,
    Json(body): Json<Vec<CustomerUpdateRequest>>,
) -> Result<Json<Vec<CustomerUpdateResponse>>, AppError> {
    validate_batch(&body)?;

    let updated = state.customers.update_customer(body).await?;

    Ok(Json(updated))
}

/// Delete customers and their addresses
pub async fn delete_customer(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Result<Json<Vec<CustomerDeleteResponse>>, AppError> {
    let deleted = state.customers.delete_customer(ids).await?;

    Ok(Json(deleted))
}

/// Get a customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = state.customers.get_customer(customer_id).await?;

    Ok(Json(customer))
}

/// List a customer's addresses
pub async fn get_customer_addresses(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<Json<Vec<AddressResponse>>, AppError> {
    let addresses = state.addresses.get_addresses(customer_id).await?;

    Ok(Json(addresses))
}

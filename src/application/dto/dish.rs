//! Dish DTOs
//!
//! Request and response bodies for the dish endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Dish;

/// Create dish request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DishCreateRequest {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
}

/// Update dish request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DishUpdateRequest {
    pub id: i64,

    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Dish query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishQueryParams {
    pub id: Option<i64>,
    pub customer_id: Option<i64>,
}

/// Dish response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub updated: Option<DateTime<Utc>>,
    pub updated_by: Option<i64>,
}

impl From<Dish> for DishResponse {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            description: dish.description,
            created: dish.created,
            created_by: dish.created_by,
            updated: dish.updated,
            updated_by: dish.updated_by,
        }
    }
}

/// Returned for each created dish
pub type DishCreateResponse = DishResponse;

/// Returned for each updated dish
pub type DishUpdateResponse = DishResponse;

/// Last known state of each deleted dish
pub type DishDeleteResponse = DishResponse;

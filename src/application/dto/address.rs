//! Address DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Address;

/// Create address request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressCreateRequest {
    pub customer_id: i64,

    #[validate(length(max = 100, message = "Province must be at most 100 characters"))]
    pub province: String,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: String,

    #[validate(length(max = 255, message = "Street name must be at most 255 characters"))]
    pub street_name: String,

    #[validate(length(max = 32, message = "Building number must be at most 32 characters"))]
    pub building_number: String,
}

/// Update address request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressUpdateRequest {
    pub id: i64,

    #[validate(length(max = 100, message = "Province must be at most 100 characters"))]
    pub province: Option<String>,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 255, message = "Street name must be at most 255 characters"))]
    pub street_name: Option<String>,

    #[validate(length(max = 32, message = "Building number must be at most 32 characters"))]
    pub building_number: Option<String>,
}

/// Returned for each created address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressCreateResponse {
    pub id: i64,
    pub customer_id: i64,
    pub province: String,
    pub city: String,
    pub street_name: String,
    pub building_number: String,
}

impl From<Address> for AddressCreateResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            customer_id: address.customer_id,
            province: address.province,
            city: address.city,
            street_name: address.street_name,
            building_number: address.building_number,
        }
    }
}

/// Address response body for reads, updates and deletes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: i64,
    pub customer_id: i64,
    pub province: String,
    pub city: String,
    pub street_name: String,
    pub building_number: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            customer_id: address.customer_id,
            province: address.province,
            city: address.city,
            street_name: address.street_name,
            building_number: address.building_number,
            created: address.created,
            updated: address.updated,
        }
    }
}

pub type AddressUpdateResponse = AddressResponse;
pub type AddressDeleteResponse = AddressResponse;

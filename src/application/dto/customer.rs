//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Customer;

/// Account details supplied when creating a customer
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreateRequest {
    #[validate(length(max = 64, message = "Username must be at most 64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 32, message = "Contact number must be at most 32 characters"))]
    pub contact_number: Option<String>,
}

/// Partial account update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateRequest {
    #[validate(length(max = 64, message = "Username must be at most 64 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "Contact number must be at most 32 characters"))]
    pub contact_number: Option<String>,
}

/// Create customer request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreateRequest {
    #[validate(nested)]
    pub account_info: AccountCreateRequest,

    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,
}

/// Update customer request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateRequest {
    pub id: i64,

    #[validate(nested)]
    pub account_info: Option<AccountUpdateRequest>,

    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,
}

/// Customer response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            username: customer.account.username,
            email: customer.account.email,
            contact_number: customer.account.contact_number,
            first_name: customer.first_name,
            last_name: customer.last_name,
            created: customer.created,
            updated: customer.updated,
        }
    }
}

pub type CustomerCreateResponse = CustomerResponse;
pub type CustomerUpdateResponse = CustomerResponse;
pub type CustomerDeleteResponse = CustomerResponse;

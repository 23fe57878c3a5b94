//! Customer entity and repository trait.
//!
//! Maps to the `customers` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Account details embedded in a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login name, unique across customers
    pub username: String,

    /// Contact email
    pub email: String,

    /// Optional phone number
    pub contact_number: Option<String>,
}

/// A restaurant customer.
///
/// Maps to the `customers` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - username: VARCHAR(64) NOT NULL UNIQUE
/// - email: VARCHAR(255) NOT NULL
/// - contact_number: VARCHAR(32) NULL
/// - first_name: VARCHAR(100) NOT NULL
/// - last_name: VARCHAR(100) NOT NULL
/// - created: TIMESTAMPTZ NOT NULL
/// - updated: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub account: Account,
    pub first_name: String,
    pub last_name: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl Customer {
    /// Full name as displayed on orders.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Repository trait for Customer data access operations.
#[async_trait]
pub trait CustomerRepository: Send {
    /// Find a customer by its ID.
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Customer>, AppError>;

    /// Find a customer by account username.
    async fn find_by_username(&mut self, username: &str) -> Result<Option<Customer>, AppError>;

    /// Insert or overwrite the customer. A username taken by another
    /// customer fails with `Conflict`.
    async fn save(&mut self, customer: &Customer) -> Result<Customer, AppError>;

    /// Delete the customer together with its addresses.
    async fn delete(&mut self, customer: &Customer) -> Result<(), AppError>;
}

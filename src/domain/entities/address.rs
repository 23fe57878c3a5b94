//! Address entity and repository trait.
//!
//! Maps to the `addresses` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A delivery address belonging to a customer.
///
/// Maps to the `addresses` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - customer_id: BIGINT NOT NULL REFERENCES customers(id) ON DELETE CASCADE
/// - province, city, street_name, building_number: VARCHAR NOT NULL
/// - created: TIMESTAMPTZ NOT NULL
/// - updated: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub customer_id: i64,
    pub province: String,
    pub city: String,
    pub street_name: String,
    pub building_number: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

/// Repository trait for Address data access operations.
#[async_trait]
pub trait AddressRepository: Send {
    /// Find an address by its ID.
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Address>, AppError>;

    /// Find all addresses of a customer, ordered by ID.
    async fn find_by_customer_id(&mut self, customer_id: i64) -> Result<Vec<Address>, AppError>;

    /// Insert or overwrite the address.
    async fn save(&mut self, address: &Address) -> Result<Address, AppError>;

    /// Delete the address.
    async fn delete(&mut self, address: &Address) -> Result<(), AppError>;
}

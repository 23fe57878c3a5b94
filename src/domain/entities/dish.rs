//! Dish entity and repository trait.
//!
//! Maps to the `dishes` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A dish on the restaurant's menu.
///
/// Maps to the `dishes` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(255) NOT NULL
/// - description: TEXT NOT NULL
/// - created: TIMESTAMPTZ NOT NULL
/// - created_by: BIGINT NULL
/// - updated: TIMESTAMPTZ NULL
/// - updated_by: BIGINT NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Display name
    pub name: String,

    /// Menu description
    pub description: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Actor that created the dish, when known
    pub created_by: Option<i64>,

    /// Last update timestamp, `None` until the first update
    pub updated: Option<DateTime<Utc>>,

    /// Actor that last updated the dish, when known
    pub updated_by: Option<i64>,
}

impl Dish {
    /// Build a dish that has not been persisted yet.
    pub fn new(id: i64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            created: Utc::now(),
            created_by: None,
            updated: None,
            updated_by: None,
        }
    }

    /// Mark the dish as modified now.
    pub fn touch(&mut self) {
        self.updated = Some(Utc::now());
    }
}

/// Repository trait for Dish data access operations.
///
/// Implementations run against the connection or transaction of the
/// session they were obtained from.
#[async_trait]
pub trait DishRepository: Send {
    /// Find a dish by its ID.
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Dish>, AppError>;

    /// Insert the dish, or overwrite the stored row with the same ID.
    async fn save(&mut self, dish: &Dish) -> Result<Dish, AppError>;

    /// Delete the dish. Fails with `NotFound` if it no longer exists.
    async fn delete(&mut self, dish: &Dish) -> Result<(), AppError>;
}

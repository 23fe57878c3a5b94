//! Dish Service
//!
//! Batch create, update and delete of menu dishes.
//!
//! Updates and deletes run in one transaction per call: the first failing
//! item aborts the call and rolls back the items before it. Creates are
//! written one by one in autocommit mode, so items saved before a failure
//! stay persisted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::dto::{
    DishCreateRequest, DishCreateResponse, DishDeleteResponse, DishUpdateRequest,
    DishUpdateResponse,
};
use crate::domain::{Dish, UnitOfWork};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::require_non_empty;

/// Dish service trait defining all dish operations.
#[async_trait]
pub trait DishService: Send + Sync {
    /// Create one dish per request.
    async fn create_dish(
        &self,
        requests: Vec<DishCreateRequest>,
    ) -> Result<Vec<DishCreateResponse>, DishError>;

    /// Apply partial updates to existing dishes.
    async fn update_dish(
        &self,
        requests: Vec<DishUpdateRequest>,
    ) -> Result<Vec<DishUpdateResponse>, DishError>;

    /// Delete dishes by ID, returning their last known state.
    async fn delete_dish(&self, ids: Vec<i64>) -> Result<Vec<DishDeleteResponse>, DishError>;

    /// Dishes with their portions, reviews and images.
    ///
    /// Not implemented yet: always returns an empty list.
    async fn get_dishes(
        &self,
        id: Option<i64>,
        customer_id: Option<i64>,
    ) -> Result<Vec<Dish>, DishError>;
}

// =============================================================================
// Error Types
// =============================================================================

/// Dish service errors.
#[derive(Debug, thiserror::Error)]
pub enum DishError {
    #[error("Dish with id {0} does not exist")]
    NotFound(i64),

    #[error("{0}")]
    InvalidField(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<DishError> for AppError {
    fn from(err: DishError) -> Self {
        match err {
            DishError::NotFound(_) => AppError::NotFound(err.to_string()),
            DishError::InvalidField(msg) => AppError::BadRequest(msg),
            DishError::Repository(e) => e,
        }
    }
}

// =============================================================================
// Service Implementation
// =============================================================================

/// DishService implementation over a unit of work.
pub struct DishServiceImpl {
    db: Arc<dyn UnitOfWork>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl DishServiceImpl {
    /// Create a new DishServiceImpl.
    pub fn new(db: Arc<dyn UnitOfWork>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self { db, id_generator }
    }
}

#[async_trait]
impl DishService for DishServiceImpl {
    async fn create_dish(
        &self,
        requests: Vec<DishCreateRequest>,
    ) -> Result<Vec<DishCreateResponse>, DishError> {
        let mut session = self.db.acquire().await?;
        let mut result = Vec::with_capacity(requests.len());

        for request in requests {
            // Creates accept empty fields; updates reject them
            if request.name.is_empty() || request.description.is_empty() {
                warn!(
                    name = %request.name,
                    description = %request.description,
                    "Creating dish with an empty name or description"
                );
            }

            let dish = Dish::new(
                self.id_generator.generate(),
                request.name,
                request.description,
            );
            let dish = session.dishes().save(&dish).await?;
            metrics::record_entity_writes("dish", "create", 1);
            debug!(dish_id = dish.id, "Dish created: {:?}", dish);

            // TODO: assign portions once the portion entity exists
            result.push(DishCreateResponse::from(dish));
        }

        Ok(result)
    }

    async fn update_dish(
        &self,
        requests: Vec<DishUpdateRequest>,
    ) -> Result<Vec<DishUpdateResponse>, DishError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(requests.len());

        for request in requests {
            let mut dish = session
                .dishes()
                .find_by_id(request.id)
                .await?
                .ok_or(DishError::NotFound(request.id))?;

            if let Some(name) = request.name {
                require_non_empty(Some(&name), "Name").map_err(DishError::InvalidField)?;
                dish.name = name;
            }

            if let Some(description) = request.description {
                require_non_empty(Some(&description), "Description")
                    .map_err(DishError::InvalidField)?;
                dish.description = description;
            }

            dish.touch();
            let dish = session.dishes().save(&dish).await?;
            debug!(dish_id = dish.id, "Dish updated: {:?}", dish);

            result.push(DishUpdateResponse::from(dish));
        }

        session.commit().await?;
        metrics::record_entity_writes("dish", "update", result.len());

        Ok(result)
    }

    async fn delete_dish(&self, ids: Vec<i64>) -> Result<Vec<DishDeleteResponse>, DishError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(ids.len());

        for id in ids {
            let dish = session
                .dishes()
                .find_by_id(id)
                .await?
                .ok_or(DishError::NotFound(id))?;

            session.dishes().delete(&dish).await?;
            debug!(dish_id = dish.id, "Dish deleted: {:?}", dish);

            result.push(DishDeleteResponse::from(dish));
        }

        session.commit().await?;
        metrics::record_entity_writes("dish", "delete", result.len());

        Ok(result)
    }

    async fn get_dishes(
        &self,
        id: Option<i64>,
        customer_id: Option<i64>,
    ) -> Result<Vec<Dish>, DishError> {
        debug!(?id, ?customer_id, "Dish aggregation is not available yet");
        Ok(Vec::new())
    }
}

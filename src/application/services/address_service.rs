//! Address Service
//!
//! Delivery addresses owned by customers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::application::dto::{
    AddressCreateRequest, AddressCreateResponse, AddressDeleteResponse, AddressResponse,
    AddressUpdateRequest, AddressUpdateResponse,
};
use crate::domain::{Address, UnitOfWork};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::require_non_empty;

/// Address service trait.
#[async_trait]
pub trait AddressService: Send + Sync {
    async fn create_address(
        &self,
        requests: Vec<AddressCreateRequest>,
    ) -> Result<Vec<AddressCreateResponse>, AddressError>;

    async fn update_address(
        &self,
        requests: Vec<AddressUpdateRequest>,
    ) -> Result<Vec<AddressUpdateResponse>, AddressError>;

    async fn delete_address(
        &self,
        ids: Vec<i64>,
    ) -> Result<Vec<AddressDeleteResponse>, AddressError>;

    /// Addresses of a customer, ordered by ID.
    async fn get_addresses(&self, customer_id: i64) -> Result<Vec<AddressResponse>, AddressError>;
}

/// Address service errors.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("Address with id {0} does not exist")]
    NotFound(i64),

    #[error("Customer with id {0} does not exist")]
    CustomerNotFound(i64),

    #[error("{0}")]
    InvalidField(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<AddressError> for AppError {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::NotFound(_) | AddressError::CustomerNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            AddressError::InvalidField(msg) => AppError::BadRequest(msg),
            AddressError::Repository(e) => e,
        }
    }
}

/// Apply an optional replacement to a required text field.
fn replace(target: &mut String, value: Option<String>, label: &str) -> Result<(), AddressError> {
    if let Some(value) = value {
        require_non_empty(Some(&value), label).map_err(AddressError::InvalidField)?;
        *target = value;
    }
    Ok(())
}

fn non_empty(value: String, label: &str) -> Result<String, AddressError> {
    require_non_empty(Some(&value), label).map_err(AddressError::InvalidField)?;
    Ok(value)
}

/// AddressService implementation over a unit of work.
pub struct AddressServiceImpl {
    db: Arc<dyn UnitOfWork>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl AddressServiceImpl {
    pub fn new(db: Arc<dyn UnitOfWork>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self { db, id_generator }
    }
}

#[async_trait]
impl AddressService for AddressServiceImpl {
    async fn create_address(
        &self,
        requests: Vec<AddressCreateRequest>,
    ) -> Result<Vec<AddressCreateResponse>, AddressError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(requests.len());

        for request in requests {
            session
                .customers()
                .find_by_id(request.customer_id)
                .await?
                .ok_or(AddressError::CustomerNotFound(request.customer_id))?;

            let address = Address {
                id: self.id_generator.generate(),
                customer_id: request.customer_id,
                province: non_empty(request.province, "Province")?,
                city: non_empty(request.city, "City")?,
                street_name: non_empty(request.street_name, "Street name")?,
                building_number: non_empty(request.building_number, "Building number")?,
                created: Utc::now(),
                updated: None,
            };

            let address = session.addresses().save(&address).await?;
            debug!(
                address_id = address.id,
                customer_id = address.customer_id,
                "Address created"
            );

            result.push(AddressCreateResponse::from(address));
        }

        session.commit().await?;
        metrics::record_entity_writes("address", "create", result.len());

        Ok(result)
    }

    async fn update_address(
        &self,
        requests: Vec<AddressUpdateRequest>,
    ) -> Result<Vec<AddressUpdateResponse>, AddressError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(requests.len());

        for request in requests {
            let mut address = session
                .addresses()
                .find_by_id(request.id)
                .await?
                .ok_or(AddressError::NotFound(request.id))?;

            replace(&mut address.province, request.province, "Province")?;
            replace(&mut address.city, request.city, "City")?;
            replace(&mut address.street_name, request.street_name, "Street name")?;
            replace(
                &mut address.building_number,
                request.building_number,
                "Building number",
            )?;
            address.updated = Some(Utc::now());

            let address = session.addresses().save(&address).await?;
            debug!(address_id = address.id, "Address updated");

            result.push(AddressUpdateResponse::from(address));
        }

        session.commit().await?;
        metrics::record_entity_writes("address", "update", result.len());

        Ok(result)
    }

    async fn delete_address(
        &self,
        ids: Vec<i64>,
    ) -> Result<Vec<AddressDeleteResponse>, AddressError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(ids.len());

        for id in ids {
            let address = session
                .addresses()
                .find_by_id(id)
                .await?
                .ok_or(AddressError::NotFound(id))?;

            session.addresses().delete(&address).await?;
            debug!(address_id = address.id, "Address deleted");

            result.push(AddressDeleteResponse::from(address));
        }

        session.commit().await?;
        metrics::record_entity_writes("address", "delete", result.len());

        Ok(result)
    }

    async fn get_addresses(&self, customer_id: i64) -> Result<Vec<AddressResponse>, AddressError> {
        let mut session = self.db.acquire().await?;
        session
            .customers()
            .find_by_id(customer_id)
            .await?
            .ok_or(AddressError::CustomerNotFound(customer_id))?;

        let addresses = session.addresses().find_by_customer_id(customer_id).await?;
        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }
}

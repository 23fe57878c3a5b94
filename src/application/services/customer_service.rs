//! Customer Service
//!
//! Customer registration, partial profile updates and removal. Every batch
//! runs in a single transaction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::application::dto::{
    CustomerCreateRequest, CustomerCreateResponse, CustomerDeleteResponse, CustomerResponse,
    CustomerUpdateRequest, CustomerUpdateResponse,
};
use crate::domain::{Account, Customer, Session, UnitOfWork};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::require_non_empty;

/// Customer service trait.
#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn create_customer(
        &self,
        requests: Vec<CustomerCreateRequest>,
    ) -> Result<Vec<CustomerCreateResponse>, CustomerError>;

    async fn update_customer(
        &self,
        requests: Vec<CustomerUpdateRequest>,
    ) -> Result<Vec<CustomerUpdateResponse>, CustomerError>;

    /// Delete customers together with their addresses.
    async fn delete_customer(
        &self,
        ids: Vec<i64>,
    ) -> Result<Vec<CustomerDeleteResponse>, CustomerError>;

    async fn get_customer(&self, id: i64) -> Result<CustomerResponse, CustomerError>;
}

/// Customer service errors.
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Customer with id {0} does not exist")]
    NotFound(i64),

    #[error("Customer with username {0} already exists")]
    UsernameTaken(String),

    #[error("{0}")]
    InvalidField(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => AppError::NotFound(err.to_string()),
            CustomerError::UsernameTaken(_) => AppError::Conflict(err.to_string()),
            CustomerError::InvalidField(msg) => AppError::BadRequest(msg),
            CustomerError::Repository(e) => e,
        }
    }
}

/// CustomerService implementation over a unit of work.
pub struct CustomerServiceImpl {
    db: Arc<dyn UnitOfWork>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl CustomerServiceImpl {
    pub fn new(db: Arc<dyn UnitOfWork>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self { db, id_generator }
    }

    fn non_empty(value: &str, label: &str) -> Result<(), CustomerError> {
        require_non_empty(Some(value), label).map_err(CustomerError::InvalidField)
    }

    /// Fail if `username` belongs to a customer other than `owner`.
    async fn ensure_username_free(
        session: &mut Box<dyn Session>,
        username: &str,
        owner: Option<i64>,
    ) -> Result<(), CustomerError> {
        match session.customers().find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(CustomerError::UsernameTaken(username.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    async fn create_customer(
        &self,
        requests: Vec<CustomerCreateRequest>,
    ) -> Result<Vec<CustomerCreateResponse>, CustomerError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(requests.len());

        for request in requests {
            let account = request.account_info;
            Self::non_empty(&account.username, "Username")?;
            Self::non_empty(&account.email, "Email")?;
            Self::non_empty(&request.first_name, "First name")?;
            Self::non_empty(&request.last_name, "Last name")?;
            Self::ensure_username_free(&mut session, &account.username, None).await?;

            let customer = Customer {
                id: self.id_generator.generate(),
                account: Account {
                    username: account.username,
                    email: account.email,
                    contact_number: account.contact_number,
                },
                first_name: request.first_name,
                last_name: request.last_name,
                created: Utc::now(),
                updated: None,
            };
            let customer = session.customers().save(&customer).await?;
            debug!(customer_id = customer.id, "Customer created: {}", customer.full_name());

            result.push(CustomerCreateResponse::from(customer));
        }

        session.commit().await?;
        metrics::record_entity_writes("customer", "create", result.len());

        Ok(result)
    }

    async fn update_customer(
        &self,
        requests: Vec<CustomerUpdateRequest>,
    ) -> Result<Vec<CustomerUpdateResponse>, CustomerError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(requests.len());

        for request in requests {
            let mut customer = session
                .customers()
                .find_by_id(request.id)
                .await?
                .ok_or(CustomerError::NotFound(request.id))?;

            if let Some(account) = request.account_info {
                if let Some(username) = account.username {
                    Self::non_empty(&username, "Username")?;
                    Self::ensure_username_free(&mut session, &username, Some(customer.id))
                        .await?;
                    customer.account.username = username;
                }
                if let Some(email) = account.email {
                    Self::non_empty(&email, "Email")?;
                    customer.account.email = email;
                }
                if let Some(contact_number) = account.contact_number {
                    Self::non_empty(&contact_number, "Contact number")?;
                    customer.account.contact_number = Some(contact_number);
                }
            }

            if let Some(first_name) = request.first_name {
                Self::non_empty(&first_name, "First name")?;
                customer.first_name = first_name;
            }

            if let Some(last_name) = request.last_name {
                Self::non_empty(&last_name, "Last name")?;
                customer.last_name = last_name;
            }

            customer.updated = Some(Utc::now());
            let customer = session.customers().save(&customer).await?;
            debug!(customer_id = customer.id, "Customer updated");

            result.push(CustomerUpdateResponse::from(customer));
        }

        session.commit().await?;
        metrics::record_entity_writes("customer", "update", result.len());

        Ok(result)
    }

    async fn delete_customer(
        &self,
        ids: Vec<i64>,
    ) -> Result<Vec<CustomerDeleteResponse>, CustomerError> {
        let mut session = self.db.begin().await?;
        let mut result = Vec::with_capacity(ids.len());

        for id in ids {
            let customer = session
                .customers()
                .find_by_id(id)
                .await?
                .ok_or(CustomerError::NotFound(id))?;

            session.customers().delete(&customer).await?;
            debug!(customer_id = customer.id, "Customer deleted");

            result.push(CustomerDeleteResponse::from(customer));
        }

        session.commit().await?;
        metrics::record_entity_writes("customer", "delete", result.len());

        Ok(result)
    }

    async fn get_customer(&self, id: i64) -> Result<CustomerResponse, CustomerError> {
        let mut session = self.db.acquire().await?;
        let customer = session
            .customers()
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        Ok(CustomerResponse::from(customer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{AccountCreateRequest, AccountUpdateRequest};
    use crate::infrastructure::memory::MemoryUnitOfWork;

    fn service() -> CustomerServiceImpl {
        CustomerServiceImpl::new(
            Arc::new(MemoryUnitOfWork::new()),
            Arc::new(SnowflakeGenerator::default()),
        )
    }

    fn create_request(username: &str) -> CustomerCreateRequest {
        CustomerCreateRequest {
            account_info: AccountCreateRequest {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                contact_number: None,
            },
            first_name: "Nirvan".into(),
            last_name: "Silva".into(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_customer() {
        let service = service();

        let created = service
            .create_customer(vec![create_request("nirvan")])
            .await
            .unwrap();
        let fetched = service.get_customer(created[0].id).await.unwrap();

        assert_eq!(fetched, created[0]);
        assert_eq!(fetched.username, "nirvan");
        assert!(fetched.updated.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_username_conflicts() {
        let service = service();
        service
            .create_customer(vec![create_request("nirvan")])
            .await
            .unwrap();

        let err = service
            .create_customer(vec![create_request("nirvan")])
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::UsernameTaken(_)));
        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_duplicate_within_batch_rolls_back() {
        let service = service();

        let err = service
            .create_customer(vec![create_request("twin"), create_request("twin")])
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::UsernameTaken(_)));

        // The first "twin" was rolled back, so the name is still free
        assert!(service
            .create_customer(vec![create_request("twin")])
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_customer_partial() {
        let service = service();
        let created = service
            .create_customer(vec![create_request("nirvan")])
            .await
            .unwrap();

        let updated = service
            .update_customer(vec![CustomerUpdateRequest {
                id: created[0].id,
                account_info: Some(AccountUpdateRequest {
                    contact_number: Some("+94 77 123 4567".into()),
                    ..Default::default()
                }),
                last_name: Some("Perera".into()),
                ..Default::default()
            }])
            .await
            .unwrap();

        assert_eq!(updated[0].first_name, "Nirvan");
        assert_eq!(updated[0].last_name, "Perera");
        assert_eq!(updated[0].username, "nirvan");
        assert_eq!(updated[0].contact_number.as_deref(), Some("+94 77 123 4567"));
        assert!(updated[0].updated.is_some());
    }

    #[tokio::test]
    async fn test_update_keeping_own_username_is_allowed() {
        let service = service();
        let created = service
            .create_customer(vec![create_request("nirvan")])
            .await
            .unwrap();

        let result = service
            .update_customer(vec![CustomerUpdateRequest {
                id: created[0].id,
                account_info: Some(AccountUpdateRequest {
                    username: Some("nirvan".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }])
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_taken_username_conflicts() {
        let service = service();
        let created = service
            .create_customer(vec![create_request("first"), create_request("second")])
            .await
            .unwrap();

        let err = service
            .update_customer(vec![CustomerUpdateRequest {
                id: created[1].id,
                account_info: Some(AccountUpdateRequest {
                    username: Some("first".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }])
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::UsernameTaken(name) if name == "first"));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_first_name() {
        let service = service();
        let created = service
            .create_customer(vec![create_request("nirvan")])
            .await
            .unwrap();

        let err = service
            .update_customer(vec![CustomerUpdateRequest {
                id: created[0].id,
                first_name: Some(String::new()),
                ..Default::default()
            }])
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::InvalidField(m) if m == "First name cannot be empty"));
    }

    #[tokio::test]
    async fn test_delete_customer_then_get_fails() {
        let service = service();
        let created = service
            .create_customer(vec![create_request("nirvan")])
            .await
            .unwrap();

        service
            .delete_customer(vec![created[0].id])
            .await
            .unwrap();

        let err = service.get_customer(created[0].id).await.unwrap_err();
        assert!(matches!(err, CustomerError::NotFound(_)));
    }
}

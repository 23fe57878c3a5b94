//! Unit of Work
//!
//! Data access contracts that group repository operations into one
//! session. A transactional session makes its writes visible only on
//! [`Session::commit`]; dropping it without committing rolls back.

use async_trait::async_trait;

use crate::domain::entities::{AddressRepository, CustomerRepository, DishRepository};
use crate::shared::error::AppError;

/// A database session exposing the entity repositories.
#[async_trait]
pub trait Session: Send {
    /// Dish repository bound to this session.
    fn dishes(&mut self) -> &mut dyn DishRepository;

    /// Customer repository bound to this session.
    fn customers(&mut self) -> &mut dyn CustomerRepository;

    /// Address repository bound to this session.
    fn addresses(&mut self) -> &mut dyn AddressRepository;

    /// Commit pending writes. A no-op for autocommit sessions.
    ///
    /// The session must not be used afterwards.
    async fn commit(&mut self) -> Result<(), AppError>;
}

/// Source of database sessions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Open a transactional session.
    async fn begin(&self) -> Result<Box<dyn Session>, AppError>;

    /// Open an autocommit session where every write is applied immediately.
    async fn acquire(&self) -> Result<Box<dyn Session>, AppError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

//! Unit of Work Pattern Implementation
//!
//! PostgreSQL sessions backing the domain [`UnitOfWork`] contract.
//! A transactional session wraps a SQLx transaction; an autocommit session
//! wraps a pooled connection.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::domain::entities::{AddressRepository, CustomerRepository, DishRepository};
use crate::domain::unit_of_work::{Session, UnitOfWork};
use crate::shared::error::AppError;

enum Scope {
    Transaction(Option<Transaction<'static, Postgres>>),
    Autocommit(PoolConnection<Postgres>),
}

/// A PostgreSQL session. Repository implementations for the session live in
/// `infrastructure::repositories`.
pub struct PgSession {
    scope: Scope,
}

impl PgSession {
    /// Wrap an open transaction.
    pub fn transactional(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            scope: Scope::Transaction(Some(tx)),
        }
    }

    /// Wrap a pooled connection in autocommit mode.
    pub fn autocommit(conn: PoolConnection<Postgres>) -> Self {
        Self {
            scope: Scope::Autocommit(conn),
        }
    }

    /// Connection that queries of this session run on.
    pub(crate) fn connection(&mut self) -> Result<&mut PgConnection, AppError> {
        match &mut self.scope {
            Scope::Transaction(Some(tx)) => Ok(&mut **tx),
            Scope::Transaction(None) => {
                Err(AppError::Internal("session used after commit".into()))
            }
            Scope::Autocommit(conn) => Ok(&mut **conn),
        }
    }
}

#[async_trait]
impl Session for PgSession {
    fn dishes(&mut self) -> &mut dyn DishRepository {
        self
    }

    fn customers(&mut self) -> &mut dyn CustomerRepository {
        self
    }

    fn addresses(&mut self) -> &mut dyn AddressRepository {
        self
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        match &mut self.scope {
            Scope::Transaction(tx) => match tx.take() {
                Some(tx) => tx.commit().await.map_err(AppError::Database),
                None => Err(AppError::Internal("session already committed".into())),
            },
            Scope::Autocommit(_) => Ok(()),
        }
    }
}

/// PostgreSQL Unit of Work implementation.
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create from a PgPool directly.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn Session>, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(Box::new(PgSession::transactional(tx)))
    }

    async fn acquire(&self) -> Result<Box<dyn Session>, AppError> {
        let conn = self.pool.acquire().await.map_err(AppError::Database)?;
        Ok(Box::new(PgSession::autocommit(conn)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

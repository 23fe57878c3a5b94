//! Customer Repository Implementation
//!
//! PostgreSQL implementation of the CustomerRepository trait.
//! Account fields are stored as flat columns on the customers table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Account, Customer, CustomerRepository};
use crate::infrastructure::database::PgSession;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    username: String,
    email: String,
    contact_number: Option<String>,
    first_name: String,
    last_name: String,
    created: DateTime<Utc>,
    updated: Option<DateTime<Utc>>,
}

impl CustomerRow {
    fn into_customer(self) -> Customer {
        Customer {
            id: self.id,
            account: Account {
                username: self.username,
                email: self.email,
                contact_number: self.contact_number,
            },
            first_name: self.first_name,
            last_name: self.last_name,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait]
impl CustomerRepository for PgSession {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, username, email, contact_number, first_name, last_name, created, updated
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.connection()?)
        .await?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn find_by_username(&mut self, username: &str) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, username, email, contact_number, first_name, last_name, created, updated
            FROM customers
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.connection()?)
        .await?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn save(&mut self, customer: &Customer) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers
                (id, username, email, contact_number, first_name, last_name, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET username = EXCLUDED.username,
                email = EXCLUDED.email,
                contact_number = EXCLUDED.contact_number,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                updated = EXCLUDED.updated
            RETURNING id, username, email, contact_number, first_name, last_name, created, updated
            "#,
        )
        .bind(customer.id)
        .bind(&customer.account.username)
        .bind(&customer.account.email)
        .bind(&customer.account.contact_number)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.created)
        .bind(customer.updated)
        .fetch_one(self.connection()?)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
                format!(
                    "Customer with username {} already exists",
                    customer.account.username
                ),
            ),
            _ => AppError::Database(e),
        })?;

        Ok(row.into_customer())
    }

    /// Addresses are removed by `ON DELETE CASCADE`.
    async fn delete(&mut self, customer: &Customer) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer.id)
            .execute(self.connection()?)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Customer with id {} does not exist",
                customer.id
            )));
        }

        Ok(())
    }
}

//! Address Repository Implementation
//!
//! PostgreSQL implementation of the AddressRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Address, AddressRepository};
use crate::infrastructure::database::PgSession;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i64,
    customer_id: i64,
    province: String,
    city: String,
    street_name: String,
    building_number: String,
    created: DateTime<Utc>,
    updated: Option<DateTime<Utc>>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            province: row.province,
            city: row.city,
            street_name: row.street_name,
            building_number: row.building_number,
            created: row.created,
            updated: row.updated,
        }
    }
}

#[async_trait]
impl AddressRepository for PgSession {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Address>, AppError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, province, city, street_name, building_number, created, updated
            FROM addresses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.connection()?)
        .await?;

        Ok(row.map(Address::from))
    }

    async fn find_by_customer_id(&mut self, customer_id: i64) -> Result<Vec<Address>, AppError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, province, city, street_name, building_number, created, updated
            FROM addresses
            WHERE customer_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.connection()?)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn save(&mut self, address: &Address) -> Result<Address, AppError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            INSERT INTO addresses
                (id, customer_id, province, city, street_name, building_number, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET province = EXCLUDED.province,
                city = EXCLUDED.city,
                street_name = EXCLUDED.street_name,
                building_number = EXCLUDED.building_number,
                updated = EXCLUDED.updated
            RETURNING id, customer_id, province, city, street_name, building_number, created, updated
            "#,
        )
        .bind(address.id)
        .bind(address.customer_id)
        .bind(&address.province)
        .bind(&address.city)
        .bind(&address.street_name)
        .bind(&address.building_number)
        .bind(address.created)
        .bind(address.updated)
        .fetch_one(self.connection()?)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!(
                    "Customer with id {} does not exist",
                    address.customer_id
                ))
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into())
    }

    async fn delete(&mut self, address: &Address) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(address.id)
            .execute(self.connection()?)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Address with id {} does not exist",
                address.id
            )));
        }

        Ok(())
    }
}

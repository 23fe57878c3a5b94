//! Dish Repository Implementation
//!
//! PostgreSQL implementation of the DishRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Dish, DishRepository};
use crate::infrastructure::database::PgSession;
use crate::shared::error::AppError;

/// Database row representation matching the dishes table schema.
#[derive(Debug, sqlx::FromRow)]
struct DishRow {
    id: i64,
    name: String,
    description: String,
    created: DateTime<Utc>,
    created_by: Option<i64>,
    updated: Option<DateTime<Utc>>,
    updated_by: Option<i64>,
}

impl DishRow {
    /// Convert database row to domain Dish entity.
    fn into_dish(self) -> Dish {
        Dish {
            id: self.id,
            name: self.name,
            description: self.description,
            created: self.created,
            created_by: self.created_by,
            updated: self.updated,
            updated_by: self.updated_by,
        }
    }
}

#[async_trait]
impl DishRepository for PgSession {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Dish>, AppError> {
        let row = sqlx::query_as::<_, DishRow>(
            r#"
            SELECT id, name, description, created, created_by, updated, updated_by
            FROM dishes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.connection()?)
        .await?;

        Ok(row.map(DishRow::into_dish))
    }

    async fn save(&mut self, dish: &Dish) -> Result<Dish, AppError> {
        let row = sqlx::query_as::<_, DishRow>(
            r#"
            INSERT INTO dishes (id, name, description, created, created_by, updated, updated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                updated = EXCLUDED.updated,
                updated_by = EXCLUDED.updated_by
            RETURNING id, name, description, created, created_by, updated, updated_by
            "#,
        )
        .bind(dish.id)
        .bind(&dish.name)
        .bind(&dish.description)
        .bind(dish.created)
        .bind(dish.created_by)
        .bind(dish.updated)
        .bind(dish.updated_by)
        .fetch_one(self.connection()?)
        .await?;

        Ok(row.into_dish())
    }

    async fn delete(&mut self, dish: &Dish) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(dish.id)
            .execute(self.connection()?)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Dish with id {} does not exist",
                dish.id
            )));
        }

        Ok(())
    }
}

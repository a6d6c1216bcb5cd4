use chrono::{DateTime, Utc};
use cinema_shared::dto::{CreateSnackItemRequest, SnackItemResponse, UpdateSnackItemRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

/// Concession-stand stock. `quantity_available` is advisory only; nothing
/// decrements it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SnackItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity_available: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SnackItem {
    pub async fn create(pool: &PgPool, request: &CreateSnackItemRequest) -> Result<Self, AppError> {
        let snack = sqlx::query_as::<_, SnackItem>(
            r#"
            INSERT INTO snack_items (name, description, price, quantity_available)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, quantity_available, created_at, updated_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.quantity_available)
        .fetch_one(pool)
        .await?;

        Ok(snack)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let snack = sqlx::query_as::<_, SnackItem>(
            r#"
            SELECT id, name, description, price, quantity_available, created_at, updated_at
            FROM snack_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(snack)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let snacks = sqlx::query_as::<_, SnackItem>(
            r#"
            SELECT id, name, description, price, quantity_available, created_at, updated_at
            FROM snack_items
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(snacks)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        request: &UpdateSnackItemRequest,
    ) -> Result<Option<Self>, AppError> {
        let snack = sqlx::query_as::<_, SnackItem>(
            r#"
            UPDATE snack_items
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                quantity_available = COALESCE($4, quantity_available),
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, description, price, quantity_available, created_at, updated_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.quantity_available)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(snack)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM snack_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> SnackItemResponse {
        SnackItemResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity_available: self.quantity_available,
        }
    }
}

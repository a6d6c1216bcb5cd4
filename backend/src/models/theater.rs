use chrono::{DateTime, Utc};
use cinema_shared::dto::{CreateTheaterRequest, TheaterResponse, UpdateTheaterRequest};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Theater {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Theater {
    pub async fn create(pool: &PgPool, request: &CreateTheaterRequest) -> Result<Self, AppError> {
        let theater = sqlx::query_as::<_, Theater>(
            r#"
            INSERT INTO theaters (name, capacity)
            VALUES ($1, $2)
            RETURNING id, name, capacity, created_at, updated_at
            "#,
        )
        .bind(&request.name)
        .bind(request.capacity)
        .fetch_one(pool)
        .await?;

        Ok(theater)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let theater = sqlx::query_as::<_, Theater>(
            "SELECT id, name, capacity, created_at, updated_at FROM theaters WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(theater)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let theaters = sqlx::query_as::<_, Theater>(
            "SELECT id, name, capacity, created_at, updated_at FROM theaters",
        )
        .fetch_all(pool)
        .await?;

        Ok(theaters)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        request: &UpdateTheaterRequest,
    ) -> Result<Option<Self>, AppError> {
        let theater = sqlx::query_as::<_, Theater>(
            r#"
            UPDATE theaters
            SET name = COALESCE($1, name),
                capacity = COALESCE($2, capacity),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, capacity, created_at, updated_at
            "#,
        )
        .bind(&request.name)
        .bind(request.capacity)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(theater)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM theaters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> TheaterResponse {
        TheaterResponse {
            id: self.id,
            name: self.name.clone(),
            capacity: self.capacity,
        }
    }
}

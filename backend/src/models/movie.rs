use chrono::{DateTime, Utc};
use cinema_shared::dto::{CreateMovieRequest, MovieResponse, UpdateMovieRequest};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Minutes.
    pub duration: i32,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    /// Create a new movie
    pub async fn create(pool: &PgPool, request: &CreateMovieRequest) -> Result<Self, AppError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title, description, duration, poster_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, duration, poster_url, created_at, updated_at
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.duration)
        .bind(&request.poster_url)
        .fetch_one(pool)
        .await?;

        Ok(movie)
    }

    /// Find movie by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, description, duration, poster_url, created_at, updated_at
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(movie)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, description, duration, poster_url, created_at, updated_at
            FROM movies
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(movies)
    }

    /// Partial update; absent fields keep their stored values.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        request: &UpdateMovieRequest,
    ) -> Result<Option<Self>, AppError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                duration = COALESCE($3, duration),
                poster_url = COALESCE($4, poster_url),
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, title, description, duration, poster_url, created_at, updated_at
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.duration)
        .bind(&request.poster_url)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(movie)
    }

    /// Delete a movie. Showings and their bookings go with it.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> MovieResponse {
        MovieResponse {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            duration: self.duration,
            poster_url: self.poster_url.clone(),
        }
    }
}

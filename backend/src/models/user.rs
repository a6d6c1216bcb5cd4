use chrono::{DateTime, Utc};
use cinema_shared::dto::{CreateUserRequest, UserResponse};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Cinema staff flag; gates snack inventory writes.
    pub is_staff_member: bool,
    /// Native admin flags; gate everything else. Kept distinct from
    /// `is_staff_member` on purpose.
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user. `is_staff` is decided by the caller: admin
    /// creation leaves it off, self-service signup mirrors
    /// `is_staff_member`.
    pub async fn create(
        pool: &PgPool,
        request: &CreateUserRequest,
        password_hash: String,
        is_staff: bool,
    ) -> Result<Self, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, is_staff_member, is_staff)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, is_staff_member, is_staff, is_superuser,
                      created_at, updated_at
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(request.is_staff_member)
        .bind(is_staff)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Self>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_staff_member, is_staff, is_superuser,
                   created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_staff_member, is_staff, is_superuser,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_staff_member, is_staff, is_superuser,
                   created_at, updated_at
            FROM users
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Check if a username is already taken. Uniqueness is also backed by
    /// an index; the pre-check exists to return a clean validation error.
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            is_staff_member: self.is_staff_member,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            created_at: self.created_at,
        }
    }
}

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::users::repo_types::{User, UserFields};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("user {0} not found")]
    NotFound(i64),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Persistence operations for users. Each call issues exactly one statement.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a user by id; a missing row is `RepoError::NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<User, RepoError>;
    /// All users in whatever order the engine returns them.
    async fn get_all(&self) -> Result<Vec<User>, RepoError>;
    /// Insert a user and return the id assigned by the database.
    async fn create(&self, fields: &UserFields) -> Result<i64, RepoError>;
    /// Overwrite every mutable column of user `id`.
    async fn update(&self, id: i64, fields: &UserFields) -> Result<i64, RepoError>;
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: i64) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, phone, COALESCE(is_hidden, FALSE) AS is_hidden, rating, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(RepoError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, phone, COALESCE(is_hidden, FALSE) AS is_hidden, rating, created_at
            FROM users
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn create(&self, fields: &UserFields) -> Result<i64, RepoError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, age, phone, is_hidden, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(fields.age)
        .bind(&fields.phone)
        .bind(fields.is_hidden)
        .bind(fields.rating)
        .fetch_one(&self.db)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: &UserFields) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE users
            SET name = $1, age = $2, phone = $3, is_hidden = $4, rating = $5
            WHERE id = $6
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(fields.age)
        .bind(&fields.phone)
        .bind(fields.is_hidden)
        .bind(fields.rating)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(RepoError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

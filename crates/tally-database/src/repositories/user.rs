//! PostgreSQL-backed user credential repository.

use async_trait::async_trait;
use sqlx::PgPool;

use tally_core::error::{AppError, ErrorKind};
use tally_core::result::AppResult;
use tally_core::traits::{AccountStore, CredentialStore};
use tally_core::types::{Credential, normalize_email};

/// Row shape for credential queries.
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    email: String,
    password_hash: String,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Credential::new(&row.email, row.password_hash)
    }
}

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>> {
        sqlx::query_as::<_, CredentialRow>(
            "SELECT email, password_hash FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Credential::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }
}

#[async_trait]
impl AccountStore for UserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<Credential> {
        sqlx::query_as::<_, CredentialRow>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) \
             RETURNING email, password_hash",
        )
        .bind(normalize_email(email))
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map(Credential::from)
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::validation("Email already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() \
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(normalize_email(email))
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }
}

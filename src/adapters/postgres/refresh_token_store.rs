//! PostgreSQL implementation of RefreshTokenStore.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{column, timestamp};
use crate::domain::auth::RefreshTokenRecord;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::RefreshTokenStore;

#[derive(Clone)]
pub struct PostgresRefreshTokenStore {
    pool: PgPool,
}

impl PostgresRefreshTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PostgresRefreshTokenStore {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token_digest, user_id, expires_at, revoked)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.token_digest)
        .bind(record.user_id.as_uuid())
        .bind(record.expires_at.as_datetime())
        .bind(record.revoked)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to store refresh token", e))?;

        Ok(())
    }

    async fn find(&self, token_digest: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT token_digest, user_id, expires_at, revoked
            FROM refresh_tokens
            WHERE token_digest = $1
            "#,
        )
        .bind(token_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch refresh token", e))?;

        row.map(|r| {
            Ok(RefreshTokenRecord {
                token_digest: column(&r, "token_digest")?,
                user_id: UserId::from_uuid(column(&r, "user_id")?),
                expires_at: timestamp(&r, "expires_at")?,
                revoked: column(&r, "revoked")?,
            })
        })
        .transpose()
    }

    async fn revoke(&self, token_digest: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE token_digest = $1 AND NOT revoked",
        )
        .bind(token_digest)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to revoke refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_inactive(&self, now: Timestamp) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE revoked OR expires_at <= $1")
            .bind(now.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to purge refresh tokens", e))?;

        Ok(result.rows_affected())
    }
}

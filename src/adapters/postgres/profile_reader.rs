//! PostgreSQL implementation of ProfileReader.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, profile_counts, timestamp, PROFILE_COUNTS_SQL};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Username;
use crate::ports::{ProfileReader, ProfileView, SuggestedUser};

#[derive(Clone)]
pub struct PostgresProfileReader {
    pool: PgPool,
}

impl PostgresProfileReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn profile_sql(filter: &str) -> String {
        format!(
            r#"
            SELECT u.id, u.name, u.username, u.bio, u.image, u.location, u.website,
                   u.created_at, {}
            FROM users u
            WHERE {}
            "#,
            PROFILE_COUNTS_SQL, filter
        )
    }
}

#[async_trait]
impl ProfileReader for PostgresProfileReader {
    async fn by_username(&self, username: &Username) -> Result<Option<ProfileView>, DomainError> {
        let row = sqlx::query(&Self::profile_sql("u.username = $1"))
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch profile", e))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    async fn by_id(&self, id: &UserId) -> Result<Option<ProfileView>, DomainError> {
        let row = sqlx::query(&Self::profile_sql("u.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch profile", e))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    async fn suggestions(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<SuggestedUser>, DomainError> {
        let sql = format!(
            r#"
            SELECT u.id, u.name, u.username, u.image, {}
            FROM users u
            WHERE u.id <> $1
              AND NOT EXISTS (
                  SELECT 1 FROM follows f
                  WHERE f.follower_id = $1 AND f.following_id = u.id
              )
            ORDER BY u.created_at DESC, u.id DESC
            LIMIT $2
            "#,
            PROFILE_COUNTS_SQL
        );

        let rows = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch suggestions", e))?;

        rows.iter()
            .map(|row| {
                Ok(SuggestedUser {
                    id: UserId::from_uuid(column(row, "id")?),
                    name: column(row, "name")?,
                    username: column(row, "username")?,
                    image: column(row, "image")?,
                    counts: profile_counts(row)?,
                })
            })
            .collect()
    }
}

fn row_to_profile(row: &PgRow) -> Result<ProfileView, DomainError> {
    Ok(ProfileView {
        id: UserId::from_uuid(column(row, "id")?),
        name: column(row, "name")?,
        username: column(row, "username")?,
        bio: column(row, "bio")?,
        image: column(row, "image")?,
        location: column(row, "location")?,
        website: column(row, "website")?,
        created_at: timestamp(row, "created_at")?,
        counts: profile_counts(row)?,
    })
}

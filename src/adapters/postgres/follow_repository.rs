//! PostgreSQL implementation of FollowRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::social::Follow;
use crate::ports::FollowRepository;

#[derive(Clone)]
pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn toggle(&self, follow: &Follow) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        // A follower's toggles are serialized by this row lock.
        let locked = sqlx::query("SELECT 1 FROM users WHERE id = $1 FOR NO KEY UPDATE")
            .bind(follow.follower_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock follower", e))?;
        if locked.is_none() {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", follow.follower_id),
            ));
        }

        let removed =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follow.follower_id.as_uuid())
                .bind(follow.following_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to remove follow", e))?
                .rows_affected();

        let following = removed == 0;
        if following {
            sqlx::query(
                r#"
                INSERT INTO follows (follower_id, following_id, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(follow.follower_id.as_uuid())
            .bind(follow.following_id.as_uuid())
            .bind(follow.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to add follow", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit follow", e))?;

        Ok(following)
    }

    async fn is_following(
        &self,
        follower_id: &UserId,
        following_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id.as_uuid())
        .bind(following_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to check follow", e))?;

        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::postgres::test_db;

    #[tokio::test]
    #[ignore = "Requires live PostgreSQL"]
    async fn concurrent_follow_toggles_alternate() {
        let pool = test_db::pool().await;
        let ada = test_db::seed_user(&pool).await;
        let bob = test_db::seed_user(&pool).await;
        let repo = PostgresFollowRepository::new(pool);
        let follow = Follow::new(ada.id(), bob.id()).unwrap();

        let (a, b, c, d) = tokio::join!(
            repo.toggle(&follow),
            repo.toggle(&follow),
            repo.toggle(&follow),
            repo.toggle(&follow),
        );
        let outcomes = [a.unwrap(), b.unwrap(), c.unwrap(), d.unwrap()];

        assert_eq!(outcomes.iter().filter(|f| **f).count(), 2);
        assert!(!repo.is_following(&ada.id(), &bob.id()).await.unwrap());
    }
}

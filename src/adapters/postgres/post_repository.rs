//! PostgreSQL implementation of PostRepository.
//!
//! Likes, comments and notifications referencing a post are removed by
//! `ON DELETE CASCADE` foreign keys.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, ImageUrl, PostId, UserId};
use crate::domain::post::{Comment, Like, Post};
use crate::ports::{LikeToggle, PostRepository};

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, content, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id().as_uuid())
        .bind(post.author_id().as_uuid())
        .bind(post.content())
        .bind(post.image().map(ImageUrl::as_str))
        .bind(post.created_at().as_datetime())
        .bind(post.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert post", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, author_id, content, image, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch post", e))?;

        row.map(|r| row_to_post(&r)).transpose()
    }

    async fn delete(&self, id: &PostId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete post", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PostNotFound,
                format!("Post not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn toggle_like(&self, like: &Like) -> Result<LikeToggle, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        // Toggles on one post are serialized by this row lock.
        let locked = sqlx::query("SELECT 1 FROM posts WHERE id = $1 FOR NO KEY UPDATE")
            .bind(like.post_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock post", e))?;
        if locked.is_none() {
            return Err(DomainError::new(
                ErrorCode::PostNotFound,
                format!("Post not found: {}", like.post_id),
            ));
        }

        let removed = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(like.user_id.as_uuid())
            .bind(like.post_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to remove like", e))?
            .rows_affected();

        let liked = removed == 0;
        if liked {
            sqlx::query(
                r#"
                INSERT INTO likes (user_id, post_id, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(like.user_id.as_uuid())
            .bind(like.post_id.as_uuid())
            .bind(like.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to add like", e))?;
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(like.post_id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to count likes", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit like", e))?;

        Ok(LikeToggle {
            liked,
            like_count: count as u64,
        })
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id().as_uuid())
        .bind(comment.post_id().as_uuid())
        .bind(comment.author_id().as_uuid())
        .bind(comment.content())
        .bind(comment.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert comment", e))?;

        Ok(())
    }
}

fn row_to_post(row: &PgRow) -> Result<Post, DomainError> {
    let image: Option<String> = column(row, "image")?;

    Ok(Post::reconstitute(
        PostId::from_uuid(column(row, "id")?),
        UserId::from_uuid(column(row, "author_id")?),
        column(row, "content")?,
        image.map(ImageUrl::from_trusted),
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::postgres::test_db;
    use crate::domain::foundation::PostId;

    #[tokio::test]
    #[ignore = "Requires live PostgreSQL"]
    async fn concurrent_like_toggles_alternate() {
        let pool = test_db::pool().await;
        let author = test_db::seed_user(&pool).await;
        let liker = test_db::seed_user(&pool).await;
        let repo = PostgresPostRepository::new(pool);
        let post = Post::new(PostId::new(), author.id(), Some("hello"), None).unwrap();
        repo.insert(&post).await.unwrap();

        let like = Like::new(liker.id(), post.id());
        let (a, b, c, d) = tokio::join!(
            repo.toggle_like(&like),
            repo.toggle_like(&like),
            repo.toggle_like(&like),
            repo.toggle_like(&like),
        );
        let outcomes = [a.unwrap(), b.unwrap(), c.unwrap(), d.unwrap()];

        assert_eq!(outcomes.iter().filter(|t| t.liked).count(), 2);
        let settled = repo.toggle_like(&like).await.unwrap();
        assert_eq!(settled, LikeToggle { liked: true, like_count: 1 });
    }

    #[tokio::test]
    #[ignore = "Requires live PostgreSQL"]
    async fn toggling_a_deleted_post_is_not_found() {
        let pool = test_db::pool().await;
        let liker = test_db::seed_user(&pool).await;
        let repo = PostgresPostRepository::new(pool);

        let err = repo
            .toggle_like(&Like::new(liker.id(), PostId::new()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::PostNotFound);
    }
}

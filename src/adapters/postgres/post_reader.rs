//! PostgreSQL implementation of PostReader.
//!
//! A page is loaded with three queries: the posts with their authors, then
//! the comments and likes for exactly those posts.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::{column, timestamp, user_summary};
use crate::domain::foundation::{CommentId, DomainError, PostId, UserId};
use crate::ports::{CommentView, PageRequest, PostReader, PostView};

const POST_SELECT: &str = r#"
    SELECT p.id, p.content, p.image, p.created_at,
           a.id AS author_id, a.name AS author_name,
           a.username AS author_username, a.image AS author_image
    FROM posts p
    JOIN users a ON a.id = p.author_id
"#;

#[derive(Clone)]
pub struct PostgresPostReader {
    pool: PgPool,
}

impl PostgresPostReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs a post query whose first bind (if any) is `arg`, then attaches
    /// comments and likes.
    async fn load(
        &self,
        sql: &str,
        arg: Option<Uuid>,
        page: Option<&PageRequest>,
    ) -> Result<Vec<PostView>, DomainError> {
        let mut query = sqlx::query(sql);
        if let Some(arg) = arg {
            query = query.bind(arg);
        }
        if let Some(page) = page {
            query = query.bind(page.limit as i64).bind(page.offset as i64);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch posts", e))?;

        let mut posts = rows
            .iter()
            .map(|row| {
                Ok(PostView {
                    id: PostId::from_uuid(column(row, "id")?),
                    author: user_summary(row, "author")?,
                    content: column(row, "content")?,
                    image: column(row, "image")?,
                    created_at: timestamp(row, "created_at")?,
                    comments: Vec::new(),
                    liker_ids: Vec::new(),
                    like_count: 0,
                    comment_count: 0,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        if posts.is_empty() {
            return Ok(posts);
        }

        let ids: Vec<Uuid> = posts.iter().map(|p| *p.id.as_uuid()).collect();
        let mut comments = self.comments_for(&ids).await?;
        let mut likes = self.likes_for(&ids).await?;

        for post in &mut posts {
            post.comments = comments.remove(&post.id).unwrap_or_default();
            post.liker_ids = likes.remove(&post.id).unwrap_or_default();
            post.comment_count = post.comments.len() as u64;
            post.like_count = post.liker_ids.len() as u64;
        }

        Ok(posts)
    }

    async fn comments_for(
        &self,
        post_ids: &[Uuid],
    ) -> Result<HashMap<PostId, Vec<CommentView>>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.post_id, c.content, c.created_at,
                   a.id AS author_id, a.name AS author_name,
                   a.username AS author_username, a.image AS author_image
            FROM comments c
            JOIN users a ON a.id = c.author_id
            WHERE c.post_id = ANY($1)
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch comments", e))?;

        let mut by_post: HashMap<PostId, Vec<CommentView>> = HashMap::new();
        for row in &rows {
            let post_id = PostId::from_uuid(column(row, "post_id")?);
            by_post.entry(post_id).or_default().push(CommentView {
                id: CommentId::from_uuid(column(row, "id")?),
                author: user_summary(row, "author")?,
                content: column(row, "content")?,
                created_at: timestamp(row, "created_at")?,
            });
        }
        Ok(by_post)
    }

    async fn likes_for(
        &self,
        post_ids: &[Uuid],
    ) -> Result<HashMap<PostId, Vec<UserId>>, DomainError> {
        let rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT post_id, user_id
            FROM likes
            WHERE post_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch likes", e))?;

        let mut by_post: HashMap<PostId, Vec<UserId>> = HashMap::new();
        for (post_id, user_id) in rows {
            by_post
                .entry(PostId::from_uuid(post_id))
                .or_default()
                .push(UserId::from_uuid(user_id));
        }
        Ok(by_post)
    }
}

#[async_trait]
impl PostReader for PostgresPostReader {
    async fn get(&self, id: &PostId) -> Result<Option<PostView>, DomainError> {
        let sql = format!("{} WHERE p.id = $1", POST_SELECT);
        let mut posts = self.load(&sql, Some(*id.as_uuid()), None).await?;
        Ok(posts.pop())
    }

    async fn feed(&self, page: &PageRequest) -> Result<Vec<PostView>, DomainError> {
        let sql = format!(
            "{} ORDER BY p.created_at DESC, p.id DESC LIMIT $1 OFFSET $2",
            POST_SELECT
        );
        self.load(&sql, None, Some(page)).await
    }

    async fn by_author(
        &self,
        author_id: &UserId,
        page: &PageRequest,
    ) -> Result<Vec<PostView>, DomainError> {
        let sql = format!(
            "{} WHERE p.author_id = $1 ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3",
            POST_SELECT
        );
        self.load(&sql, Some(*author_id.as_uuid()), Some(page)).await
    }

    async fn liked_by(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Vec<PostView>, DomainError> {
        let sql = format!(
            "{} WHERE EXISTS (SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $1) \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3",
            POST_SELECT
        );
        self.load(&sql, Some(*user_id.as_uuid()), Some(page)).await
    }
}

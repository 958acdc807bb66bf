//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresUserRepository` / `PostgresProfileReader`
//! - `PostgresPostRepository` / `PostgresPostReader`
//! - `PostgresFollowRepository`
//! - `PostgresNotificationRepository`
//! - `PostgresRefreshTokenStore`
//!
//! All queries are runtime-checked (`sqlx::query`), so building the crate
//! needs no database. The schema lives in `migrations/`.

mod follow_repository;
mod notification_repository;
mod post_reader;
mod post_repository;
mod profile_reader;
mod refresh_token_store;
mod user_repository;

pub use follow_repository::PostgresFollowRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use post_reader::PostgresPostReader;
pub use post_repository::PostgresPostRepository;
pub use profile_reader::PostgresProfileReader;
pub use refresh_token_store::PostgresRefreshTokenStore;
pub use user_repository::PostgresUserRepository;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::social::ProfileCounts;
use crate::domain::user::UserSummary;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DomainError::database("Failed to run migrations", e))
}

// ════════════════════════════════════════════════════════════════════════════
// Row helpers
// ════════════════════════════════════════════════════════════════════════════

/// Reads a column, mapping decode failures to `DatabaseError`.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

pub(crate) fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    column::<chrono::DateTime<chrono::Utc>>(row, name).map(Timestamp::from_datetime)
}

/// Reads an author card selected as `{prefix}_id`, `{prefix}_name`,
/// `{prefix}_username`, `{prefix}_image`.
pub(crate) fn user_summary(row: &PgRow, prefix: &str) -> Result<UserSummary, DomainError> {
    Ok(UserSummary {
        id: UserId::from_uuid(column(row, &format!("{}_id", prefix))?),
        name: column(row, &format!("{}_name", prefix))?,
        username: column(row, &format!("{}_username", prefix))?,
        image: column(row, &format!("{}_image", prefix))?,
    })
}

/// Reads `follower_count`, `following_count` and `post_count`.
pub(crate) fn profile_counts(row: &PgRow) -> Result<ProfileCounts, DomainError> {
    Ok(ProfileCounts {
        followers: column::<i64>(row, "follower_count")? as u64,
        following: column::<i64>(row, "following_count")? as u64,
        posts: column::<i64>(row, "post_count")? as u64,
    })
}

/// SQL fragment producing the three profile counts for the `u` alias.
pub(crate) const PROFILE_COUNTS_SQL: &str = r#"
    (SELECT COUNT(*) FROM follows f WHERE f.following_id = u.id) AS follower_count,
    (SELECT COUNT(*) FROM follows f WHERE f.follower_id = u.id) AS following_count,
    (SELECT COUNT(*) FROM posts p WHERE p.author_id = u.id) AS post_count
"#;

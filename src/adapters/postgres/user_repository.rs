//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, timestamp};
use crate::domain::auth::EMAIL_ALREADY_EXISTS;
use crate::domain::foundation::{DomainError, ErrorCode, ImageUrl, UserId};
use crate::domain::user::{Email, User, Username};
use crate::ports::UserRepository;

const USER_COLUMNS: &str = "id, email, username, name, password_hash, bio, image, location, \
                            website, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column_name: &str, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column_name);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.map(|r| row_to_user(&r)).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, username, name, password_hash, bio, image, location,
                website, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.username().as_str())
        .bind(user.name())
        .bind(user.password_hash())
        .bind(user.bio())
        .bind(user.image().map(ImageUrl::as_str))
        .bind(user.location())
        .bind(user.website())
        .bind(user.created_at().as_datetime())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                bio = $3,
                image = $4,
                location = $5,
                website = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name())
        .bind(user.bio())
        .bind(user.image().map(ImageUrl::as_str))
        .bind(user.location())
        .bind(user.website())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.as_str()).await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        self.find_one("username", username.as_str()).await
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, DomainError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to check username", e))?;

        Ok(result.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn map_insert_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some("users_email_key") => {
                return DomainError::new(ErrorCode::EmailTaken, EMAIL_ALREADY_EXISTS)
                    .with_field_error("email", EMAIL_ALREADY_EXISTS);
            }
            Some("users_username_key") => {
                return DomainError::new(ErrorCode::UsernameTaken, "Username already taken");
            }
            _ => {}
        }
    }
    DomainError::database("Failed to insert user", err)
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let image: Option<String> = column(row, "image")?;

    Ok(User::reconstitute(
        UserId::from_uuid(column(row, "id")?),
        Email::from_trusted(column(row, "email")?),
        Username::from_trusted(column(row, "username")?),
        column(row, "name")?,
        column(row, "password_hash")?,
        column(row, "bio")?,
        image.map(ImageUrl::from_trusted),
        column(row, "location")?,
        column(row, "website")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

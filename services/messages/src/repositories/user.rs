//! User repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::user::{NewUser, User};

/// Storage operations on users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user unless one with the same email already exists.
    ///
    /// The existence check and the insert must be a single atomic step so
    /// that concurrent registrations for one email cannot both succeed.
    /// Returns `None` when the email is taken.
    async fn create_if_email_absent(&self, new_user: &NewUser) -> Result<Option<User>>;
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_if_email_absent(&self, new_user: &NewUser) -> Result<Option<User>> {
        info!("Creating new user: {}", new_user.username);

        // Relies on the users_email_key unique constraint
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

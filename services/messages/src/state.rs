//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{
    MessageRepository, PgMessageRepository, PgUserRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub message_repository: Arc<dyn MessageRepository>,
    pub user_repository: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        message_repository: Arc<dyn MessageRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            message_repository,
            user_repository,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgMessageRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
        )
    }
}

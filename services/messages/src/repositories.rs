//! Repositories for database operations
//!
//! Handlers only see the repository traits, so the PostgreSQL
//! implementations can be swapped for other stores in tests.

use sqlx::migrate::Migrator;

pub mod message;
pub mod user;

pub use message::{MessageRepository, PgMessageRepository};
pub use user::{PgUserRepository, UserRepository};

/// Embedded schema migrations for the messages service
pub static MIGRATOR: Migrator = sqlx::migrate!();

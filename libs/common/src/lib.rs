//! Common library for the message board services
//!
//! This crate provides the database plumbing shared by the services:
//! connection pool configuration, connectivity checks, migrations and the
//! database error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;

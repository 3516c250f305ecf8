//! Database module for handling PostgreSQL connections and operations
//!
//! This module provides connection pooling, configuration, migrations and
//! health checks for the PostgreSQL database backing the services.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, migrate::Migrator, postgres::PgPoolOptions};
use std::{env, time::Duration};
use tracing::{error, info};

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL connection URL (required)
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 10)
    /// - `DATABASE_MIN_CONNECTIONS`: Minimum number of connections (default: 1)
    /// - `DATABASE_CONNECTION_TIMEOUT`: Connection timeout in seconds (default: 30)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::Configuration("DATABASE_URL environment variable not set".to_string())
        })?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let min_connections = env::var("DATABASE_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let connection_timeout = env::var("DATABASE_CONNECTION_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            max_connections,
            min_connections,
            connection_timeout,
        })
    }
}

/// Initialize a PostgreSQL connection pool
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<PgPool>` - PostgreSQL connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    info!("Initializing database connection pool");

    let options = config
        .database_url
        .parse()
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Check database connectivity
///
/// # Arguments
///
/// * `pool` - PostgreSQL connection pool
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if connection is successful
pub async fn health_check(pool: &PgPool) -> DatabaseResult<bool> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database health check failed: {}", e);
            DatabaseError::Query(e)
        })?;

    Ok(true)
}

/// Apply pending migrations from the given migrator
pub async fn migrate(pool: &PgPool, migrator: &Migrator) -> DatabaseResult<()> {
    info!("Running database migrations");
    migrator.run(pool).await.map_err(DatabaseError::Migration)?;
    Ok(())
}

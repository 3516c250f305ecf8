//! Database error type shared by the services
//!
//! Only startup code sees these errors: a service that cannot configure its
//! pool, reach PostgreSQL or apply its migrations refuses to start. Request
//! handlers work through repositories and never match on [`DatabaseError`].

use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Failure while preparing the PostgreSQL connection for a service
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not open its connections
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query failed, e.g. the connectivity probe in `health_check`
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// An embedded migration failed or no longer matches the applied one
    #[error("Database migration error: {0}")]
    Migration(#[source] MigrateError),

    /// `DATABASE_URL` is missing or unparsable
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

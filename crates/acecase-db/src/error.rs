//! Error types for the subscriber store.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`], I/O, and JSON errors.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Reading or writing the subscriber file failed.
    #[error("subscriber file error: {0}")]
    Io(#[from] std::io::Error),

    /// The subscriber file is not a valid JSON list.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The address is empty after normalization.
    #[error("invalid email: {0:?}")]
    InvalidEmail(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

//! `PostgreSQL`-backed subscriber list.
//!
//! The `subscribers` table is keyed by the normalized address, so
//! `ON CONFLICT DO NOTHING` makes every insert idempotent: zero affected
//! rows means the address was already there.

use sqlx::PgPool;

use crate::error::DbError;
use crate::subscriber::{InsertOutcome, Subscriber, normalize_email};

/// Operations on the `subscribers` table.
#[derive(Debug, Clone)]
pub struct PgSubscriberStore {
    pool: PgPool,
}

impl PgSubscriberStore {
    /// Create a store bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an address.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidEmail`] for a blank address or
    /// [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, email: &str) -> Result<InsertOutcome, DbError> {
        let email = normalize_email(email)?;

        let result = sqlx::query(
            r"INSERT INTO subscribers (email)
              VALUES ($1)
              ON CONFLICT (email) DO NOTHING",
        )
        .bind(&email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("subscriber already present");
            Ok(InsertOutcome::AlreadySubscribed)
        } else {
            tracing::info!("subscriber added");
            Ok(InsertOutcome::Inserted)
        }
    }

    /// Look up a single address.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, email: &str) -> Result<Option<Subscriber>, DbError> {
        let email = normalize_email(email)?;
        let row: Option<(String, chrono::DateTime<chrono::Utc>)> =
            sqlx::query_as("SELECT email, subscribed_at FROM subscribers WHERE email = $1")
                .bind(&email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(email, subscribed_at)| Subscriber {
            email,
            subscribed_at,
        }))
    }

    /// Number of subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn count(&self) -> Result<u64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subscribers")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

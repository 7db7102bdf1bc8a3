//! Subscriber persistence for the Ace Case waitlist.
//!
//! Two interchangeable backends record the addresses collected by the
//! signup popup:
//!
//! ```text
//! POST /api/subscribe
//!     |
//!     +-- SubscriberStore::insert
//!         |-- Postgres  (PgSubscriberStore, INSERT .. ON CONFLICT DO NOTHING)
//!         +-- File      (FileSubscriberStore, JSON array + atomic rename)
//! ```
//!
//! Both normalize addresses (trim + lower-case) before comparing, so a
//! repeat signup reports [`InsertOutcome::AlreadySubscribed`] instead of
//! failing.
//!
//! # Modules
//!
//! - [`postgres`] -- Waitlist database pool and startup migration
//! - [`subscriber_store`] -- `PostgreSQL` subscriber table
//! - [`file_store`] -- JSON file subscriber list
//! - [`subscriber`] -- Shared record type and email normalization
//! - [`error`] -- Shared error types

pub mod error;
pub mod file_store;
pub mod postgres;
pub mod subscriber;
pub mod subscriber_store;

pub use error::DbError;
pub use file_store::FileSubscriberStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use subscriber::{InsertOutcome, Subscriber, normalize_email};
pub use subscriber_store::PgSubscriberStore;

/// The subscriber backend selected at startup.
#[derive(Debug, Clone)]
pub enum SubscriberStore {
    /// Rows in the `subscribers` table.
    Postgres(PgSubscriberStore),
    /// A JSON array on local disk.
    File(FileSubscriberStore),
}

impl SubscriberStore {
    /// Record an address, reporting whether it was new.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`DbError`].
    pub async fn insert(&self, email: &str) -> Result<InsertOutcome, DbError> {
        match self {
            Self::Postgres(store) => store.insert(email).await,
            Self::File(store) => store.insert(email).await,
        }
    }

    /// Number of recorded subscribers.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`DbError`].
    pub async fn count(&self) -> Result<u64, DbError> {
        match self {
            Self::Postgres(store) => store.count().await,
            Self::File(store) => store.count().await,
        }
    }

    /// Short label for logs.
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::File(_) => "file",
        }
    }
}

impl From<PgSubscriberStore> for SubscriberStore {
    fn from(store: PgSubscriberStore) -> Self {
        Self::Postgres(store)
    }
}

impl From<FileSubscriberStore> for SubscriberStore {
    fn from(store: FileSubscriberStore) -> Self {
        Self::File(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_backend_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let store = SubscriberStore::from(FileSubscriberStore::new(
            dir.path().join("subscribers.json"),
        ));
        assert_eq!(store.backend_name(), "file");
        assert_eq!(
            store.insert("hi@example.com").await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

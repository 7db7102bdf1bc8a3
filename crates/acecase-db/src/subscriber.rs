//! Subscriber records and email normalization shared by both backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// A single mailing-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Normalized address.
    pub email: String,
    /// When the address was first recorded.
    pub subscribed_at: DateTime<Utc>,
}

/// Result of recording an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The address was added.
    Inserted,
    /// The address was already on the list. Not an error.
    AlreadySubscribed,
}

/// Trim and lower-case an address so duplicates compare equal.
///
/// # Errors
///
/// Returns [`DbError::InvalidEmail`] if nothing is left after trimming.
pub fn normalize_email(email: &str) -> Result<String, DbError> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(DbError::InvalidEmail(email.to_owned()));
    }
    Ok(normalized)
}

//! User domain types.

use chrono::{DateTime, Utc};

use tangerine_core::{Email, UserId};

/// A shop account (domain type).
///
/// The password hash never leaves the database layer; this type carries
/// only what handlers are allowed to see.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

//! Admin accounts.
//!
//! Admins are created exclusively by the out-of-band `seed-admin` binary;
//! there is no public registration surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored admin account. Emails are compared and stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated identity carried inside admin bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: String,
    pub email: String,
}

//! Persistence port for admin accounts.

use async_trait::async_trait;

use crate::domain::{Admin, Error};

/// Errors raised by admin persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminRepositoryError {
    /// A storage connection could not be established.
    #[error("admin store connection failed: {message}")]
    Connection { message: String },
    /// A query failed during execution or row conversion.
    #[error("admin store query failed: {message}")]
    Query { message: String },
}

impl AdminRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<AdminRepositoryError> for Error {
    fn from(value: AdminRepositoryError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Port over admin rows.
///
/// Callers pass emails already lower-cased; the adapter stores and compares
/// them verbatim against the lower-cased unique column.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look up an admin by (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AdminRepositoryError>;

    /// Insert the admin, or replace the password hash when the email already
    /// exists. Only the seed tooling calls this.
    async fn upsert(&self, admin: &Admin) -> Result<(), AdminRepositoryError>;
}

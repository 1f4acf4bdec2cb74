//! Persistence port for newsletter subscribers.

use async_trait::async_trait;

use crate::domain::{Error, NewsletterSubscriber};

/// Errors raised by newsletter persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewsletterRepositoryError {
    /// A storage connection could not be established.
    #[error("newsletter store connection failed: {message}")]
    Connection { message: String },
    /// A query failed during execution or row conversion.
    #[error("newsletter store query failed: {message}")]
    Query { message: String },
}

impl NewsletterRepositoryError {
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

impl From<NewsletterRepositoryError> for Error {
    fn from(value: NewsletterRepositoryError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Port over newsletter subscriber rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    /// Look up a subscriber by email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, NewsletterRepositoryError>;

    /// Insert a subscriber. Adapters tolerate a concurrent duplicate insert
    /// (unique email) so a racing subscribe cannot surface an error.
    async fn insert(
        &self,
        subscriber: &NewsletterSubscriber,
    ) -> Result<(), NewsletterRepositoryError>;
}

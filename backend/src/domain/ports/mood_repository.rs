//! Persistence port for moods.

use async_trait::async_trait;

use crate::domain::{Error, Mood};

/// Errors raised by mood persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoodRepositoryError {
    /// A storage connection could not be established.
    #[error("mood store connection failed: {message}")]
    Connection { message: String },
    /// A query failed during execution or row conversion.
    #[error("mood store query failed: {message}")]
    Query { message: String },
}

impl MoodRepositoryError {
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

impl From<MoodRepositoryError> for Error {
    fn from(value: MoodRepositoryError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Port over mood rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoodRepository: Send + Sync {
    /// All moods, ordered by name.
    async fn find_all(&self) -> Result<Vec<Mood>, MoodRepositoryError>;

    /// One mood, or `None` when the id is unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Mood>, MoodRepositoryError>;

    /// Persist a new mood row.
    async fn insert(&self, mood: &Mood) -> Result<(), MoodRepositoryError>;

    /// Replace the mood row. Returns `false` when the id does not exist.
    async fn update(&self, mood: &Mood) -> Result<bool, MoodRepositoryError>;

    /// Delete the mood after nulling every Späti reference to it, in one
    /// database transaction (set-null cascade, referencing Spätis survive).
    /// Returns `false` when the id does not exist.
    async fn delete(&self, id: &str) -> Result<bool, MoodRepositoryError>;
}

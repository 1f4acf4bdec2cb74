//! Persistence port for amenities.

use async_trait::async_trait;

use crate::domain::{Amenity, Error};

/// Errors raised by amenity persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmenityRepositoryError {
    /// A storage connection could not be established.
    #[error("amenity store connection failed: {message}")]
    Connection { message: String },
    /// A query failed during execution or row conversion.
    #[error("amenity store query failed: {message}")]
    Query { message: String },
}

impl AmenityRepositoryError {
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

impl From<AmenityRepositoryError> for Error {
    fn from(value: AmenityRepositoryError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Port over amenity rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AmenityRepository: Send + Sync {
    /// All amenities, ordered by name.
    async fn find_all(&self) -> Result<Vec<Amenity>, AmenityRepositoryError>;

    /// One amenity, or `None` when the id is unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Amenity>, AmenityRepositoryError>;

    /// Persist a new amenity row.
    async fn insert(&self, amenity: &Amenity) -> Result<(), AmenityRepositoryError>;

    /// Replace the amenity row. Returns `false` when the id does not exist.
    async fn update(&self, amenity: &Amenity) -> Result<bool, AmenityRepositoryError>;

    /// Delete the amenity and every junction row referencing it, in one
    /// database transaction, so tagged Spätis lose the tag but stay intact.
    /// Returns `false` when the id does not exist.
    async fn delete(&self, id: &str) -> Result<bool, AmenityRepositoryError>;
}

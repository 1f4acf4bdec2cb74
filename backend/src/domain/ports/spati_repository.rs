//! Persistence port for Späti locations and their relation set.

use async_trait::async_trait;

use crate::domain::{Error, Spati};

/// Errors raised by Späti persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpatiRepositoryError {
    /// A storage connection could not be established.
    #[error("späti store connection failed: {message}")]
    Connection { message: String },
    /// A query failed during execution or row conversion.
    #[error("späti store query failed: {message}")]
    Query { message: String },
}

impl SpatiRepositoryError {
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

impl From<SpatiRepositoryError> for Error {
    fn from(value: SpatiRepositoryError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Scalar row for a Späti as persisted, before relations are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatiRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub hours: String,
    pub store_type: String,
    pub rating: f64,
    pub image_url: Option<String>,
    pub mood_id: Option<String>,
}

/// Port over Späti rows, the amenity junction, and the mood reference.
///
/// Reads return composite [`Spati`] values with the amenity set reflecting
/// exactly the junction rows at query time (empty list, never null) and the
/// mood resolved through its reference (explicit `None` when unset or
/// dangling).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpatiRepository: Send + Sync {
    /// All Spätis with relations attached, ordered by name.
    async fn find_all(&self) -> Result<Vec<Spati>, SpatiRepositoryError>;

    /// One Späti with relations attached, or `None` when the id is unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Spati>, SpatiRepositoryError>;

    /// Persist a new row plus one junction row per de-duplicated amenity id.
    /// Row and junction writes happen in one database transaction.
    async fn insert(
        &self,
        record: &SpatiRecord,
        amenity_ids: &[String],
    ) -> Result<(), SpatiRepositoryError>;

    /// Replace the scalar row and the full junction set (delete-all then
    /// insert, not a diff) in one database transaction. Returns `false` when
    /// the id does not exist.
    async fn update(
        &self,
        record: &SpatiRecord,
        amenity_ids: &[String],
    ) -> Result<bool, SpatiRepositoryError>;

    /// Delete the row and its junction rows in one database transaction.
    /// Returns `false` when the id does not exist.
    async fn delete(&self, id: &str) -> Result<bool, SpatiRepositoryError>;
}

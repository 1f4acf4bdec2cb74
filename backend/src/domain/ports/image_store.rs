//! Blob-store port for entity images.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{Error, ImageUpload};

/// Errors raised by image store adapters.
///
/// Deleting an already-absent object is not an error; adapters swallow that
/// one case and report success, per the delete contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageStoreError {
    /// The upload could not be completed.
    #[error("image upload failed: {message}")]
    Upload { message: String },
    /// The delete failed for a reason other than the object being absent.
    #[error("image delete failed: {message}")]
    Delete { message: String },
}

impl ImageStoreError {
    /// Create an upload error with the given message.
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    /// Create a delete error with the given message.
    pub fn delete(message: impl Into<String>) -> Self {
        Self::Delete {
            message: message.into(),
        }
    }
}

impl From<ImageStoreError> for Error {
    fn from(value: ImageStoreError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Port over a key-addressed blob store returning public retrieval URLs.
///
/// The round-trip contract: `delete(upload(..))` succeeds for any URL the
/// same store produced, and deleting the same URL twice succeeds both times.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the image and return its public URL.
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageStoreError>;

    /// Remove the object behind a URL this store produced. URLs the store
    /// does not recognise and already-absent objects are ignored.
    async fn delete(&self, image_url: &str) -> Result<(), ImageStoreError>;
}

/// In-memory [`ImageStore`] used by tests and local development.
///
/// Tracks call counts so tests can assert on exactly-once delete/upload
/// behaviour of the write path.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    objects: Mutex<HashMap<String, Bytes>>,
    upload_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemoryImageStore {
    /// Whether a previously returned URL still resolves to an object.
    pub fn contains(&self, url: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(url))
            .unwrap_or(false)
    }

    /// Number of `upload` calls made so far.
    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::Relaxed)
    }

    /// Number of `delete` calls made so far.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageStoreError> {
        self.upload_calls.fetch_add(1, Ordering::Relaxed);
        let url = format!("memory://images/{}-{}", Uuid::new_v4(), image.filename);
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| ImageStoreError::upload("store poisoned"))?;
        objects.insert(url.clone(), image.data.clone());
        Ok(url)
    }

    async fn delete(&self, image_url: &str) -> Result<(), ImageStoreError> {
        self.delete_calls.fetch_add(1, Ordering::Relaxed);
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| ImageStoreError::delete("store poisoned"))?;
        // Absent objects are a success, mirroring the blob-store contract.
        objects.remove(image_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> ImageUpload {
        ImageUpload {
            data: Bytes::from_static(b"webp-bytes"),
            filename: "front.webp".into(),
            content_type: "image/webp".into(),
        }
    }

    #[tokio::test]
    async fn upload_then_delete_round_trips() {
        let store = MemoryImageStore::default();
        let url = store.upload(&upload()).await.expect("upload succeeds");
        assert!(store.contains(&url));

        store.delete(&url).await.expect("first delete succeeds");
        assert!(!store.contains(&url));
    }

    #[tokio::test]
    async fn double_delete_is_not_an_error() {
        let store = MemoryImageStore::default();
        let url = store.upload(&upload()).await.expect("upload succeeds");

        store.delete(&url).await.expect("first delete succeeds");
        store.delete(&url).await.expect("second delete succeeds");
        assert_eq!(store.delete_calls(), 2);
    }
}

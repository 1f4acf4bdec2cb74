//! Image write directives and the shared image-resolution step.
//!
//! A single write request may carry a file upload, a `removeImage` flag, and
//! an `imageUrl` field that is absent, explicitly null, or a string. These
//! collapse into one [`ImageDirective`] before any business logic runs, so
//! services never inspect transport framing.

use bytes::Bytes;

use super::Error;
use super::ports::ImageStore;

/// An image file received from a client, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

/// Normalised image instruction for a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageDirective {
    /// Leave the stored image URL unchanged.
    Keep,
    /// Delete the stored blob (if any) and set the URL to null.
    Clear,
    /// Delete the stored blob (if any), upload the file, use its URL.
    Replace(ImageUpload),
    /// Point at an externally hosted URL; no upload or delete happens.
    Reuse(String),
}

impl ImageDirective {
    /// Collapse the raw request parts into a directive.
    ///
    /// Precedence: file upload, then `removeImage`, then an explicit-null
    /// `imageUrl`, then an `imageUrl` string, then no change. A request
    /// carrying both a file and `removeImage` resolves to [`Self::Replace`],
    /// which deletes the old blob exactly once.
    ///
    /// `image_url` is tri-state: `None` means the field was absent,
    /// `Some(None)` explicitly null, `Some(Some(_))` a value.
    pub fn from_parts(
        file: Option<ImageUpload>,
        remove_image: bool,
        image_url: Option<Option<String>>,
    ) -> Self {
        if let Some(upload) = file {
            return Self::Replace(upload);
        }
        if remove_image {
            return Self::Clear;
        }
        match image_url {
            Some(None) => Self::Clear,
            Some(Some(url)) => Self::Reuse(url),
            None => Self::Keep,
        }
    }
}

/// Apply an [`ImageDirective`] against the entity's current image URL.
///
/// Blob operations run before any database mutation; a failed delete (other
/// than "already absent", which the store swallows) aborts the whole write.
/// Returns the image URL the persisted row should carry.
pub async fn resolve_image(
    store: &dyn ImageStore,
    existing: Option<&str>,
    directive: ImageDirective,
) -> Result<Option<String>, Error> {
    match directive {
        ImageDirective::Keep => Ok(existing.map(ToOwned::to_owned)),
        ImageDirective::Clear => {
            if let Some(url) = existing {
                store.delete(url).await?;
            }
            Ok(None)
        }
        ImageDirective::Replace(upload) => {
            if let Some(url) = existing {
                store.delete(url).await?;
            }
            let url = store.upload(&upload).await?;
            Ok(Some(url))
        }
        ImageDirective::Reuse(url) => Ok(Some(url)),
    }
}

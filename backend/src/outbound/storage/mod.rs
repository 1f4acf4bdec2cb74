//! Blob-store adapters.

mod gcs_image_store;

pub use gcs_image_store::GcsImageStore;

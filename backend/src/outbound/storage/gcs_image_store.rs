//! Reqwest-backed Google Cloud Storage image store adapter.
//!
//! This adapter owns transport details only: object naming, the JSON API
//! calls, and HTTP error mapping. Objects are keyed
//! `<prefix>/<uuid><extension>` and exposed through public URLs of the form
//! `https://storage.googleapis.com/<bucket>/<object>`; the object name is
//! derived back out of exactly those URLs on delete. Deleting an
//! already-absent object is a success, per the port contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use uuid::Uuid;

use crate::domain::ImageUpload;
use crate::domain::ports::{ImageStore, ImageStoreError};

const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GCS image store over the JSON API.
pub struct GcsImageStore {
    client: Client,
    endpoint: Url,
    bucket: String,
    prefix: String,
    auth_token: Option<String>,
}

impl GcsImageStore {
    /// Build an adapter for one bucket and key prefix ("amenities", "moods",
    /// "spatis"). `auth_token` is an optional bearer token for authenticated
    /// buckets; anonymous access works against public/dev buckets.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed or the
    /// default endpoint fails to parse.
    pub fn new(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        auth_token: Option<String>,
    ) -> Result<Self, ImageStoreError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|err| ImageStoreError::upload(format!("invalid endpoint: {err}")))?;
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|err| ImageStoreError::upload(format!("client build failed: {err}")))?;
        Ok(Self {
            client,
            endpoint,
            bucket: bucket.into(),
            prefix: prefix.into(),
            auth_token,
        })
    }

    /// Override the API endpoint (tests, emulators).
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn base(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }

    /// `<prefix>/<uuid><extension>`, extension sanitised from the client
    /// filename. The result contains only URL-safe characters, so public
    /// URLs embed it verbatim.
    fn object_name(&self, original_filename: &str) -> String {
        let cleaned = original_filename.trim();
        let safe: String = cleaned
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        let extension = match safe.rfind('.') {
            Some(idx) if idx > 0 => safe.get(idx..).unwrap_or_default().to_ascii_lowercase(),
            _ => String::new(),
        };
        format!("{}/{}{}", self.prefix, Uuid::new_v4(), extension)
    }

    fn public_url(&self, object: &str) -> String {
        format!("{}/{}/{}", self.base(), self.bucket, object)
    }

    /// Derive the object name back out of a public URL this adapter
    /// produced. Foreign URLs yield `None` and are left alone.
    fn object_from_url(&self, image_url: &str) -> Option<String> {
        let prefix = format!("{}/{}/", self.base(), self.bucket);
        image_url
            .strip_prefix(&prefix)
            .filter(|object| !object.is_empty())
            .map(ToOwned::to_owned)
    }

    fn upload_url(&self, object: &str) -> Result<Url, ImageStoreError> {
        let mut url = Url::parse(&format!(
            "{}/upload/storage/v1/b/{}/o",
            self.base(),
            self.bucket
        ))
        .map_err(|err| ImageStoreError::upload(format!("invalid upload url: {err}")))?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", object)
            .append_pair("predefinedAcl", "publicRead");
        Ok(url)
    }

    fn delete_url(&self, object: &str) -> Result<Url, ImageStoreError> {
        let mut url = Url::parse(&format!("{}/storage/v1/b/{}/o", self.base(), self.bucket))
            .map_err(|err| ImageStoreError::delete(format!("invalid delete url: {err}")))?;
        // Push as one segment so the slash inside the object name is
        // percent-encoded, as the JSON API requires.
        url.path_segments_mut()
            .map_err(|()| ImageStoreError::delete("endpoint cannot carry a path"))?
            .push(object);
        Ok(url)
    }

    fn authorise(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ImageStore for GcsImageStore {
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageStoreError> {
        let object = self.object_name(&image.filename);
        let url = self.upload_url(&object)?;

        let response = self
            .authorise(self.client.post(url))
            .header(header::CONTENT_TYPE, image.content_type.as_str())
            .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
            .body(image.data.clone())
            .send()
            .await
            .map_err(|err| ImageStoreError::upload(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageStoreError::upload(format!(
                "bucket {} responded {status}: {body}",
                self.bucket
            )));
        }
        Ok(self.public_url(&object))
    }

    async fn delete(&self, image_url: &str) -> Result<(), ImageStoreError> {
        let Some(object) = self.object_from_url(image_url) else {
            // Not one of ours; nothing to remove.
            return Ok(());
        };
        let url = self.delete_url(&object)?;

        let response = self
            .authorise(self.client.delete(url))
            .send()
            .await
            .map_err(|err| ImageStoreError::delete(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ImageStoreError::delete(format!(
            "bucket {} responded {status}: {body}",
            self.bucket
        )))
    }
}

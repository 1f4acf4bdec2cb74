//! Admin write path for Späti locations.
//!
//! Each operation runs the blob work first, then the row + junction writes,
//! then a re-read of the composite record, per the write-path ordering
//! contract. Blob and database changes are never jointly atomic; a failure
//! after an upload can orphan a blob, never hide a row-write failure.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{ImageStore, SpatiRecord, SpatiRepository};
use crate::domain::{Error, ImageDirective, Spati, SpatiInput, resolve_image};

fn spati_not_found(id: &str) -> Error {
    Error::not_found(format!("Späti with id \"{id}\" was not found."))
}

/// Orchestrates create/update/delete of Spätis, their amenity set, and their
/// owned image blob.
#[derive(Clone)]
pub struct SpatiAdminService {
    repository: Arc<dyn SpatiRepository>,
    images: Arc<dyn ImageStore>,
}

impl SpatiAdminService {
    /// Create a new service over the given ports.
    pub fn new(repository: Arc<dyn SpatiRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repository, images }
    }

    /// Create a Späti with a fresh id, persist its amenity set, and return
    /// the re-read composite record.
    pub async fn create(
        &self,
        input: SpatiInput,
        image: ImageDirective,
    ) -> Result<Spati, Error> {
        let image_url = resolve_image(self.images.as_ref(), None, image).await?;
        let id = Uuid::new_v4().to_string();
        let (record, amenity_ids) = into_record(id.clone(), input, image_url);
        self.repository.insert(&record, &amenity_ids).await?;
        self.read_back(&id).await
    }

    /// Replace a Späti's scalar fields, image, and amenity set. Fails with
    /// NotFound when the id is unknown.
    pub async fn update(
        &self,
        id: &str,
        input: SpatiInput,
        image: ImageDirective,
    ) -> Result<Spati, Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| spati_not_found(id))?;

        let image_url =
            resolve_image(self.images.as_ref(), existing.image_url.as_deref(), image).await?;
        let (record, amenity_ids) = into_record(id.to_owned(), input, image_url);
        if !self.repository.update(&record, &amenity_ids).await? {
            // The row vanished between the read and the write.
            return Err(spati_not_found(id));
        }
        self.read_back(id).await
    }

    /// Delete a Späti, its junction rows, and its owned image blob. A blob
    /// delete failure aborts before the database mutation.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| spati_not_found(id))?;

        if let Some(url) = existing.image_url.as_deref() {
            self.images.delete(url).await?;
        }
        if !self.repository.delete(id).await? {
            return Err(spati_not_found(id));
        }
        Ok(())
    }

    async fn read_back(&self, id: &str) -> Result<Spati, Error> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::internal(format!("späti {id} missing after write")))
    }
}

fn into_record(
    id: String,
    input: SpatiInput,
    image_url: Option<String>,
) -> (SpatiRecord, Vec<String>) {
    let SpatiInput {
        name,
        description,
        latitude,
        longitude,
        address,
        hours,
        store_type,
        rating,
        mood_id,
        amenity_ids,
    } = input;
    (
        SpatiRecord {
            id,
            name,
            description,
            latitude,
            longitude,
            address,
            hours,
            store_type,
            rating,
            image_url,
            mood_id,
        },
        amenity_ids,
    )
}

#[cfg(test)]
mod tests {
    //! Service behaviour against a stub repository and the in-memory store.
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MemoryImageStore, SpatiRepositoryError};
    use crate::domain::{Amenity, ErrorCode, ImageUpload, SpatiDraft};

    #[derive(Default)]
    struct StubSpatiRepository {
        rows: Mutex<HashMap<String, (SpatiRecord, Vec<String>)>>,
    }

    impl StubSpatiRepository {
        fn assemble(record: &SpatiRecord, amenity_ids: &[String]) -> Spati {
            Spati {
                id: record.id.clone(),
                name: record.name.clone(),
                description: record.description.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                address: record.address.clone(),
                hours: record.hours.clone(),
                store_type: record.store_type.clone(),
                rating: record.rating,
                image_url: record.image_url.clone(),
                mood: None,
                amenities: amenity_ids
                    .iter()
                    .map(|id| Amenity {
                        id: id.clone(),
                        name: format!("amenity {id}"),
                        image_url: None,
                    })
                    .collect(),
            }
        }

        fn lock(
            &self,
        ) -> Result<
            std::sync::MutexGuard<'_, HashMap<String, (SpatiRecord, Vec<String>)>>,
            SpatiRepositoryError,
        > {
            self.rows
                .lock()
                .map_err(|_| SpatiRepositoryError::query("poisoned"))
        }
    }

    #[async_trait]
    impl SpatiRepository for StubSpatiRepository {
        async fn find_all(&self) -> Result<Vec<Spati>, SpatiRepositoryError> {
            let rows = self.lock()?;
            let mut all: Vec<Spati> = rows
                .values()
                .map(|(record, ids)| Self::assemble(record, ids))
                .collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(all)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Spati>, SpatiRepositoryError> {
            let rows = self.lock()?;
            Ok(rows
                .get(id)
                .map(|(record, ids)| Self::assemble(record, ids)))
        }

        async fn insert(
            &self,
            record: &SpatiRecord,
            amenity_ids: &[String],
        ) -> Result<(), SpatiRepositoryError> {
            let mut rows = self.lock()?;
            rows.insert(record.id.clone(), (record.clone(), amenity_ids.to_vec()));
            Ok(())
        }

        async fn update(
            &self,
            record: &SpatiRecord,
            amenity_ids: &[String],
        ) -> Result<bool, SpatiRepositoryError> {
            let mut rows = self.lock()?;
            if !rows.contains_key(&record.id) {
                return Ok(false);
            }
            rows.insert(record.id.clone(), (record.clone(), amenity_ids.to_vec()));
            Ok(true)
        }

        async fn delete(&self, id: &str) -> Result<bool, SpatiRepositoryError> {
            let mut rows = self.lock()?;
            Ok(rows.remove(id).is_some())
        }
    }

    fn input(amenity_ids: Vec<String>) -> SpatiInput {
        SpatiInput::try_from(SpatiDraft {
            name: "Test Spot".into(),
            description: "d".into(),
            latitude: 52.5,
            longitude: 13.4,
            address: "a".into(),
            hours: "24/7".into(),
            store_type: "kiosk".into(),
            rating: 4.0,
            mood_id: None,
            amenity_ids,
        })
        .expect("valid test input")
    }

    fn upload() -> ImageUpload {
        ImageUpload {
            data: Bytes::from_static(b"png-bytes"),
            filename: "front.png".into(),
            content_type: "image/png".into(),
        }
    }

    fn service() -> (SpatiAdminService, Arc<StubSpatiRepository>, Arc<MemoryImageStore>) {
        let repository = Arc::new(StubSpatiRepository::default());
        let images = Arc::new(MemoryImageStore::default());
        (
            SpatiAdminService::new(repository.clone(), images.clone()),
            repository,
            images,
        )
    }

    #[tokio::test]
    async fn create_returns_composite_with_amenities() {
        let (service, _, _) = service();

        let spati = service
            .create(input(vec!["amen-1".into()]), ImageDirective::Keep)
            .await
            .expect("create succeeds");

        assert!(!spati.id.is_empty());
        assert_eq!(spati.amenities.len(), 1);
        assert_eq!(spati.amenities.first().map(|a| a.id.as_str()), Some("amen-1"));
        assert_eq!(spati.image_url, None);
    }

    #[tokio::test]
    async fn update_replaces_the_amenity_set() {
        let (service, _, _) = service();
        let created = service
            .create(
                input(vec!["amen-a".into(), "amen-b".into()]),
                ImageDirective::Keep,
            )
            .await
            .expect("create succeeds");

        let updated = service
            .update(
                &created.id,
                input(vec!["amen-c".into()]),
                ImageDirective::Keep,
            )
            .await
            .expect("update succeeds");

        let ids: Vec<&str> = updated.amenities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["amen-c"]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let (service, _, _) = service();

        let err = service
            .update("missing", input(Vec::new()), ImageDirective::Keep)
            .await
            .expect_err("unknown id must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("missing"));
    }

    #[tokio::test]
    async fn update_with_file_deletes_old_blob_once_and_uploads_once() {
        let (service, _, images) = service();
        let created = service
            .create(input(Vec::new()), ImageDirective::Replace(upload()))
            .await
            .expect("create succeeds");
        let old_url = created.image_url.clone().expect("image stored");
        assert_eq!(images.upload_calls(), 1);

        let updated = service
            .update(
                &created.id,
                input(Vec::new()),
                // A request carrying both a file and removeImage collapses to
                // Replace at the parse layer; the old blob goes exactly once.
                ImageDirective::Replace(upload()),
            )
            .await
            .expect("update succeeds");

        assert_eq!(images.delete_calls(), 1);
        assert_eq!(images.upload_calls(), 2);
        assert!(!images.contains(&old_url));
        let new_url = updated.image_url.expect("replacement stored");
        assert!(images.contains(&new_url));
    }

    #[tokio::test]
    async fn delete_removes_blob_and_row() {
        let (service, repository, images) = service();
        let created = service
            .create(input(Vec::new()), ImageDirective::Replace(upload()))
            .await
            .expect("create succeeds");
        let url = created.image_url.clone().expect("image stored");

        service.delete(&created.id).await.expect("delete succeeds");

        assert!(!images.contains(&url));
        assert!(
            repository
                .find_by_id(&created.id)
                .await
                .expect("lookup works")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found() {
        let (service, _, _) = service();
        let err = service.delete("nope").await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}

//! Admin write path for amenities.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{AmenityRepository, ImageStore};
use crate::domain::{Amenity, AmenityInput, Error, ImageDirective, resolve_image};

fn amenity_not_found(id: &str) -> Error {
    Error::not_found(format!("Amenity with id \"{id}\" was not found."))
}

/// Orchestrates amenity CRUD and the owned image blob.
#[derive(Clone)]
pub struct AmenityAdminService {
    repository: Arc<dyn AmenityRepository>,
    images: Arc<dyn ImageStore>,
}

impl AmenityAdminService {
    /// Create a new service over the given ports.
    pub fn new(repository: Arc<dyn AmenityRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repository, images }
    }

    /// All amenities, ordered by name.
    pub async fn list(&self) -> Result<Vec<Amenity>, Error> {
        Ok(self.repository.find_all().await?)
    }

    /// Create an amenity with a fresh id.
    pub async fn create(
        &self,
        input: AmenityInput,
        image: ImageDirective,
    ) -> Result<Amenity, Error> {
        let image_url = resolve_image(self.images.as_ref(), None, image).await?;
        let amenity = Amenity {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            image_url,
        };
        self.repository.insert(&amenity).await?;
        Ok(amenity)
    }

    /// Replace an amenity's name and image. Fails with NotFound when the id
    /// is unknown.
    pub async fn update(
        &self,
        id: &str,
        input: AmenityInput,
        image: ImageDirective,
    ) -> Result<Amenity, Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| amenity_not_found(id))?;

        let image_url =
            resolve_image(self.images.as_ref(), existing.image_url.as_deref(), image).await?;
        let amenity = Amenity {
            id: id.to_owned(),
            name: input.name,
            image_url,
        };
        if !self.repository.update(&amenity).await? {
            return Err(amenity_not_found(id));
        }
        Ok(amenity)
    }

    /// Delete an amenity and its owned image blob. Junction rows referencing
    /// the amenity go with it; tagged Spätis merely lose the tag.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| amenity_not_found(id))?;

        if let Some(url) = existing.image_url.as_deref() {
            self.images.delete(url).await?;
        }
        if !self.repository.delete(id).await? {
            return Err(amenity_not_found(id));
        }
        Ok(())
    }
}

//! Admin write path for moods.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{ImageStore, MoodRepository};
use crate::domain::{Error, ImageDirective, Mood, MoodInput, resolve_image};

fn mood_not_found(id: &str) -> Error {
    Error::not_found(format!("Mood with id \"{id}\" was not found."))
}

/// Orchestrates mood CRUD and the owned image blob.
#[derive(Clone)]
pub struct MoodAdminService {
    repository: Arc<dyn MoodRepository>,
    images: Arc<dyn ImageStore>,
}

impl MoodAdminService {
    /// Create a new service over the given ports.
    pub fn new(repository: Arc<dyn MoodRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repository, images }
    }

    /// All moods, ordered by name.
    pub async fn list(&self) -> Result<Vec<Mood>, Error> {
        Ok(self.repository.find_all().await?)
    }

    /// Create a mood with a fresh id.
    pub async fn create(&self, input: MoodInput, image: ImageDirective) -> Result<Mood, Error> {
        let image_url = resolve_image(self.images.as_ref(), None, image).await?;
        let mood = Mood {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            color: input.color,
            image_url,
        };
        self.repository.insert(&mood).await?;
        Ok(mood)
    }

    /// Replace a mood's fields and image. Fails with NotFound when the id is
    /// unknown.
    pub async fn update(
        &self,
        id: &str,
        input: MoodInput,
        image: ImageDirective,
    ) -> Result<Mood, Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| mood_not_found(id))?;

        let image_url =
            resolve_image(self.images.as_ref(), existing.image_url.as_deref(), image).await?;
        let mood = Mood {
            id: id.to_owned(),
            name: input.name,
            color: input.color,
            image_url,
        };
        if !self.repository.update(&mood).await? {
            return Err(mood_not_found(id));
        }
        Ok(mood)
    }

    /// Delete a mood and its owned image blob. Spätis referencing the mood
    /// keep existing with their reference set to null.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| mood_not_found(id))?;

        if let Some(url) = existing.image_url.as_deref() {
            self.images.delete(url).await?;
        }
        if !self.repository.delete(id).await? {
            return Err(mood_not_found(id));
        }
        Ok(())
    }
}

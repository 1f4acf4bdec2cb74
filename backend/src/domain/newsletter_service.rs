//! Idempotent newsletter subscription.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::NewsletterRepository;
use crate::domain::{Error, NewsletterSubscriber};

/// Subscribes emails to the newsletter; repeat subscriptions are a no-op.
#[derive(Clone)]
pub struct NewsletterService {
    repository: Arc<dyn NewsletterRepository>,
}

impl NewsletterService {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<dyn NewsletterRepository>) -> Self {
        Self { repository }
    }

    /// Subscribe an email. Already-subscribed emails return success without
    /// writing; this never errors on a duplicate.
    pub async fn subscribe(&self, email: &str) -> Result<(), Error> {
        if self.repository.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let subscriber = NewsletterSubscriber {
            id: Uuid::new_v4().to_string(),
            email: email.to_owned(),
            created_at: Utc::now(),
        };
        self.repository.insert(&subscriber).await?;
        Ok(())
    }
}

//! PostgreSQL-backed newsletter repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::NewsletterSubscriber;
use crate::domain::ports::{NewsletterRepository, NewsletterRepositoryError};

use super::models::{NewsletterSubscriberRow, NewsletterSubscriberWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::newsletter_subscribers;

/// Diesel-backed implementation of the newsletter repository port.
#[derive(Clone)]
pub struct DieselNewsletterRepository {
    pool: DbPool,
}

impl DieselNewsletterRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NewsletterRepositoryError {
    NewsletterRepositoryError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> NewsletterRepositoryError {
    debug!(error = %error, "newsletter query failed");
    NewsletterRepositoryError::query(error.to_string())
}

#[async_trait]
impl NewsletterRepository for DieselNewsletterRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, NewsletterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<NewsletterSubscriberRow> = newsletter_subscribers::table
            .filter(newsletter_subscribers::email.eq(email))
            .select(NewsletterSubscriberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn insert(
        &self,
        subscriber: &NewsletterSubscriber,
    ) -> Result<(), NewsletterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // The unique email column backstops the service's find-first check;
        // a racing duplicate insert lands here as a no-op.
        diesel::insert_into(newsletter_subscribers::table)
            .values(NewsletterSubscriberWriteRow {
                id: &subscriber.id,
                email: &subscriber.email,
                created_at: subscriber.created_at,
            })
            .on_conflict(newsletter_subscribers::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::build("bad url"));
        assert!(matches!(err, NewsletterRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, NewsletterRepositoryError::Query { .. }));
    }
}

//! PostgreSQL-backed mood repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::Mood;
use crate::domain::ports::{MoodRepository, MoodRepositoryError};

use super::models::{MoodRow, MoodWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{moods, spati_locations};

/// Diesel-backed implementation of the mood repository port.
#[derive(Clone)]
pub struct DieselMoodRepository {
    pool: DbPool,
}

impl DieselMoodRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MoodRepositoryError {
    MoodRepositoryError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> MoodRepositoryError {
    debug!(error = %error, "mood query failed");
    MoodRepositoryError::query(error.to_string())
}

#[async_trait]
impl MoodRepository for DieselMoodRepository {
    async fn find_all(&self) -> Result<Vec<Mood>, MoodRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MoodRow> = moods::table
            .select(MoodRow::as_select())
            .order_by(moods::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Mood>, MoodRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MoodRow> = moods::table
            .filter(moods::id.eq(id))
            .select(MoodRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, mood: &Mood) -> Result<(), MoodRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(moods::table)
            .values(MoodWriteRow::from(mood))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, mood: &Mood) -> Result<bool, MoodRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(moods::table.filter(moods::id.eq(&mood.id)))
            .set(MoodWriteRow::from(mood))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, MoodRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Set-null cascade first, in the same transaction: referencing
        // Spätis survive with a null mood.
        conn.transaction(|conn| {
            async move {
                diesel::update(spati_locations::table.filter(spati_locations::mood_id.eq(id)))
                    .set(spati_locations::mood_id.eq(None::<String>))
                    .execute(conn)
                    .await?;
                let affected = diesel::delete(moods::table.filter(moods::id.eq(id)))
                    .execute(conn)
                    .await?;
                Ok(affected > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, MoodRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, MoodRepositoryError::Query { .. }));
    }
}

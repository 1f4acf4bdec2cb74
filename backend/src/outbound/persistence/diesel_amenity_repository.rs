//! PostgreSQL-backed amenity repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::Amenity;
use crate::domain::ports::{AmenityRepository, AmenityRepositoryError};

use super::models::{AmenityRow, AmenityWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{amenities, spati_amenities};

/// Diesel-backed implementation of the amenity repository port.
#[derive(Clone)]
pub struct DieselAmenityRepository {
    pool: DbPool,
}

impl DieselAmenityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AmenityRepositoryError {
    AmenityRepositoryError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> AmenityRepositoryError {
    debug!(error = %error, "amenity query failed");
    AmenityRepositoryError::query(error.to_string())
}

#[async_trait]
impl AmenityRepository for DieselAmenityRepository {
    async fn find_all(&self) -> Result<Vec<Amenity>, AmenityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AmenityRow> = amenities::table
            .select(AmenityRow::as_select())
            .order_by(amenities::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Amenity>, AmenityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AmenityRow> = amenities::table
            .filter(amenities::id.eq(id))
            .select(AmenityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, amenity: &Amenity) -> Result<(), AmenityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(amenities::table)
            .values(AmenityWriteRow::from(amenity))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, amenity: &Amenity) -> Result<bool, AmenityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(amenities::table.filter(amenities::id.eq(&amenity.id)))
            .set(AmenityWriteRow::from(amenity))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, AmenityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Junction rows go in the same transaction: tagged Spätis lose the
        // tag, nothing else changes.
        conn.transaction(|conn| {
            async move {
                diesel::delete(
                    spati_amenities::table.filter(spati_amenities::amenity_id.eq(id)),
                )
                .execute(conn)
                .await?;
                let affected = diesel::delete(amenities::table.filter(amenities::id.eq(id)))
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
        let err = map_pool_error(PoolError::build("bad url"));
        assert!(matches!(err, AmenityRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, AmenityRepositoryError::Query { .. }));
    }
}

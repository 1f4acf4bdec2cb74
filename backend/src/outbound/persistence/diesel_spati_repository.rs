//! PostgreSQL-backed Späti repository.
//!
//! Reads assemble the composite record in two queries inside one
//! transaction: the location rows left-joined to moods, then a single
//! junction+amenity query over the whole id set. Batching the second query
//! avoids one amenity lookup per location, and the two-step fetch keeps row
//! shapes flat instead of duplicating location columns per amenity row.
//!
//! Writes replace the scalar row and the full junction set in one
//! transaction; relation staleness after a crash between the two statements
//! is thereby ruled out.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::Spati;
use crate::domain::ports::{SpatiRecord, SpatiRepository, SpatiRepositoryError};

use super::models::{AmenityRow, MoodRow, SpatiAmenityWriteRow, SpatiRow, SpatiWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{amenities, moods, spati_amenities, spati_locations};

/// Diesel-backed implementation of the Späti repository port.
#[derive(Clone)]
pub struct DieselSpatiRepository {
    pool: DbPool,
}

impl DieselSpatiRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SpatiRepositoryError {
    SpatiRepositoryError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> SpatiRepositoryError {
    debug!(error = %error, "späti query failed");
    SpatiRepositoryError::query(error.to_string())
}

/// Zip a location row with its mood and amenity list. A dangling mood
/// reference arrives as `None` from the left join and stays `None`.
fn assemble(row: SpatiRow, mood: Option<MoodRow>, amenity_rows: Vec<AmenityRow>) -> Spati {
    Spati {
        id: row.id,
        name: row.name,
        description: row.description,
        latitude: row.latitude,
        longitude: row.longitude,
        address: row.address,
        hours: row.opening_hours,
        store_type: row.store_type,
        rating: row.rating,
        image_url: row.image_url,
        mood: mood.map(Into::into),
        amenities: amenity_rows.into_iter().map(Into::into).collect(),
    }
}

/// De-duplicate a requested amenity-id list, keeping first occurrences.
fn dedup_ids(ids: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Fetch location rows (optionally one id) with moods and amenities
/// attached, inside one transaction so both queries observe a consistent
/// snapshot.
async fn load_with_relations(
    conn: &mut AsyncPgConnection,
    id_filter: Option<&str>,
) -> Result<Vec<Spati>, diesel::result::Error> {
    conn.transaction(|conn| {
        async move {
            let mut query = spati_locations::table
                .left_join(moods::table)
                .select((SpatiRow::as_select(), Option::<MoodRow>::as_select()))
                .order_by(spati_locations::name.asc())
                .into_boxed();
            if let Some(id) = id_filter {
                query = query.filter(spati_locations::id.eq(id));
            }
            let rows: Vec<(SpatiRow, Option<MoodRow>)> = query.load(conn).await?;

            let ids: Vec<&str> = rows.iter().map(|(row, _)| row.id.as_str()).collect();
            // Every fetched id gets a key, so zero-amenity locations end up
            // with an empty list instead of a missing entry.
            let mut amenities_by_spati: HashMap<String, Vec<AmenityRow>> = ids
                .iter()
                .map(|id| ((*id).to_owned(), Vec::new()))
                .collect();

            if !ids.is_empty() {
                let tagged: Vec<(String, AmenityRow)> = spati_amenities::table
                    .inner_join(amenities::table)
                    .filter(spati_amenities::spati_id.eq_any(&ids))
                    .select((spati_amenities::spati_id, AmenityRow::as_select()))
                    .order_by(amenities::name.asc())
                    .load(conn)
                    .await?;
                for (spati_id, amenity) in tagged {
                    amenities_by_spati.entry(spati_id).or_default().push(amenity);
                }
            }

            Ok(rows
                .into_iter()
                .map(|(row, mood)| {
                    let amenity_rows = amenities_by_spati.remove(&row.id).unwrap_or_default();
                    assemble(row, mood, amenity_rows)
                })
                .collect())
        }
        .scope_boxed()
    })
    .await
}

/// Delete every junction row for the Späti and insert the new set.
async fn replace_amenities(
    conn: &mut AsyncPgConnection,
    spati_id: &str,
    amenity_ids: &[String],
) -> Result<(), diesel::result::Error> {
    diesel::delete(spati_amenities::table.filter(spati_amenities::spati_id.eq(spati_id)))
        .execute(conn)
        .await?;

    let rows: Vec<SpatiAmenityWriteRow<'_>> = dedup_ids(amenity_ids)
        .into_iter()
        .map(|amenity_id| SpatiAmenityWriteRow {
            spati_id,
            amenity_id,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(spati_amenities::table)
            .values(&rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl SpatiRepository for DieselSpatiRepository {
    async fn find_all(&self) -> Result<Vec<Spati>, SpatiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_with_relations(&mut conn, None)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Spati>, SpatiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut spatis = load_with_relations(&mut conn, Some(id))
            .await
            .map_err(map_diesel_error)?;
        Ok(spatis.pop())
    }

    async fn insert(
        &self,
        record: &SpatiRecord,
        amenity_ids: &[String],
    ) -> Result<(), SpatiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(spati_locations::table)
                    .values(SpatiWriteRow::from(record))
                    .execute(conn)
                    .await?;
                replace_amenities(conn, &record.id, amenity_ids).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        record: &SpatiRecord,
        amenity_ids: &[String],
    ) -> Result<bool, SpatiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let affected =
                    diesel::update(spati_locations::table.filter(spati_locations::id.eq(&record.id)))
                        .set(SpatiWriteRow::from(record))
                        .execute(conn)
                        .await?;
                if affected == 0 {
                    return Ok(false);
                }
                replace_amenities(conn, &record.id, amenity_ids).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &str) -> Result<bool, SpatiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::delete(spati_amenities::table.filter(spati_amenities::spati_id.eq(id)))
                    .execute(conn)
                    .await?;
                let affected =
                    diesel::delete(spati_locations::table.filter(spati_locations::id.eq(id)))
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
    //! Row assembly and helper coverage; query behaviour is exercised by the
    //! HTTP integration tests over the in-memory adapters.
    use super::*;
    use rstest::rstest;

    fn spati_row() -> SpatiRow {
        SpatiRow {
            id: "sp-1".into(),
            name: "Test Spot".into(),
            description: "d".into(),
            latitude: 52.5,
            longitude: 13.4,
            address: "a".into(),
            opening_hours: "24/7".into(),
            store_type: "kiosk".into(),
            rating: 4.0,
            image_url: None,
            mood_id: Some("mood-1".into()),
        }
    }

    #[rstest]
    fn assemble_defaults_to_empty_amenities() {
        let spati = assemble(spati_row(), None, Vec::new());
        assert!(spati.amenities.is_empty());
        assert!(spati.mood.is_none());
    }

    #[rstest]
    fn assemble_keeps_mood_and_amenities() {
        let mood = MoodRow {
            id: "mood-1".into(),
            name: "Kiezperle".into(),
            color: "#6b46ff".into(),
            image_url: None,
        };
        let amenity = AmenityRow {
            id: "amen-1".into(),
            name: "Sitzplätze".into(),
            image_url: None,
        };

        let spati = assemble(spati_row(), Some(mood), vec![amenity]);

        assert_eq!(spati.mood.as_ref().map(|m| m.id.as_str()), Some("mood-1"));
        assert_eq!(spati.amenities.len(), 1);
        assert_eq!(spati.hours, "24/7");
    }

    #[rstest]
    fn dedup_keeps_first_occurrence_order() {
        let ids = vec![
            "b".to_owned(),
            "a".to_owned(),
            "b".to_owned(),
            "c".to_owned(),
            "a".to_owned(),
        ];
        assert_eq!(dedup_ids(&ids), vec!["b", "a", "c"]);
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, SpatiRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, SpatiRepositoryError::Query { .. }));
    }
}

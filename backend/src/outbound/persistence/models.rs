//! Diesel row structs used by the persistence adapters.
//!
//! Read rows are `Queryable + Selectable`; write rows are `Insertable` and,
//! where updates happen, `AsChangeset` with `treat_none_as_null` so an
//! explicit `None` really clears the column on a full replace.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::SpatiRecord;
use crate::domain::{Admin, Amenity, Mood, NewsletterSubscriber};

use super::schema::{admins, amenities, moods, newsletter_subscribers, spati_amenities,
    spati_locations};

// ---------------------------------------------------------------------------
// Read rows
// ---------------------------------------------------------------------------

/// Queryable row for Späti locations.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = spati_locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SpatiRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub opening_hours: String,
    pub store_type: String,
    pub rating: f64,
    pub image_url: Option<String>,
    pub mood_id: Option<String>,
}

/// Queryable row for moods.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = moods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MoodRow {
    pub id: String,
    pub name: String,
    pub color: String,
    pub image_url: Option<String>,
}

impl From<MoodRow> for Mood {
    fn from(row: MoodRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            color: row.color,
            image_url: row.image_url,
        }
    }
}

/// Queryable row for amenities.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = amenities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AmenityRow {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<AmenityRow> for Amenity {
    fn from(row: AmenityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
        }
    }
}

/// Queryable row for admins.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdminRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// Queryable row for newsletter subscribers.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = newsletter_subscribers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NewsletterSubscriberRow {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<NewsletterSubscriberRow> for NewsletterSubscriber {
    fn from(row: NewsletterSubscriberRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Write rows
// ---------------------------------------------------------------------------

/// Insert/update values for a Späti row.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = spati_locations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SpatiWriteRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub address: &'a str,
    pub opening_hours: &'a str,
    pub store_type: &'a str,
    pub rating: f64,
    pub image_url: Option<&'a str>,
    pub mood_id: Option<&'a str>,
}

impl<'a> From<&'a SpatiRecord> for SpatiWriteRow<'a> {
    fn from(record: &'a SpatiRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            description: &record.description,
            latitude: record.latitude,
            longitude: record.longitude,
            address: &record.address,
            opening_hours: &record.hours,
            store_type: &record.store_type,
            rating: record.rating,
            image_url: record.image_url.as_deref(),
            mood_id: record.mood_id.as_deref(),
        }
    }
}

/// Insert/update values for a mood row.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = moods)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MoodWriteRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub color: &'a str,
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a Mood> for MoodWriteRow<'a> {
    fn from(mood: &'a Mood) -> Self {
        Self {
            id: &mood.id,
            name: &mood.name,
            color: &mood.color,
            image_url: mood.image_url.as_deref(),
        }
    }
}

/// Insert/update values for an amenity row.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = amenities)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AmenityWriteRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a Amenity> for AmenityWriteRow<'a> {
    fn from(amenity: &'a Amenity) -> Self {
        Self {
            id: &amenity.id,
            name: &amenity.name,
            image_url: amenity.image_url.as_deref(),
        }
    }
}

/// Insert values for a junction row.
#[derive(Debug, Insertable)]
#[diesel(table_name = spati_amenities)]
pub(crate) struct SpatiAmenityWriteRow<'a> {
    pub spati_id: &'a str,
    pub amenity_id: &'a str,
}

/// Insert values for an admin row.
#[derive(Debug, Insertable)]
#[diesel(table_name = admins)]
pub(crate) struct AdminWriteRow<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insert values for a newsletter subscriber row.
#[derive(Debug, Insertable)]
#[diesel(table_name = newsletter_subscribers)]
pub(crate) struct NewsletterSubscriberWriteRow<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
}

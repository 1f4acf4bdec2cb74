//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Mood taxonomy rows. Spätis reference moods with a set-null cascade.
    moods (id) {
        id -> Text,
        name -> Text,
        /// Hex colour like `#6b46ff`.
        color -> Text,
        image_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Späti location rows.
    spati_locations (id) {
        id -> Text,
        name -> Text,
        description -> Text,
        latitude -> Double,
        longitude -> Double,
        address -> Text,
        opening_hours -> Text,
        store_type -> Text,
        rating -> Double,
        image_url -> Nullable<Text>,
        /// Nullable reference into `moods`.
        mood_id -> Nullable<Text>,
    }
}

diesel::table! {
    /// Amenity rows, many-to-many with Spätis via `spati_amenities`.
    amenities (id) {
        id -> Text,
        name -> Text,
        image_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Junction rows; fully replaced on every Späti update.
    spati_amenities (spati_id, amenity_id) {
        spati_id -> Text,
        amenity_id -> Text,
    }
}

diesel::table! {
    /// Admin accounts; `email` is stored lower-cased and unique.
    admins (id) {
        id -> Text,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Newsletter subscriptions; `email` is unique.
    newsletter_subscribers (id) {
        id -> Text,
        email -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(spati_locations -> moods (mood_id));
diesel::joinable!(spati_amenities -> spati_locations (spati_id));
diesel::joinable!(spati_amenities -> amenities (amenity_id));

diesel::allow_tables_to_appear_in_same_query!(moods, spati_locations, amenities, spati_amenities);

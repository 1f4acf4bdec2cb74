//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod diesel_admin_repository;
mod diesel_amenity_repository;
mod diesel_mood_repository;
mod diesel_newsletter_repository;
mod diesel_spati_repository;
mod migrations;
mod models;
mod pool;
pub mod schema;

pub use diesel_admin_repository::DieselAdminRepository;
pub use diesel_amenity_repository::DieselAmenityRepository;
pub use diesel_mood_repository::DieselMoodRepository;
pub use diesel_newsletter_repository::DieselNewsletterRepository;
pub use diesel_spati_repository::DieselSpatiRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};

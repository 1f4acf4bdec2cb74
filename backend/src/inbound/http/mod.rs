//! HTTP inbound adapter exposing REST endpoints.

pub mod admin_amenities;
pub mod admin_auth;
pub mod admin_moods;
pub mod admin_spatis;
pub mod amenities;
pub mod auth;
pub mod error;
pub mod health;
pub mod moods;
pub mod newsletter;
pub mod payload;
pub mod spatis;
pub mod state;

pub use error::{ApiError, ApiResult};

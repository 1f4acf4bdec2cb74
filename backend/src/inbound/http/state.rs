//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports and services, never on concrete adapters. Everything here is
//! constructed once at startup and shared read-only across workers.

use std::sync::Arc;

use crate::domain::ports::{AmenityRepository, MoodRepository, SpatiRepository};
use crate::domain::{
    AdminAuthService, AmenityAdminService, MoodAdminService, NewsletterService, SpatiAdminService,
};
use crate::inbound::http::auth::AuthTokens;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub spatis: Arc<dyn SpatiRepository>,
    pub amenities: Arc<dyn AmenityRepository>,
    pub moods: Arc<dyn MoodRepository>,
    pub spati_admin: SpatiAdminService,
    pub amenity_admin: AmenityAdminService,
    pub mood_admin: MoodAdminService,
    pub auth: AdminAuthService,
    pub newsletter: NewsletterService,
    pub tokens: AuthTokens,
    /// Upper bound for buffered image uploads, from configuration.
    pub max_image_bytes: usize,
}

//! Domain primitives, aggregates, and write-path services.
//!
//! Types here are transport and storage agnostic: inbound adapters translate
//! them to HTTP, outbound adapters persist them. Invariants and serialisation
//! contracts live in each type's Rustdoc.

pub mod admin;
pub mod admin_auth_service;
pub mod amenity;
pub mod amenity_admin_service;
pub mod error;
pub mod image;
pub mod mood;
pub mod mood_admin_service;
pub mod newsletter;
pub mod newsletter_service;
pub mod ports;
pub mod spati;
pub mod spati_admin_service;

pub use self::admin::{Admin, AdminIdentity};
pub use self::admin_auth_service::AdminAuthService;
pub use self::amenity::{Amenity, AmenityInput, AmenityValidationError};
pub use self::amenity_admin_service::AmenityAdminService;
pub use self::error::{Error, ErrorCode};
pub use self::image::{ImageDirective, ImageUpload, resolve_image};
pub use self::mood::{Mood, MoodInput, MoodValidationError};
pub use self::mood_admin_service::MoodAdminService;
pub use self::newsletter::NewsletterSubscriber;
pub use self::newsletter_service::NewsletterService;
pub use self::spati::{Spati, SpatiDraft, SpatiInput, SpatiValidationError};
pub use self::spati_admin_service::SpatiAdminService;

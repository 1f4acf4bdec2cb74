//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! endpoint from the inbound layer, the shared schemas, and the admin bearer
//! security scheme. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Amenity, ErrorCode, Mood, Spati};
use crate::inbound::http::admin_amenities::AmenityBody;
use crate::inbound::http::admin_auth::{LoginRequest, LoginResponse};
use crate::inbound::http::admin_moods::MoodBody;
use crate::inbound::http::admin_spatis::SpatiBody;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::newsletter::{SubscribeRequest, SubscribeResponse};

/// Enrich the generated document with the admin bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "AdminBearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Spatify API",
        description = "Late-night Späti catalogue: public map reads, admin CRUD with image uploads, newsletter signup."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::spatis::list_spatis,
        crate::inbound::http::amenities::list_amenities,
        crate::inbound::http::moods::list_moods,
        crate::inbound::http::newsletter::subscribe,
        crate::inbound::http::admin_auth::login,
        crate::inbound::http::admin_spatis::create_spati,
        crate::inbound::http::admin_spatis::update_spati,
        crate::inbound::http::admin_spatis::delete_spati,
        crate::inbound::http::admin_amenities::list_amenities_admin,
        crate::inbound::http::admin_amenities::create_amenity,
        crate::inbound::http::admin_amenities::update_amenity,
        crate::inbound::http::admin_amenities::delete_amenity,
        crate::inbound::http::admin_moods::list_moods_admin,
        crate::inbound::http::admin_moods::create_mood,
        crate::inbound::http::admin_moods::update_mood,
        crate::inbound::http::admin_moods::delete_mood,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Spati,
        Amenity,
        Mood,
        SpatiBody,
        AmenityBody,
        MoodBody,
        LoginRequest,
        LoginResponse,
        SubscribeRequest,
        SubscribeResponse,
        ApiError,
        ErrorCode,
    )),
    tags(
        (name = "spatis", description = "Public Späti reads"),
        (name = "amenities", description = "Public amenity reads"),
        (name = "moods", description = "Public mood reads"),
        (name = "newsletter", description = "Newsletter signup"),
        (name = "admin-auth", description = "Admin login"),
        (name = "admin-spatis", description = "Späti administration"),
        (name = "admin-amenities", description = "Amenity administration"),
        (name = "admin-moods", description = "Mood administration"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_every_surface_path() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for expected in [
            "/spatis",
            "/amenities",
            "/moods",
            "/newsletter/subscribe",
            "/admin/auth/login",
            "/admin/spatis",
            "/admin/spatis/{id}",
            "/admin/amenities",
            "/admin/amenities/{id}",
            "/admin/moods",
            "/admin/moods/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(expected), "missing path {expected}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("AdminBearerAuth"));
    }
}

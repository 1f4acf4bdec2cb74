//! Server construction and wiring.
//!
//! Builds the shared adapter state once (pool-backed repositories, the GCS
//! image stores, services, token signer) and hands every worker a clone.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use spatify_backend::Trace;
#[cfg(debug_assertions)]
use spatify_backend::doc::ApiDoc;
use spatify_backend::domain::ports::ImageStore;
use spatify_backend::domain::{
    AdminAuthService, AmenityAdminService, MoodAdminService, NewsletterService, SpatiAdminService,
};
use spatify_backend::inbound::http::admin_amenities::{
    create_amenity, delete_amenity, list_amenities_admin, update_amenity,
};
use spatify_backend::inbound::http::admin_auth::login;
use spatify_backend::inbound::http::admin_moods::{
    create_mood, delete_mood, list_moods_admin, update_mood,
};
use spatify_backend::inbound::http::admin_spatis::{create_spati, delete_spati, update_spati};
use spatify_backend::inbound::http::amenities::list_amenities;
use spatify_backend::inbound::http::auth::AuthTokens;
use spatify_backend::inbound::http::health::{HealthState, live, ready};
use spatify_backend::inbound::http::moods::list_moods;
use spatify_backend::inbound::http::newsletter::subscribe;
use spatify_backend::inbound::http::spatis::list_spatis;
use spatify_backend::inbound::http::state::HttpState;
use spatify_backend::outbound::persistence::{
    DbPool, DieselAdminRepository, DieselAmenityRepository, DieselMoodRepository,
    DieselNewsletterRepository, DieselSpatiRepository,
};
use spatify_backend::outbound::storage::GcsImageStore;
use spatify_backend::settings::AppSettings;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub bind_addr: (String, u16),
    pub state: HttpState,
}

/// Build the shared HTTP state from settings and a connection pool.
///
/// # Errors
/// Fails when an image store adapter cannot be constructed.
pub fn build_http_state(settings: &AppSettings, pool: DbPool) -> std::io::Result<HttpState> {
    let spatis = Arc::new(DieselSpatiRepository::new(pool.clone()));
    let amenities = Arc::new(DieselAmenityRepository::new(pool.clone()));
    let moods = Arc::new(DieselMoodRepository::new(pool.clone()));
    let admins = Arc::new(DieselAdminRepository::new(pool.clone()));
    let subscribers = Arc::new(DieselNewsletterRepository::new(pool));

    let image_store = |prefix: &str| -> std::io::Result<Arc<dyn ImageStore>> {
        GcsImageStore::new(
            settings.storage_bucket.clone(),
            prefix,
            settings.storage_token.clone(),
        )
        .map(|store| Arc::new(store) as Arc<dyn ImageStore>)
        .map_err(|err| std::io::Error::other(err.to_string()))
    };

    Ok(HttpState {
        spatis: spatis.clone(),
        amenities: amenities.clone(),
        moods: moods.clone(),
        spati_admin: SpatiAdminService::new(spatis, image_store("spatis")?),
        amenity_admin: AmenityAdminService::new(amenities, image_store("amenities")?),
        mood_admin: MoodAdminService::new(moods, image_store("moods")?),
        auth: AdminAuthService::new(admins),
        newsletter: NewsletterService::new(subscribers),
        tokens: AuthTokens::new(&settings.jwt_secret, settings.jwt_ttl_secs()),
        max_image_bytes: settings.max_image_bytes(),
    })
}

/// Construct the Actix HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, state } = config;
    let http_state = web::Data::new(state);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Cors::permissive())
            .wrap(Trace)
            .service(list_spatis)
            .service(list_amenities)
            .service(list_moods)
            .service(subscribe)
            .service(login)
            .service(create_spati)
            .service(update_spati)
            .service(delete_spati)
            .service(list_amenities_admin)
            .service(create_amenity)
            .service(update_amenity)
            .service(delete_amenity)
            .service(list_moods_admin)
            .service(create_mood)
            .service(update_mood)
            .service(delete_mood)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

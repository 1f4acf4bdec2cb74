//! Backend entry-point: wires settings, the connection pool, and the REST
//! surface.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use spatify_backend::inbound::http::health::HealthState;
use spatify_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use spatify_backend::settings::AppSettings;

use server::{ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let database_url = settings.database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let pool = DbPool::new(PoolConfig::new(settings.database_url.clone()))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let health_state = web::Data::new(HealthState::new());
    let state = build_http_state(&settings, pool)?;
    let bind_addr = (settings.host().to_owned(), settings.port());

    let server = create_server(
        health_state,
        ServerConfig {
            bind_addr: bind_addr.clone(),
            state,
        },
    )?;

    info!(host = %bind_addr.0, port = bind_addr.1, "Spatify API listening");
    server.await
}

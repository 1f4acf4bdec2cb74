//! Out-of-band admin seeding.
//!
//! The only way admin accounts come into existence: hashes the password with
//! bcrypt and upserts the row, so re-running with the same email rotates the
//! password.
//!
//! ```text
//! SPATIFY_DATABASE_URL=… seed-admin --email admin@x.com --password …
//! ```

use std::ffi::OsString;

use chrono::Utc;
use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use spatify_backend::domain::Admin;
use spatify_backend::domain::ports::AdminRepository as _;
use spatify_backend::outbound::persistence::{DbPool, DieselAdminRepository, PoolConfig};
use spatify_backend::settings::AppSettings;

/// Seed or update an admin account.
#[derive(Debug, Parser)]
#[command(name = "seed-admin")]
struct Args {
    /// Admin email; stored lower-cased.
    #[arg(long)]
    email: String,
    /// Plain-text password, at least 8 characters; only its hash is stored.
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let args = Args::parse();
    if !args.email.contains('@') {
        return Err(std::io::Error::other("email must contain an @"));
    }
    if args.password.len() < 8 {
        return Err(std::io::Error::other(
            "password must be at least 8 characters",
        ));
    }

    // Settings come from the environment; clap already consumed the CLI.
    let settings = AppSettings::load_from_iter([OsString::from("seed-admin")])
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let pool = DbPool::new(PoolConfig::new(settings.database_url.clone()))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let repository = DieselAdminRepository::new(pool);

    let password_hash = bcrypt::hash(&args.password, bcrypt::DEFAULT_COST)
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let admin = Admin {
        id: Uuid::new_v4().to_string(),
        email: args.email.trim().to_lowercase(),
        password_hash,
        created_at: Utc::now(),
    };

    repository
        .upsert(&admin)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    info!(email = %admin.email, "admin seeded");
    Ok(())
}

//! Embedded schema migrations.
//!
//! Applied once at startup over a blocking connection, before the async
//! pool takes over. The table definitions in [`super::schema`] must match
//! what these migrations produce.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply all pending migrations.
///
/// # Errors
/// Returns the underlying connection or migration failure; callers treat
/// this as fatal at startup.
pub fn run_migrations(database_url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = PgConnection::establish(database_url)?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

//! Application settings loaded via OrthoConfig.
//!
//! Recognised environment variables (prefix `SPATIFY_`): `HOST`, `PORT`,
//! `DATABASE_URL`, `JWT_SECRET`, `JWT_TTL_SECS`, `STORAGE_BUCKET`,
//! `STORAGE_TOKEN`, `MAX_IMAGE_BYTES`. Database URL, JWT secret, and bucket
//! are required; everything else has a default.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3333;
/// 30 minutes, matching the original deployment's token lifetime.
const DEFAULT_JWT_TTL_SECS: i64 = 1800;
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Configuration values for the HTTP server and its outbound adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SPATIFY")]
pub struct AppSettings {
    /// Listen host; defaults to all interfaces.
    pub host: Option<String>,
    /// Listen port; defaults to 3333.
    pub port: Option<u16>,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// HS256 signing secret for admin bearer tokens.
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds.
    pub jwt_ttl_secs: Option<i64>,
    /// Bucket holding uploaded entity images.
    pub storage_bucket: String,
    /// Optional bearer token for the storage API.
    pub storage_token: Option<String>,
    /// Upper bound for buffered image uploads, in bytes.
    pub max_image_bytes: Option<usize>,
}

impl AppSettings {
    /// Listen host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Listen port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Token lifetime in seconds, falling back to the default.
    pub fn jwt_ttl_secs(&self) -> i64 {
        self.jwt_ttl_secs.unwrap_or(DEFAULT_JWT_TTL_SECS)
    }

    /// Upload size cap in bytes, falling back to the default.
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AppSettings {
        AppSettings {
            host: None,
            port: None,
            database_url: "postgres://localhost/spatify".into(),
            jwt_secret: "secret".into(),
            jwt_ttl_secs: None,
            storage_bucket: "spatify-images".into(),
            storage_token: None,
            max_image_bytes: None,
        }
    }

    #[test]
    fn defaults_apply_when_optionals_are_missing() {
        let settings = settings();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.jwt_ttl_secs(), DEFAULT_JWT_TTL_SECS);
        assert_eq!(settings.max_image_bytes(), DEFAULT_MAX_IMAGE_BYTES);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let settings = AppSettings {
            host: Some("127.0.0.1".into()),
            port: Some(8080),
            jwt_ttl_secs: Some(60),
            max_image_bytes: Some(1024),
            ..settings()
        };
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 8080);
        assert_eq!(settings.jwt_ttl_secs(), 60);
        assert_eq!(settings.max_image_bytes(), 1024);
    }
}

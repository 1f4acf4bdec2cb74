//! Bearer-token authentication for admin endpoints.
//!
//! Login issues a signed, time-bounded HS256 token carrying the admin's id
//! and email. [`AdminContext`] is an extractor that gates every admin
//! handler: missing, malformed, or expired tokens fail with 401 before the
//! handler body runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{AdminIdentity, Error};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

const INVALID_TOKEN: &str = "Invalid or expired bearer token.";
const MISSING_TOKEN: &str = "Missing bearer token.";

/// Claims carried inside admin bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies admin bearer tokens.
#[derive(Clone)]
pub struct AuthTokens {
    secret: String,
    ttl_secs: i64,
}

impl AuthTokens {
    /// Create a signer/verifier with the given secret and token lifetime.
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    /// Sign a token for the given identity, expiring after the configured
    /// lifetime.
    pub fn issue(&self, identity: &AdminIdentity) -> Result<String, Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = AdminClaims {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|err| Error::internal(format!("token signing failed: {err}")))
    }

    /// Verify a token and return its claims. Every verification failure maps
    /// to the same Unauthorized error.
    pub fn verify(&self, token: &str) -> Result<AdminClaims, Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        jsonwebtoken::decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| Error::unauthorized(INVALID_TOKEN))
    }
}

/// The authenticated admin for the current request.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub claims: AdminClaims,
}

fn extract_admin(req: &HttpRequest) -> Result<AdminContext, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;
    let claims = state.tokens.verify(token)?;
    Ok(AdminContext { claims })
}

impl FromRequest for AdminContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_admin(req).map_err(ApiError::from))
    }
}

//! Admin login endpoint.
//!
//! ```text
//! POST /admin/auth/login {"email":"admin@x.com","password":"…"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@x.com")]
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the admin-only endpoints.
    pub token: String,
}

/// Verify credentials and issue a bearer token.
///
/// Unknown email and wrong password fail with the same 401; only payloads
/// that fail shape validation get a 400.
#[utoipa::path(
    post,
    path = "/admin/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Malformed credentials", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-auth"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/admin/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    if !payload.email.contains('@') {
        return Err(Error::invalid_request("a valid email address is required").into());
    }
    if payload.password.len() < 8 {
        return Err(Error::invalid_request("password must be at least 8 characters").into());
    }

    let identity = state
        .auth
        .verify_credentials(&payload.email, &payload.password)
        .await?;
    let token = state.tokens.issue(&identity)?;
    Ok(web::Json(LoginResponse { token }))
}

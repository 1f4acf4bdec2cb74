//! Newsletter subscription endpoint.
//!
//! ```text
//! POST /newsletter/subscribe {"email":"fan@example.com"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Subscription request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    #[schema(example = "fan@example.com")]
    pub email: String,
}

/// Subscription response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub success: bool,
}

/// Subscribe an email address. Subscribing twice is a silent success.
#[utoipa::path(
    post,
    path = "/newsletter/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscribed (or already subscribed)", body = SubscribeResponse),
        (status = 400, description = "Invalid email", body = crate::inbound::http::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["newsletter"],
    operation_id = "subscribeNewsletter",
    security([])
)]
#[post("/newsletter/subscribe")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    payload: web::Json<SubscribeRequest>,
) -> ApiResult<web::Json<SubscribeResponse>> {
    let email = payload.email.trim();
    if !looks_like_email(email) {
        return Err(Error::invalid_request("a valid email address is required").into());
    }
    state.newsletter.subscribe(email).await?;
    Ok(web::Json(SubscribeResponse { success: true }))
}

/// Minimal shape check; the unique column is the real guard.
fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fan@example.com", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign", false)]
    #[case("@example.com", false)]
    #[case("fan@nodot", false)]
    #[case("fan@.com", false)]
    fn email_shape_check(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(looks_like_email(raw), expected);
    }
}

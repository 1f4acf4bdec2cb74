//! Public mood read endpoints.
//!
//! ```text
//! GET /moods
//! ```

use actix_web::{get, web};

use crate::domain::{Error, Mood};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// List all moods.
#[utoipa::path(
    get,
    path = "/moods",
    responses(
        (status = 200, description = "Moods ordered by name", body = [Mood]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["moods"],
    operation_id = "listMoods",
    security([])
)]
#[get("/moods")]
pub async fn list_moods(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Mood>>> {
    let moods = state.moods.find_all().await.map_err(Error::from)?;
    Ok(web::Json(moods))
}

//! Public Späti read endpoints.
//!
//! ```text
//! GET /spatis
//! ```

use actix_web::{get, web};

use crate::domain::{Error, Spati};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// List every Späti with its amenity set and mood attached.
#[utoipa::path(
    get,
    path = "/spatis",
    responses(
        (status = 200, description = "Spätis with relations, ordered by name", body = [Spati]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["spatis"],
    operation_id = "listSpatis",
    security([])
)]
#[get("/spatis")]
pub async fn list_spatis(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Spati>>> {
    let spatis = state.spatis.find_all().await.map_err(Error::from)?;
    Ok(web::Json(spatis))
}

//! Public amenity read endpoints.
//!
//! ```text
//! GET /amenities
//! ```

use actix_web::{get, web};

use crate::domain::{Amenity, Error};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// List all amenities.
#[utoipa::path(
    get,
    path = "/amenities",
    responses(
        (status = 200, description = "Amenities ordered by name", body = [Amenity]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["amenities"],
    operation_id = "listAmenities",
    security([])
)]
#[get("/amenities")]
pub async fn list_amenities(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Amenity>>> {
    let amenities = state.amenities.find_all().await.map_err(Error::from)?;
    Ok(web::Json(amenities))
}

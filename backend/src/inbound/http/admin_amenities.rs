//! Admin amenity CRUD endpoints.
//!
//! Create and update accept either a JSON body or multipart form data with
//! an optional `image` file; both shapes normalise to the same input before
//! the service runs.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Amenity, AmenityInput, Error, ImageDirective};
use crate::inbound::http::auth::AdminContext;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::{WriteBody, double_option, extract_write_body};
use crate::inbound::http::state::HttpState;

/// JSON body for amenity create/update.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmenityBody {
    pub name: String,
    /// Absent = keep the current image, null = remove it, string = reuse an
    /// externally hosted URL.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub remove_image: bool,
}

async fn parse_payload(
    req: &HttpRequest,
    payload: web::Payload,
    max_image_bytes: usize,
) -> Result<(AmenityInput, ImageDirective), Error> {
    match extract_write_body::<AmenityBody>(req, payload, max_image_bytes).await? {
        WriteBody::Json(body) => {
            let input = AmenityInput::new(body.name)
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            Ok((
                input,
                ImageDirective::from_parts(None, body.remove_image, body.image_url),
            ))
        }
        WriteBody::Form(mut form) => {
            let image = form.image.take();
            let input = AmenityInput::new(form.require_text("name")?)
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            let directive =
                ImageDirective::from_parts(image, form.flag("removeImage"), form.image_url_field());
            Ok((input, directive))
        }
    }
}

/// List amenities for the admin dashboard.
#[utoipa::path(
    get,
    path = "/admin/amenities",
    responses(
        (status = 200, description = "Amenities ordered by name", body = [Amenity]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-amenities"],
    operation_id = "adminListAmenities",
    security(("AdminBearerAuth" = []))
)]
#[get("/admin/amenities")]
pub async fn list_amenities_admin(
    state: web::Data<HttpState>,
    _admin: AdminContext,
) -> ApiResult<web::Json<Vec<Amenity>>> {
    Ok(web::Json(state.amenity_admin.list().await?))
}

/// Create an amenity.
#[utoipa::path(
    post,
    path = "/admin/amenities",
    request_body = AmenityBody,
    responses(
        (status = 201, description = "Amenity created", body = Amenity),
        (status = 400, description = "Validation failed", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-amenities"],
    operation_id = "adminCreateAmenity",
    security(("AdminBearerAuth" = []))
)]
#[post("/admin/amenities")]
pub async fn create_amenity(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let (input, directive) = parse_payload(&req, payload, state.max_image_bytes).await?;
    let amenity = state.amenity_admin.create(input, directive).await?;
    Ok(HttpResponse::Created().json(amenity))
}

/// Update an amenity; 404 when the id is unknown.
#[utoipa::path(
    put,
    path = "/admin/amenities/{id}",
    params(("id" = String, Path, description = "Amenity identifier")),
    request_body = AmenityBody,
    responses(
        (status = 200, description = "Amenity updated", body = Amenity),
        (status = 400, description = "Validation failed", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown amenity id", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-amenities"],
    operation_id = "adminUpdateAmenity",
    security(("AdminBearerAuth" = []))
)]
#[put("/admin/amenities/{id}")]
pub async fn update_amenity(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<web::Json<Amenity>> {
    let id = path.into_inner();
    let (input, directive) = parse_payload(&req, payload, state.max_image_bytes).await?;
    let amenity = state.amenity_admin.update(&id, input, directive).await?;
    Ok(web::Json(amenity))
}

/// Delete an amenity and its image; 404 when the id is unknown.
#[utoipa::path(
    delete,
    path = "/admin/amenities/{id}",
    params(("id" = String, Path, description = "Amenity identifier")),
    responses(
        (status = 204, description = "Amenity deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown amenity id", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-amenities"],
    operation_id = "adminDeleteAmenity",
    security(("AdminBearerAuth" = []))
)]
#[delete("/admin/amenities/{id}")]
pub async fn delete_amenity(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.amenity_admin.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

//! Admin Späti CRUD endpoints.
//!
//! The multipart shape carries the scalar fields as text parts, repeated
//! `amenityIds` parts for the relation set, and the shared image parts
//! (`image`, `imageUrl`, `removeImage`).

use actix_web::{HttpRequest, HttpResponse, delete, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, ImageDirective, Spati, SpatiDraft, SpatiInput};
use crate::inbound::http::auth::AdminContext;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::{
    MultipartForm, WriteBody, double_option, extract_write_body,
};
use crate::inbound::http::state::HttpState;

/// JSON body for Späti create/update.
///
/// `amenityIds` defaults to the empty list: an update that omits it clears
/// the amenity set, so callers resend the full current set to keep it.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpatiBody {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub hours: String,
    #[serde(rename = "type")]
    pub store_type: String,
    pub rating: f64,
    #[serde(default)]
    pub amenity_ids: Vec<String>,
    #[serde(default)]
    pub mood_id: Option<String>,
    /// Absent = keep the current image, null = remove it, string = reuse an
    /// externally hosted URL.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub remove_image: bool,
}

fn validate(draft: SpatiDraft) -> Result<SpatiInput, Error> {
    SpatiInput::try_from(draft).map_err(|err| Error::invalid_request(err.to_string()))
}

fn draft_from_form(form: &MultipartForm) -> Result<SpatiDraft, Error> {
    Ok(SpatiDraft {
        name: form.require_text("name")?,
        description: form.require_text("description")?,
        latitude: form.require_f64("latitude")?,
        longitude: form.require_f64("longitude")?,
        address: form.require_text("address")?,
        hours: form.require_text("hours")?,
        store_type: form.require_text("type")?,
        rating: form.require_f64("rating")?,
        mood_id: form.text("moodId").map(ToOwned::to_owned),
        amenity_ids: form.values("amenityIds"),
    })
}

async fn parse_payload(
    req: &HttpRequest,
    payload: web::Payload,
    max_image_bytes: usize,
) -> Result<(SpatiInput, ImageDirective), Error> {
    match extract_write_body::<SpatiBody>(req, payload, max_image_bytes).await? {
        WriteBody::Json(body) => {
            let directive = ImageDirective::from_parts(None, body.remove_image, body.image_url);
            let input = validate(SpatiDraft {
                name: body.name,
                description: body.description,
                latitude: body.latitude,
                longitude: body.longitude,
                address: body.address,
                hours: body.hours,
                store_type: body.store_type,
                rating: body.rating,
                mood_id: body.mood_id,
                amenity_ids: body.amenity_ids,
            })?;
            Ok((input, directive))
        }
        WriteBody::Form(mut form) => {
            let image = form.image.take();
            let directive =
                ImageDirective::from_parts(image, form.flag("removeImage"), form.image_url_field());
            let input = validate(draft_from_form(&form)?)?;
            Ok((input, directive))
        }
    }
}

/// Create a Späti with its amenity set.
#[utoipa::path(
    post,
    path = "/admin/spatis",
    request_body = SpatiBody,
    responses(
        (status = 201, description = "Späti created, relations attached", body = Spati),
        (status = 400, description = "Validation failed", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-spatis"],
    operation_id = "adminCreateSpati",
    security(("AdminBearerAuth" = []))
)]
#[post("/admin/spatis")]
pub async fn create_spati(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let (input, directive) = parse_payload(&req, payload, state.max_image_bytes).await?;
    let spati = state.spati_admin.create(input, directive).await?;
    Ok(HttpResponse::Created().json(spati))
}

/// Update a Späti, fully replacing its scalar fields and amenity set; 404
/// when the id is unknown.
#[utoipa::path(
    put,
    path = "/admin/spatis/{id}",
    params(("id" = String, Path, description = "Späti identifier")),
    request_body = SpatiBody,
    responses(
        (status = 200, description = "Späti updated, relations attached", body = Spati),
        (status = 400, description = "Validation failed", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown Späti id", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-spatis"],
    operation_id = "adminUpdateSpati",
    security(("AdminBearerAuth" = []))
)]
#[put("/admin/spatis/{id}")]
pub async fn update_spati(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<web::Json<Spati>> {
    let id = path.into_inner();
    let (input, directive) = parse_payload(&req, payload, state.max_image_bytes).await?;
    let spati = state.spati_admin.update(&id, input, directive).await?;
    Ok(web::Json(spati))
}

/// Delete a Späti, its junction rows, and its image; 404 when the id is
/// unknown.
#[utoipa::path(
    delete,
    path = "/admin/spatis/{id}",
    params(("id" = String, Path, description = "Späti identifier")),
    responses(
        (status = 204, description = "Späti deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown Späti id", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-spatis"],
    operation_id = "adminDeleteSpati",
    security(("AdminBearerAuth" = []))
)]
#[delete("/admin/spatis/{id}")]
pub async fn delete_spati(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.spati_admin.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

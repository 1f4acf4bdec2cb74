//! Admin mood CRUD endpoints.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, ImageDirective, Mood, MoodInput};
use crate::inbound::http::auth::AdminContext;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::payload::{WriteBody, double_option, extract_write_body};
use crate::inbound::http::state::HttpState;

/// JSON body for mood create/update.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodBody {
    pub name: String,
    /// Hex colour like `#6b46ff`.
    pub color: String,
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
) -> Result<(MoodInput, ImageDirective), Error> {
    match extract_write_body::<MoodBody>(req, payload, max_image_bytes).await? {
        WriteBody::Json(body) => {
            let input = MoodInput::new(body.name, body.color)
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            Ok((
                input,
                ImageDirective::from_parts(None, body.remove_image, body.image_url),
            ))
        }
        WriteBody::Form(mut form) => {
            let image = form.image.take();
            let input = MoodInput::new(form.require_text("name")?, form.require_text("color")?)
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            let directive =
                ImageDirective::from_parts(image, form.flag("removeImage"), form.image_url_field());
            Ok((input, directive))
        }
    }
}

/// List moods for the admin dashboard.
#[utoipa::path(
    get,
    path = "/admin/moods",
    responses(
        (status = 200, description = "Moods ordered by name", body = [Mood]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-moods"],
    operation_id = "adminListMoods",
    security(("AdminBearerAuth" = []))
)]
#[get("/admin/moods")]
pub async fn list_moods_admin(
    state: web::Data<HttpState>,
    _admin: AdminContext,
) -> ApiResult<web::Json<Vec<Mood>>> {
    Ok(web::Json(state.mood_admin.list().await?))
}

/// Create a mood.
#[utoipa::path(
    post,
    path = "/admin/moods",
    request_body = MoodBody,
    responses(
        (status = 201, description = "Mood created", body = Mood),
        (status = 400, description = "Validation failed", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-moods"],
    operation_id = "adminCreateMood",
    security(("AdminBearerAuth" = []))
)]
#[post("/admin/moods")]
pub async fn create_mood(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let (input, directive) = parse_payload(&req, payload, state.max_image_bytes).await?;
    let mood = state.mood_admin.create(input, directive).await?;
    Ok(HttpResponse::Created().json(mood))
}

/// Update a mood; 404 when the id is unknown.
#[utoipa::path(
    put,
    path = "/admin/moods/{id}",
    params(("id" = String, Path, description = "Mood identifier")),
    request_body = MoodBody,
    responses(
        (status = 200, description = "Mood updated", body = Mood),
        (status = 400, description = "Validation failed", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown mood id", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-moods"],
    operation_id = "adminUpdateMood",
    security(("AdminBearerAuth" = []))
)]
#[put("/admin/moods/{id}")]
pub async fn update_mood(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<web::Json<Mood>> {
    let id = path.into_inner();
    let (input, directive) = parse_payload(&req, payload, state.max_image_bytes).await?;
    let mood = state.mood_admin.update(&id, input, directive).await?;
    Ok(web::Json(mood))
}

/// Delete a mood and its image; referencing Spätis keep existing with a null
/// mood. 404 when the id is unknown.
#[utoipa::path(
    delete,
    path = "/admin/moods/{id}",
    params(("id" = String, Path, description = "Mood identifier")),
    responses(
        (status = 204, description = "Mood deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown mood id", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["admin-moods"],
    operation_id = "adminDeleteMood",
    security(("AdminBearerAuth" = []))
)]
#[delete("/admin/moods/{id}")]
pub async fn delete_mood(
    state: web::Data<HttpState>,
    _admin: AdminContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.mood_admin.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

//! Request payload normalisation shared by the admin write endpoints.
//!
//! Create/update requests arrive as JSON or as multipart form data. Both are
//! reduced to the same normalised parts (scalar fields, an optional buffered
//! file, a tri-state `imageUrl`, a `removeImage` flag) before any business
//! logic runs, so services never see transport framing.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpRequest, web};
use bytes::BytesMut;
use futures_util::StreamExt as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::domain::{Error, ImageUpload};

/// Accepted image content types for uploads.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/avif",
    "image/svg+xml",
];

/// Hard cap for non-file text fields; scalar form values never get close.
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Hard cap for JSON bodies; write payloads are small scalar records.
const MAX_JSON_BYTES: usize = 1024 * 1024;

/// Deserialize helper distinguishing an absent field from an explicit null.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`: an
/// absent field stays `None`, `null` becomes `Some(None)`, and a value
/// becomes `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Parse the boolean-ish strings multipart clients send for flags.
pub fn bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// A fully collected multipart form: text fields plus at most one image.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: Vec<(String, String)>,
    /// The buffered `image` file part, when one was sent.
    pub image: Option<ImageUpload>,
}

impl MultipartForm {
    /// First value of a text field, when present and non-empty.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(field, value)| field == name && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    /// First value of a required text field, or a validation error naming it.
    pub fn require_text(&self, name: &str) -> Result<String, Error> {
        self.text(name)
            .map(ToOwned::to_owned)
            .ok_or_else(|| Error::invalid_request(format!("field \"{name}\" is required")))
    }

    /// Every value of a repeated text field, e.g. `amenityIds`.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.texts
            .iter()
            .filter(|(field, value)| field == name && !value.is_empty())
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Parse a required numeric field.
    pub fn require_f64(&self, name: &str) -> Result<f64, Error> {
        self.require_text(name)?.parse().map_err(|_| {
            Error::invalid_request(format!("field \"{name}\" must be a number"))
        })
    }

    /// Boolean-ish flag field; absent means false.
    pub fn flag(&self, name: &str) -> bool {
        self.text(name).is_some_and(bool_flag)
    }

    /// The tri-state `imageUrl` field. Empty values count as absent; clients
    /// clear images through `removeImage`, not through an empty string.
    pub fn image_url_field(&self) -> Option<Option<String>> {
        self.text("imageUrl").map(|url| Some(url.to_owned()))
    }
}

/// A write request body after transport framing is resolved.
///
/// The JSON and multipart shapes of the same endpoint both land here; the
/// per-entity parsers turn either variant into the one normalised input.
#[derive(Debug)]
pub enum WriteBody<T> {
    Json(T),
    Form(MultipartForm),
}

/// Branch on the request content type and produce a [`WriteBody`].
///
/// Multipart bodies stream through [`collect_form`] (so image uploads are
/// only bounded by `max_image_bytes`); anything else is buffered and parsed
/// as JSON. `web::Either` is not usable here: its replay buffer caps the
/// payload far below a realistic image size.
pub async fn extract_write_body<T: DeserializeOwned>(
    req: &HttpRequest,
    mut payload: web::Payload,
    max_image_bytes: usize,
) -> Result<WriteBody<T>, Error> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::new(req.headers(), payload);
        return Ok(WriteBody::Form(collect_form(multipart, max_image_bytes).await?));
    }

    let mut buf = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk =
            chunk.map_err(|err| Error::invalid_request(format!("broken request body: {err}")))?;
        if buf.len().saturating_add(chunk.len()) > MAX_JSON_BYTES {
            return Err(Error::invalid_request("request body too large"));
        }
        buf.extend_from_slice(&chunk);
    }
    serde_json::from_slice(&buf)
        .map(WriteBody::Json)
        .map_err(|err| Error::invalid_request(format!("invalid JSON body: {err}")))
}

/// Drain a multipart stream into a [`MultipartForm`].
///
/// The `image` part is buffered up to `max_image_bytes` and checked against
/// the image MIME allowlist; everything else is collected as UTF-8 text.
pub async fn collect_form(
    mut multipart: Multipart,
    max_image_bytes: usize,
) -> Result<MultipartForm, Error> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart.next().await {
        let mut field =
            field.map_err(|err| Error::invalid_request(format!("malformed multipart: {err}")))?;
        let name = field.name().unwrap_or_default().to_owned();

        if name == "image" {
            let content_type = field
                .content_type()
                .map(ToString::to_string)
                .unwrap_or_default();
            if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
                return Err(Error::invalid_request(format!(
                    "unsupported image content type {content_type:?}"
                )));
            }
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or("upload")
                .to_owned();
            let data = read_capped(&mut field, max_image_bytes, "image").await?;
            // An empty file part means the client attached nothing.
            if !data.is_empty() {
                form.image = Some(ImageUpload {
                    data,
                    filename,
                    content_type,
                });
            }
        } else {
            let data = read_capped(&mut field, MAX_TEXT_FIELD_BYTES, &name).await?;
            let value = String::from_utf8(data.to_vec()).map_err(|_| {
                Error::invalid_request(format!("field {name:?} is not valid UTF-8"))
            })?;
            form.texts.push((name, value));
        }
    }

    Ok(form)
}

async fn read_capped(
    field: &mut actix_multipart::Field,
    max_bytes: usize,
    name: &str,
) -> Result<bytes::Bytes, Error> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk
            .map_err(|err| Error::invalid_request(format!("malformed multipart: {err}")))?;
        if buf.len().saturating_add(chunk.len()) > max_bytes {
            return Err(Error::invalid_request(format!(
                "field {name:?} exceeds the limit of {max_bytes} bytes"
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("on", true)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("", false)]
    #[case("maybe", false)]
    fn bool_flag_accepts_the_documented_spellings(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(bool_flag(raw), expected);
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        image_url: Option<Option<String>>,
    }

    #[rstest]
    #[case("{}", None)]
    #[case(r#"{"image_url": null}"#, Some(None))]
    #[case(r#"{"image_url": "https://x.test/i.png"}"#, Some(Some("https://x.test/i.png".to_owned())))]
    fn double_option_distinguishes_absent_null_and_value(
        #[case] json: &str,
        #[case] expected: Option<Option<String>>,
    ) {
        let probe: Probe = serde_json::from_str(json).expect("probe parses");
        assert_eq!(probe.image_url, expected);
    }

    fn form_with(texts: Vec<(&str, &str)>) -> MultipartForm {
        MultipartForm {
            texts: texts
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            image: None,
        }
    }

    #[rstest]
    fn repeated_fields_collect_in_order() {
        let form = form_with(vec![
            ("amenityIds", "a"),
            ("name", "Spot"),
            ("amenityIds", "b"),
        ]);
        assert_eq!(form.values("amenityIds"), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[rstest]
    fn missing_required_field_names_the_field() {
        let form = form_with(vec![]);
        let err = form.require_text("name").expect_err("missing field");
        assert!(err.message().contains("name"));
    }

    #[rstest]
    fn numeric_parsing_rejects_garbage() {
        let form = form_with(vec![("latitude", "north")]);
        assert!(form.require_f64("latitude").is_err());

        let form = form_with(vec![("latitude", "52.5")]);
        assert_eq!(form.require_f64("latitude").expect("parses"), 52.5);
    }

    #[rstest]
    fn empty_image_url_field_counts_as_absent() {
        let form = form_with(vec![("imageUrl", "")]);
        assert_eq!(form.image_url_field(), None);

        let form = form_with(vec![("imageUrl", "https://x.test/i.png")]);
        assert_eq!(
            form.image_url_field(),
            Some(Some("https://x.test/i.png".to_owned()))
        );
    }
}

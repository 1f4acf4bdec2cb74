//! Print the OpenAPI document as JSON, for client type generation.

use utoipa::OpenApi;

use spatify_backend::ApiDoc;

fn main() -> Result<(), serde_json::Error> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}

use super::handlers::{health, verify_email};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        verify_email::verify_email_page,
        verify_email::submit_verification,
    ),
    components(schemas(health::Health, verify_email::CodeForm)),
    tags(
        (name = "health", description = "Service health"),
        (name = "verify", description = "Email verification page"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document served at `/api-docs/openapi.json`.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    // Use Cargo.toml metadata instead of the utoipa crate info defaults.
    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc.info.description = Some(env!("CARGO_PKG_DESCRIPTION").to_string());
    doc
}

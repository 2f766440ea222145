//! OpenAPI documentation generation using utoipa
//!
//! Handler functions are annotated with `#[utoipa::path]`; this module collects
//! them into one document served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::models::{ExportPayload, Translation, TranslationCreateRequest, TranslationUpdateRequest};
use crate::web::handlers::{health, translations};
use crate::web::responses::{HealthResponse, MessageResponse};

/// OpenAPI specification for the translation store API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "i18n-store API",
        description = "Key/value translation management with tag filtering and cached exports",
    ),
    paths(
        translations::list_translations,
        translations::create_translation,
        translations::get_translation,
        translations::update_translation,
        translations::delete_translation,
        translations::search_translations,
        translations::export_translations,
        health::health_check,
    ),
    components(schemas(
        Translation,
        TranslationCreateRequest,
        TranslationUpdateRequest,
        ExportPayload,
        MessageResponse,
        HealthResponse,
    )),
    tags(
        (name = "translations", description = "Translation management, search and export"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

//! Translation HTTP handlers
//!
//! Thin wrappers around `TranslationService`: they extract the request, log it
//! and map the result to a response.

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::Method,
    response::{IntoResponse, Response},
};

use crate::models::{
    ExportPayload, Translation, TranslationCreateRequest, TranslationExportQuery,
    TranslationListQuery, TranslationSearchQuery, TranslationUpdateRequest,
};
use crate::web::{
    AppState,
    extractors::{QueryParams, RequestContext},
    responses::{MessageResponse, bad_request, created, handle_error, handle_result},
    utils::{extract_id_param, log_request},
};

/// List translations, newest first
#[utoipa::path(
    get,
    path = "/api/v1/translations",
    tag = "translations",
    params(TranslationListQuery),
    responses(
        (status = 200, description = "Page of translations"),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_translations(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
    QueryParams(query): QueryParams<TranslationListQuery>,
) -> Response {
    log_request(&method, &uri, &context);

    handle_result(
        state
            .translation_service
            .list(query.page, query.per_page)
            .await,
    )
}

/// Create a translation
#[utoipa::path(
    post,
    path = "/api/v1/translations",
    tag = "translations",
    request_body = TranslationCreateRequest,
    responses(
        (status = 201, description = "Translation created", body = Translation),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Translation already exists for this key and locale"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_translation(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
    Json(request): Json<TranslationCreateRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.translation_service.create(request).await {
        Ok(translation) => created(translation).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Get a translation by id
#[utoipa::path(
    get,
    path = "/api/v1/translations/{id}",
    tag = "translations",
    params(("id" = i32, Path, description = "Translation id", example = 1)),
    responses(
        (status = 200, description = "Translation found", body = Translation),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Translation not found"),
    )
)]
pub async fn get_translation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    let id = match extract_id_param(&id) {
        Ok(id) => id,
        Err(error) => return bad_request(&error),
    };

    handle_result(state.translation_service.get(id).await)
}

/// Partially update a translation
///
/// Supplying `tags` replaces the tag set; an empty list clears it.
#[utoipa::path(
    put,
    path = "/api/v1/translations/{id}",
    tag = "translations",
    params(("id" = i32, Path, description = "Translation id", example = 1)),
    request_body = TranslationUpdateRequest,
    responses(
        (status = 200, description = "Translation updated", body = Translation),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Translation not found"),
        (status = 409, description = "Another translation already uses this key and locale"),
    )
)]
pub async fn update_translation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
    Json(request): Json<TranslationUpdateRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    let id = match extract_id_param(&id) {
        Ok(id) => id,
        Err(error) => return bad_request(&error),
    };

    handle_result(state.translation_service.update(id, request).await)
}

/// Delete a translation
#[utoipa::path(
    delete,
    path = "/api/v1/translations/{id}",
    tag = "translations",
    params(("id" = i32, Path, description = "Translation id", example = 1)),
    responses(
        (status = 200, description = "Translation deleted", body = MessageResponse),
        (status = 404, description = "Translation not found"),
    )
)]
pub async fn delete_translation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    let id = match extract_id_param(&id) {
        Ok(id) => id,
        Err(error) => return bad_request(&error),
    };

    match state.translation_service.delete(id).await {
        Ok(true) => handle_result(Ok(MessageResponse::new("Translation deleted successfully"))),
        Ok(false) => handle_error(crate::errors::AppError::not_found("translation", id)),
        Err(e) => handle_error(e),
    }
}

/// Search translations
///
/// Filters are combined with AND. A translation matches `tags` only if it
/// carries every listed tag.
#[utoipa::path(
    get,
    path = "/api/v1/translations/search",
    tag = "translations",
    params(TranslationSearchQuery),
    responses(
        (status = 200, description = "Matching translations ordered by key"),
        (status = 400, description = "Invalid query parameters"),
    )
)]
pub async fn search_translations(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
    QueryParams(query): QueryParams<TranslationSearchQuery>,
) -> Response {
    log_request(&method, &uri, &context);

    handle_result(state.translation_service.search(query.into()).await)
}

/// Export translations grouped by locale
///
/// A translation is exported if it carries any of the listed tags. The body is
/// the export itself, without the response envelope.
#[utoipa::path(
    get,
    path = "/api/v1/translations/export",
    tag = "translations",
    params(TranslationExportQuery),
    responses(
        (status = 200, description = "Exported translations", body = ExportPayload),
        (status = 400, description = "Invalid query parameters"),
    )
)]
pub async fn export_translations(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
    QueryParams(query): QueryParams<TranslationExportQuery>,
) -> Response {
    log_request(&method, &uri, &context);

    match state
        .translation_service
        .export(query.locale(), query.tags())
        .await
    {
        Ok(payload) => Json(payload.as_ref()).into_response(),
        Err(e) => handle_error(e),
    }
}

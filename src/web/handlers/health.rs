//! Health check HTTP handlers

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::web::{
    AppState, extractors::RequestContext, responses::HealthResponse, utils::log_request,
};

/// Health check endpoint
///
/// Pings the database; answers 503 when it is unreachable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    let database = state.database.database_type().as_str();
    let response = match state.database.health_check().await {
        Ok(()) => HealthResponse::healthy(database),
        Err(e) => {
            warn!("Database health check failed: {}", e);
            HealthResponse::unhealthy(database, "Database connection failed".to_string())
        }
    };

    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response)).into_response()
}

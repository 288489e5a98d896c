pub mod courses;
pub mod fields;
pub mod students;
pub mod subjects;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use service::ids::{parse_id, RawId};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Delete acknowledgement.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}

/// Parse an `:id` path segment.
pub(crate) fn path_id(raw: &str) -> Result<i32, ApiError> {
    parse_id(raw, "id").map_err(|e| ApiError::from_service(e, "Invalid identifier."))
}

/// A body id that may be absent or null.
pub(crate) fn optional_id(raw: Option<&RawId>, what: &str) -> Result<Option<i32>, ApiError> {
    service::ids::resolve_optional(raw, what).map_err(|e| ApiError::from_service(e, "Invalid identifier."))
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let records = Router::new()
        .route("/students", get(students::list).post(students::create))
        .route("/students/:id", get(students::get).put(students::update).delete(students::delete))
        .route("/subjects", get(subjects::list).post(subjects::create))
        .route("/subjects/:id", get(subjects::get).put(subjects::update).delete(subjects::delete))
        .route("/courses", get(courses::list).post(courses::create))
        .route("/courses/:id", get(courses::get).put(courses::update).delete(courses::delete))
        .route("/courses/:id/add-subjects", post(courses::add_subjects))
        .route("/fields", get(fields::list).post(fields::create))
        .route("/fields/:id", get(fields::get).put(fields::update).delete(fields::delete))
        .with_state(state);

    public
        .merge(records)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

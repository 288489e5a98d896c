use axum::{
    extract::{Path, State},
    Json,
};
use models::field;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::routes::{path_id, Ack};
use crate::state::ServerState;

/// Body of both `POST /fields` and `PUT /fields/:id`.
#[derive(Debug, Deserialize)]
pub struct FieldInput {
    #[serde(default)]
    pub name: Option<String>,
}

#[utoipa::path(
    get, path = "/fields", tag = "fields",
    responses(
        (status = 200, description = "All fields"),
        (status = 500, description = "Failed to list fields")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<field::Model>>, ApiError> {
    state
        .fields
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to list fields."))
}

#[utoipa::path(
    post, path = "/fields", tag = "fields",
    request_body = crate::openapi::FieldDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Name missing"),
        (status = 500, description = "Failed to create field")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<FieldInput>,
) -> Result<Json<field::Model>, ApiError> {
    let name = input.name.unwrap_or_default();
    state
        .fields
        .create(&name)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to create field."))
}

#[utoipa::path(
    get, path = "/fields/{id}", tag = "fields",
    params(("id" = i32, Path, description = "Field id")),
    responses(
        (status = 200, description = "The field, or null when absent"),
        (status = 400, description = "Invalid id")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<field::Model>>, ApiError> {
    let id = path_id(&id)?;
    state
        .fields
        .get(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch field."))
}

#[utoipa::path(
    put, path = "/fields/{id}", tag = "fields",
    params(("id" = i32, Path, description = "Field id")),
    request_body = crate::openapi::FieldDoc,
    responses(
        (status = 200, description = "Renamed"),
        (status = 400, description = "Invalid id or name missing"),
        (status = 404, description = "Field not found"),
        (status = 500, description = "Failed to update field")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<FieldInput>,
) -> Result<Json<field::Model>, ApiError> {
    let id = path_id(&id)?;
    let name = input.name.unwrap_or_default();
    state
        .fields
        .update(id, &name)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to update field."))
}

#[utoipa::path(
    delete, path = "/fields/{id}", tag = "fields",
    params(("id" = i32, Path, description = "Field id")),
    responses(
        (status = 200, description = "Deleted; courses keep their fieldId"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Field not found"),
        (status = 500, description = "Failed to delete field")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = path_id(&id)?;
    state
        .fields
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete field."))?;
    Ok(Json(Ack { message: "Field deleted successfully" }))
}

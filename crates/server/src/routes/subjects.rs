use axum::{
    extract::{Path, State},
    Json,
};
use models::subject;
use serde::Deserialize;
use service::ids::RawId;
use service::records::domain::SubjectChanges;

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::routes::{optional_id, path_id, Ack};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub course_id: Option<RawId>,
    #[serde(default)]
    pub student_id: Option<RawId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub course_id: Option<RawId>,
    #[serde(default)]
    pub student_id: Option<RawId>,
}

#[utoipa::path(
    get, path = "/subjects", tag = "subjects",
    responses(
        (status = 200, description = "All subjects"),
        (status = 500, description = "Failed to list subjects")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<subject::Model>>, ApiError> {
    state
        .subjects
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to list subjects."))
}

#[utoipa::path(
    post, path = "/subjects", tag = "subjects",
    request_body = crate::openapi::CreateSubjectDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Missing name or malformed id"),
        (status = 404, description = "Course not found, or student not found"),
        (status = 500, description = "Failed to create subject")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateSubjectInput>,
) -> Result<Json<subject::Model>, ApiError> {
    let name = input.name.unwrap_or_default();
    state
        .subjects
        .create_from_raw(&name, input.course_id.as_ref(), input.student_id.as_ref())
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to create subject."))
}

#[utoipa::path(
    get, path = "/subjects/{id}", tag = "subjects",
    params(("id" = i32, Path, description = "Subject id")),
    responses(
        (status = 200, description = "The subject, or null when absent"),
        (status = 400, description = "Invalid id")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<subject::Model>>, ApiError> {
    let id = path_id(&id)?;
    state
        .subjects
        .get(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch subject."))
}

#[utoipa::path(
    put, path = "/subjects/{id}", tag = "subjects",
    params(("id" = i32, Path, description = "Subject id")),
    request_body = crate::openapi::UpdateSubjectDoc,
    responses(
        (status = 200, description = "Updated; absent references are cleared"),
        (status = 400, description = "Invalid id or blank name"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Failed to update subject")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateSubjectInput>,
) -> Result<Json<subject::Model>, ApiError> {
    let id = path_id(&id)?;
    let changes = SubjectChanges {
        name: input.name,
        course_id: optional_id(input.course_id.as_ref(), "courseId")?,
        student_id: optional_id(input.student_id.as_ref(), "studentId")?,
    };
    state
        .subjects
        .update(id, changes)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to update subject."))
}

#[utoipa::path(
    delete, path = "/subjects/{id}", tag = "subjects",
    params(("id" = i32, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Failed to delete subject")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = path_id(&id)?;
    state
        .subjects
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete subject."))?;
    Ok(Json(Ack { message: "Subject deleted successfully" }))
}

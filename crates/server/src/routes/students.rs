use axum::{
    extract::{Path, State},
    Json,
};
use models::student;
use serde::Deserialize;
use service::records::domain::{StudentChanges, StudentWithCourse};
use tracing::info;

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::routes::{path_id, Ack};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentInput {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub registration_code: Option<String>,
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::CreateStudentDoc,
    responses(
        (status = 200, description = "Created, with a generated registration code"),
        (status = 400, description = "Name missing"),
        (status = 500, description = "Failed to create student")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateStudentInput>,
) -> Result<Json<student::Model>, ApiError> {
    let name = input.name.unwrap_or_default();
    state
        .students
        .create(&name)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to create student."))
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 200, description = "Students with the course of their first subject"),
        (status = 500, description = "Failed to list students")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<StudentWithCourse>>, ApiError> {
    let rows = state
        .students
        .list_with_course()
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to list students."))?;
    info!(count = rows.len(), "list students");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student, or null when absent"),
        (status = 400, description = "Invalid id")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<student::Model>>, ApiError> {
    let id = path_id(&id)?;
    state
        .students
        .get(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch student."))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    request_body = crate::openapi::UpdateStudentDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid id or blank name"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Failed to update student")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateStudentInput>,
) -> Result<Json<student::Model>, ApiError> {
    let id = path_id(&id)?;
    let changes = StudentChanges { name: input.name, registration_code: input.registration_code };
    state
        .students
        .update(id, changes)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to update student."))
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Deleted; subjects are kept"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Failed to delete student")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = path_id(&id)?;
    state
        .students
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete student."))?;
    Ok(Json(Ack { message: "Student deleted successfully" }))
}

use axum::{
    extract::{Path, State},
    Json,
};
use models::{course, subject};
use serde::{Deserialize, Serialize};
use service::ids::RawId;
use service::records::domain::{CourseChanges, CourseWithSubjects};

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::routes::{optional_id, path_id, Ack};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field_id: Option<RawId>,
}

#[derive(Debug, Deserialize)]
pub struct AddSubjectsInput {
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct AddSubjectsOutput {
    pub message: &'static str,
    pub course: course::Model,
    pub subjects: Vec<subject::Model>,
}

#[utoipa::path(
    get, path = "/courses", tag = "courses",
    responses(
        (status = 200, description = "Courses with their subjects"),
        (status = 500, description = "Failed to list courses")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CourseWithSubjects>>, ApiError> {
    state
        .courses
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to list courses."))
}

#[utoipa::path(
    post, path = "/courses", tag = "courses",
    request_body = crate::openapi::CourseDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Name missing or malformed fieldId"),
        (status = 404, description = "Field not found (strict references only)"),
        (status = 500, description = "Failed to create course")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<Json<course::Model>, ApiError> {
    let field_id = optional_id(input.field_id.as_ref(), "fieldId")?;
    let name = input.name.unwrap_or_default();
    state
        .courses
        .create(&name, field_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to create course."))
}

#[utoipa::path(
    post, path = "/courses/{id}/add-subjects", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    request_body = crate::openapi::AddSubjectsDoc,
    responses(
        (status = 200, description = "Subjects created in input order"),
        (status = 400, description = "Invalid id, missing list or blank name"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Failed to add subjects to course")
    )
)]
pub async fn add_subjects(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<AddSubjectsInput>,
) -> Result<Json<AddSubjectsOutput>, ApiError> {
    let id = path_id(&id)?;
    let names = input
        .subjects
        .ok_or_else(|| ApiError::new(axum::http::StatusCode::BAD_REQUEST, "subjects must be a list of names"))?;
    let added = state
        .courses
        .add_subjects(id, &names)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to add subjects to course."))?;
    Ok(Json(AddSubjectsOutput {
        message: "Subjects added to course successfully.",
        course: added.course,
        subjects: added.subjects,
    }))
}

#[utoipa::path(
    get, path = "/courses/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course, or null when absent"),
        (status = 400, description = "Invalid id")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<course::Model>>, ApiError> {
    let id = path_id(&id)?;
    state
        .courses
        .get(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch course."))
}

#[utoipa::path(
    put, path = "/courses/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    request_body = crate::openapi::CourseDoc,
    responses(
        (status = 200, description = "Updated; an absent fieldId is cleared"),
        (status = 400, description = "Invalid id or blank name"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Failed to update course")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<Json<course::Model>, ApiError> {
    let id = path_id(&id)?;
    let changes = CourseChanges { name: input.name, field_id: optional_id(input.field_id.as_ref(), "fieldId")? };
    state
        .courses
        .update(id, changes)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to update course."))
}

#[utoipa::path(
    delete, path = "/courses/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted; subjects are kept"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Failed to delete course")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = path_id(&id)?;
    state
        .courses
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete course."))?;
    Ok(Json(Ack { message: "Course deleted successfully" }))
}

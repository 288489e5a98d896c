use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::{Dependency, ServiceError};
use thiserror::Error;
use tracing::error;

/// HTTP error rendered as `{"error": <message>}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Map a service failure onto a status code.
    ///
    /// Store failures are logged here and answered with `failure`, never with
    /// the underlying store message.
    pub fn from_service(e: ServiceError, failure: &'static str) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::DependencyNotFound(dep) => Self::new(StatusCode::NOT_FOUND, dependency_message(dep)),
            ServiceError::Db(detail) => {
                error!(error = %detail, "{}", failure);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
            }
        }
    }
}

fn dependency_message(dep: Dependency) -> &'static str {
    match dep {
        Dependency::Course => "Course not found. A subject can only be created for an existing course.",
        Dependency::Student => "Student not found. A subject can only be created for an existing student.",
        Dependency::Field => "Field not found. A course can only reference an existing field.",
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database setup failed: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_hide_detail() {
        let e = ApiError::from_service(ServiceError::Db("relation \"student\" does not exist".into()), "Failed to create student.");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Failed to create student.");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let e = ApiError::from_service(ServiceError::Validation("student name is required".into()), "unused");
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "student name is required");

        let e = ApiError::from_service(ServiceError::not_found("course"), "unused");
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "course not found");

        let e = ApiError::from_service(ServiceError::DependencyNotFound(Dependency::Student), "unused");
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert!(e.message.starts_with("Student not found"));
    }
}

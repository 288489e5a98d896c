use std::fmt;

use models::errors::ModelError;
use thiserror::Error;

/// Foreign entity a write depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Field,
    Course,
    Student,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dependency::Field => "field",
            Dependency::Course => "course",
            Dependency::Student => "student",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("referenced {0} not found")]
    DependencyNotFound(Dependency),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::NotFound(entity) => ServiceError::not_found(entity),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Db(e.to_string())
    }
}

/// Reject blank names before anything reaches the store.
pub fn require_name(entity: &str, name: &str) -> Result<(), ServiceError> {
    models::errors::validate_name(entity, name)?;
    Ok(())
}

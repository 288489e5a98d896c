use std::sync::Arc;

use models::subject;
use tracing::{debug, info, instrument};

use crate::errors::{require_name, Dependency, ServiceError};
use crate::ids::{resolve_required, RawId};
use crate::records::domain::{NewSubject, ReferencePolicy, SubjectChanges};
use crate::records::repository::RecordStore;

/// Subjects tie a student to a course.
///
/// Creation always checks both references, course first: when both are
/// missing the caller hears about the course.
pub struct SubjectService {
    store: Arc<dyn RecordStore>,
    policy: ReferencePolicy,
}

impl SubjectService {
    pub fn new(store: Arc<dyn RecordStore>, policy: ReferencePolicy) -> Self {
        Self { store, policy }
    }

    pub async fn list(&self) -> Result<Vec<subject::Model>, ServiceError> {
        self.store.list_subjects().await
    }

    pub async fn create(&self, name: &str, course_id: i32, student_id: i32) -> Result<subject::Model, ServiceError> {
        self.create_from_raw(name, Some(&RawId::from(course_id)), Some(&RawId::from(student_id)))
            .await
    }

    /// Create from ids as they arrive in a request body.
    ///
    /// The course id is parsed and looked up before the student id is even
    /// read, so a bad course always wins over a bad or missing student.
    #[instrument(skip(self, course_id, student_id))]
    pub async fn create_from_raw(
        &self,
        name: &str,
        course_id: Option<&RawId>,
        student_id: Option<&RawId>,
    ) -> Result<subject::Model, ServiceError> {
        let course_id = resolve_required(course_id, "courseId")?;
        self.ensure_course(course_id).await?;
        let student_id = resolve_required(student_id, "studentId")?;
        self.ensure_student(student_id).await?;
        require_name("subject", name)?;

        let created = self
            .store
            .create_subject(&NewSubject {
                name: name.to_string(),
                course_id: Some(course_id),
                student_id: Some(student_id),
            })
            .await?;
        info!(subject_id = created.id, course_id, student_id, "subject_created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<Option<subject::Model>, ServiceError> {
        self.store.find_subject(id).await
    }

    /// Both references are replaced; an absent one becomes null. They are only
    /// re-checked under [`ReferencePolicy::Strict`].
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: SubjectChanges) -> Result<subject::Model, ServiceError> {
        if let Some(name) = &changes.name {
            require_name("subject", name)?;
        }
        if self.policy.is_strict() {
            if self.store.find_subject(id).await?.is_none() {
                return Err(ServiceError::not_found("subject"));
            }
            if let Some(course_id) = changes.course_id {
                self.ensure_course(course_id).await?;
            }
            if let Some(student_id) = changes.student_id {
                self.ensure_student(student_id).await?;
            }
        }
        self.store.update_subject(id, &changes).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.delete_subject(id).await? {
            return Err(ServiceError::not_found("subject"));
        }
        info!(subject_id = id, "subject_deleted");
        Ok(())
    }

    async fn ensure_course(&self, course_id: i32) -> Result<(), ServiceError> {
        if self.store.find_course(course_id).await?.is_none() {
            debug!(course_id, "subject rejected: course missing");
            return Err(ServiceError::DependencyNotFound(Dependency::Course));
        }
        Ok(())
    }

    async fn ensure_student(&self, student_id: i32) -> Result<(), ServiceError> {
        if self.store.find_student(student_id).await?.is_none() {
            debug!(student_id, "subject rejected: student missing");
            return Err(ServiceError::DependencyNotFound(Dependency::Student));
        }
        Ok(())
    }
}

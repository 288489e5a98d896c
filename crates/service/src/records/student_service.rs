use std::sync::Arc;

use models::student;
use tracing::{info, instrument};

use crate::errors::{require_name, ServiceError};
use crate::records::domain::{StudentChanges, StudentWithCourse};
use crate::records::repository::RecordStore;
use crate::registration::RegistrationCode;

/// Students. Registration codes are always minted here, never taken from
/// the caller on create.
pub struct StudentService {
    store: Arc<dyn RecordStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<student::Model, ServiceError> {
        require_name("student", name)?;
        let code = RegistrationCode::generate();
        let created = self.store.create_student(code.as_str(), name).await?;
        info!(student_id = created.id, registration_code = %code, "student_created");
        Ok(created)
    }

    /// Every student with the course reached through its first subject.
    pub async fn list_with_course(&self) -> Result<Vec<StudentWithCourse>, ServiceError> {
        self.store.list_students_with_course().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        self.store.find_student(id).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: StudentChanges) -> Result<student::Model, ServiceError> {
        if let Some(name) = &changes.name {
            require_name("student", name)?;
        }
        self.store.update_student(id, &changes).await
    }

    /// Unconditional: the student's subjects stay behind with a dangling
    /// `studentId`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.delete_student(id).await? {
            return Err(ServiceError::not_found("student"));
        }
        info!(student_id = id, "student_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::domain::NewSubject;
    use crate::records::repo::seaorm::SeaOrmRecordStore;
    use crate::records::repository::mock::InMemoryRecordStore;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn create_mints_registration_code() -> Result<(), anyhow::Error> {
        let svc = StudentService::new(Arc::new(InMemoryRecordStore::new()));
        let s = svc.create("Ana").await?;
        assert!(RegistrationCode::is_well_formed(&s.registration_code));
        assert_eq!(s.name, "Ana");
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_name() {
        let svc = StudentService::new(Arc::new(InMemoryRecordStore::new()));
        assert!(matches!(svc.create("").await, Err(ServiceError::Validation(_))));
        assert!(svc.list_with_course().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_supplied_fields_only() -> Result<(), anyhow::Error> {
        let svc = StudentService::new(Arc::new(InMemoryRecordStore::new()));
        let s = svc.create("Ana").await?;

        let renamed = svc.update(s.id, StudentChanges { name: Some("Ana Maria".into()), registration_code: None }).await?;
        assert_eq!(renamed.name, "Ana Maria");
        assert_eq!(renamed.registration_code, s.registration_code);

        let recoded = svc
            .update(s.id, StudentChanges { name: None, registration_code: Some("00000ffffff".into()) })
            .await?;
        assert_eq!(recoded.registration_code, "00000ffffff");
        assert_eq!(recoded.name, "Ana Maria");
        Ok(())
    }

    #[tokio::test]
    async fn missing_student_is_soft_on_get_hard_on_write() -> Result<(), anyhow::Error> {
        let svc = StudentService::new(Arc::new(InMemoryRecordStore::new()));
        assert!(svc.get(123).await?.is_none());
        assert!(matches!(svc.update(123, StudentChanges::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(123).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_leaves_subjects_behind() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let svc = StudentService::new(store.clone());
        let s = svc.create("Ana").await?;
        let course = store.create_course("Math", None).await?;
        let sub = store
            .create_subject(&NewSubject { name: "Algebra".into(), course_id: Some(course.id), student_id: Some(s.id) })
            .await?;

        svc.delete(s.id).await?;
        let kept = store.find_subject(sub.id).await?.unwrap();
        assert_eq!(kept.student_id, Some(s.id));
        Ok(())
    }

    #[tokio::test]
    async fn student_crud_service_on_sqlite() -> Result<(), anyhow::Error> {
        let store = Arc::new(SeaOrmRecordStore::new(get_db().await?));
        let svc = StudentService::new(store.clone());

        let s = svc.create("Carla").await?;
        assert!(RegistrationCode::is_well_formed(&s.registration_code));
        let course = store.create_course("Chemistry", None).await?;
        store
            .create_subject(&NewSubject { name: "Organic".into(), course_id: Some(course.id), student_id: Some(s.id) })
            .await?;

        let listed = svc.list_with_course().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course_name.as_deref(), Some("Chemistry"));
        assert_eq!(listed[0].registration_code, s.registration_code);

        let updated = svc.update(s.id, StudentChanges { name: Some("Carla S.".into()), ..Default::default() }).await?;
        assert_eq!(updated.name, "Carla S.");

        svc.delete(s.id).await?;
        assert!(svc.get(s.id).await?.is_none());
        Ok(())
    }
}

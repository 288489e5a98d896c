use std::sync::Arc;

use models::course;
use tracing::{debug, info, instrument, warn};

use crate::errors::{require_name, Dependency, ServiceError};
use crate::records::domain::{AddedSubjects, CourseChanges, CourseWithSubjects, NewSubject, ReferencePolicy};
use crate::records::repository::RecordStore;

/// Courses and the bulk subject path.
///
/// Under [`ReferencePolicy::Lenient`] a course may point at a field that does
/// not exist.
pub struct CourseService {
    store: Arc<dyn RecordStore>,
    policy: ReferencePolicy,
}

impl CourseService {
    pub fn new(store: Arc<dyn RecordStore>, policy: ReferencePolicy) -> Self {
        Self { store, policy }
    }

    pub async fn list(&self) -> Result<Vec<CourseWithSubjects>, ServiceError> {
        self.store.list_courses_with_subjects().await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, field_id: Option<i32>) -> Result<course::Model, ServiceError> {
        require_name("course", name)?;
        self.check_field(field_id).await?;
        let created = self.store.create_course(name, field_id).await?;
        info!(course_id = created.id, field_id = ?created.field_id, "course_created");
        Ok(created)
    }

    /// Create one subject per name under an existing course, in input order.
    ///
    /// The subjects get no student. Names are all validated before the first
    /// write; a store failure part-way leaves the earlier subjects persisted.
    #[instrument(skip(self, names), fields(count = names.len()))]
    pub async fn add_subjects(&self, course_id: i32, names: &[String]) -> Result<AddedSubjects, ServiceError> {
        let course = self
            .store
            .find_course(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course"))?;
        for name in names {
            require_name("subject", name)?;
        }

        let mut subjects = Vec::with_capacity(names.len());
        for name in names {
            let input = NewSubject { name: name.clone(), course_id: Some(course.id), student_id: None };
            match self.store.create_subject(&input).await {
                Ok(created) => subjects.push(created),
                Err(e) => {
                    warn!(course_id, persisted = subjects.len(), error = %e, "add_subjects stopped part-way");
                    return Err(e);
                }
            }
        }
        info!(course_id, added = subjects.len(), "subjects_added_to_course");
        Ok(AddedSubjects { course, subjects })
    }

    pub async fn get(&self, id: i32) -> Result<Option<course::Model>, ServiceError> {
        self.store.find_course(id).await
    }

    /// `fieldId` is replaced; absent means null.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: CourseChanges) -> Result<course::Model, ServiceError> {
        if let Some(name) = &changes.name {
            require_name("course", name)?;
        }
        if self.policy.is_strict() && self.store.find_course(id).await?.is_none() {
            return Err(ServiceError::not_found("course"));
        }
        self.check_field(changes.field_id).await?;
        self.store.update_course(id, &changes).await
    }

    /// Unconditional: subjects of the course are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.delete_course(id).await? {
            return Err(ServiceError::not_found("course"));
        }
        info!(course_id = id, "course_deleted");
        Ok(())
    }

    async fn check_field(&self, field_id: Option<i32>) -> Result<(), ServiceError> {
        let Some(field_id) = field_id else { return Ok(()) };
        if !self.policy.is_strict() {
            return Ok(());
        }
        if self.store.find_field(field_id).await?.is_none() {
            debug!(field_id, "course rejected: field missing");
            return Err(ServiceError::DependencyNotFound(Dependency::Field));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::repo::seaorm::SeaOrmRecordStore;
    use crate::records::repository::mock::InMemoryRecordStore;
    use crate::records::subject_service::SubjectService;
    use crate::test_support::get_db;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn lenient_create_accepts_dangling_field() -> Result<(), anyhow::Error> {
        let svc = CourseService::new(Arc::new(InMemoryRecordStore::new()), ReferencePolicy::Lenient);
        let c = svc.create("Law", Some(999_999)).await?;
        assert_eq!(c.field_id, Some(999_999));
        Ok(())
    }

    #[tokio::test]
    async fn strict_create_rejects_dangling_field() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let svc = CourseService::new(store.clone(), ReferencePolicy::Strict);
        let err = svc.create("Law", Some(999_999)).await.unwrap_err();
        assert!(matches!(err, ServiceError::DependencyNotFound(Dependency::Field)));

        let field = store.create_field("Humanities").await?;
        let c = svc.create("Law", Some(field.id)).await?;
        assert_eq!(c.field_id, Some(field.id));
        assert!(svc.create("Ethics", None).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn add_subjects_creates_in_order_without_student() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let svc = CourseService::new(store.clone(), ReferencePolicy::Lenient);
        let c = svc.create("Math", None).await?;

        let added = svc.add_subjects(c.id, &names(&["A", "B", "C"])).await?;
        assert_eq!(added.course, c);
        assert_eq!(added.subjects.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert!(added.subjects.iter().all(|s| s.course_id == Some(c.id) && s.student_id.is_none()));
        assert!(added.subjects.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(store.list_subjects().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn add_subjects_to_missing_course_is_not_found() {
        let svc = CourseService::new(Arc::new(InMemoryRecordStore::new()), ReferencePolicy::Lenient);
        let err = svc.add_subjects(31337, &names(&["A"])).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_subjects_validates_every_name_before_writing() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let svc = CourseService::new(store.clone(), ReferencePolicy::Lenient);
        let c = svc.create("Math", None).await?;

        let err = svc.add_subjects(c.id, &names(&["A", "", "C"])).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(store.list_subjects().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn add_subjects_keeps_partial_progress_on_store_failure() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let svc = CourseService::new(store.clone(), ReferencePolicy::Lenient);
        let c = svc.create("Math", None).await?;

        store.fail_subject_inserts_after(2);
        let err = svc.add_subjects(c.id, &names(&["A", "B", "C"])).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));

        let kept = store.list_subjects().await?;
        assert_eq!(kept.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_field_reference() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let svc = CourseService::new(store.clone(), ReferencePolicy::Lenient);
        let field = store.create_field("Sciences").await?;
        let c = svc.create("Physics", Some(field.id)).await?;

        let updated = svc.update(c.id, CourseChanges { name: Some("Applied Physics".into()), field_id: None }).await?;
        assert_eq!(updated.name, "Applied Physics");
        assert_eq!(updated.field_id, None);

        let err = svc.update(c.id + 100, CourseChanges::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_does_not_cascade_to_subjects() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let courses = CourseService::new(store.clone(), ReferencePolicy::Lenient);
        let subjects = SubjectService::new(store.clone(), ReferencePolicy::Lenient);

        let c = courses.create("Math", None).await?;
        let student = store.create_student("00000abcdef", "Ana").await?;
        let sub = subjects.create("Algebra", c.id, student.id).await?;

        courses.delete(c.id).await?;
        assert!(courses.get(c.id).await?.is_none());
        let listed = subjects.list().await?;
        assert!(listed.iter().any(|s| s.id == sub.id && s.course_id == Some(c.id)));
        assert!(matches!(courses.delete(c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn course_listing_and_bulk_add_on_sqlite() -> Result<(), anyhow::Error> {
        let store = Arc::new(SeaOrmRecordStore::new(get_db().await?));
        let svc = CourseService::new(store.clone(), ReferencePolicy::Lenient);

        let c = svc.create("Biology", Some(999_999)).await?;
        let added = svc.add_subjects(c.id, &names(&["Cells", "Genetics", "Ecology"])).await?;
        assert_eq!(added.subjects.len(), 3);

        let listed = svc.list().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course.field_id, Some(999_999));
        assert_eq!(
            listed[0].subjects.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["Cells", "Genetics", "Ecology"]
        );

        svc.delete(c.id).await?;
        assert_eq!(store.list_subjects().await?.len(), 3);
        Ok(())
    }
}

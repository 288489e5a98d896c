use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::{course, field, student, subject};

use crate::errors::ServiceError;
use crate::records::domain::{
    project_students, CourseChanges, CourseWithSubjects, NewSubject, StudentChanges, StudentWithCourse, SubjectChanges,
};
use crate::records::repository::RecordStore;

/// SeaORM-backed store. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct SeaOrmRecordStore {
    pub db: DatabaseConnection,
}

impl SeaOrmRecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for SeaOrmRecordStore {
    async fn list_fields(&self) -> Result<Vec<field::Model>, ServiceError> {
        Ok(field::Entity::find().order_by_asc(field::Column::Id).all(&self.db).await?)
    }

    async fn find_field(&self, id: i32) -> Result<Option<field::Model>, ServiceError> {
        Ok(field::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_field(&self, name: &str) -> Result<field::Model, ServiceError> {
        Ok(field::create(&self.db, name).await?)
    }

    async fn update_field(&self, id: i32, name: &str) -> Result<field::Model, ServiceError> {
        Ok(field::rename(&self.db, id, name).await?)
    }

    async fn delete_field(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(field::delete(&self.db, id).await?)
    }

    async fn list_courses_with_subjects(&self) -> Result<Vec<CourseWithSubjects>, ServiceError> {
        let rows = course::Entity::find()
            .order_by_asc(course::Column::Id)
            .find_with_related(subject::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(course, mut subjects)| {
                subjects.sort_by_key(|s| s.id);
                CourseWithSubjects { course, subjects }
            })
            .collect())
    }

    async fn find_course(&self, id: i32) -> Result<Option<course::Model>, ServiceError> {
        Ok(course::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_course(&self, name: &str, field_id: Option<i32>) -> Result<course::Model, ServiceError> {
        Ok(course::create(&self.db, name, field_id).await?)
    }

    async fn update_course(&self, id: i32, changes: &CourseChanges) -> Result<course::Model, ServiceError> {
        Ok(course::update(&self.db, id, changes.name.as_deref(), changes.field_id).await?)
    }

    async fn delete_course(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(course::delete(&self.db, id).await?)
    }

    async fn list_students_with_course(&self) -> Result<Vec<StudentWithCourse>, ServiceError> {
        let students = student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?;
        if students.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i32> = students.iter().map(|s| s.id).collect();
        let subjects = subject::Entity::find()
            .filter(subject::Column::StudentId.is_in(student_ids))
            .filter(subject::Column::CourseId.is_not_null())
            .order_by_asc(subject::Column::Id)
            .all(&self.db)
            .await?;

        let mut course_ids: Vec<i32> = subjects.iter().filter_map(|s| s.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();
        let courses = if course_ids.is_empty() {
            Vec::new()
        } else {
            course::Entity::find()
                .filter(course::Column::Id.is_in(course_ids))
                .all(&self.db)
                .await?
        };

        Ok(project_students(students, &subjects, &courses))
    }

    async fn find_student(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_student(&self, registration_code: &str, name: &str) -> Result<student::Model, ServiceError> {
        Ok(student::create(&self.db, registration_code, name).await?)
    }

    async fn update_student(&self, id: i32, changes: &StudentChanges) -> Result<student::Model, ServiceError> {
        Ok(student::update(&self.db, id, changes.name.as_deref(), changes.registration_code.as_deref()).await?)
    }

    async fn delete_student(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(student::delete(&self.db, id).await?)
    }

    async fn list_subjects(&self) -> Result<Vec<subject::Model>, ServiceError> {
        Ok(subject::Entity::find().order_by_asc(subject::Column::Id).all(&self.db).await?)
    }

    async fn find_subject(&self, id: i32) -> Result<Option<subject::Model>, ServiceError> {
        Ok(subject::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_subject(&self, input: &NewSubject) -> Result<subject::Model, ServiceError> {
        Ok(subject::create(&self.db, &input.name, input.course_id, input.student_id).await?)
    }

    async fn update_subject(&self, id: i32, changes: &SubjectChanges) -> Result<subject::Model, ServiceError> {
        Ok(subject::update(&self.db, id, changes.name.as_deref(), changes.course_id, changes.student_id).await?)
    }

    async fn delete_subject(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(subject::delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn student_projection_left_joins_courses() -> Result<(), anyhow::Error> {
        let store = SeaOrmRecordStore::new(get_db().await?);

        let math = store.create_course("Math", None).await?;
        let ana = store.create_student("00000aaaaaa", "Ana").await?;
        let bea = store.create_student("00000bbbbbb", "Bea").await?;
        store
            .create_subject(&NewSubject { name: "Algebra".into(), course_id: Some(math.id), student_id: Some(ana.id) })
            .await?;

        let rows = store.list_students_with_course().await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, ana.id);
        assert_eq!(rows[0].course_name.as_deref(), Some("Math"));
        assert_eq!(rows[1].id, bea.id);
        assert_eq!(rows[1].course_name, None);
        Ok(())
    }

    #[tokio::test]
    async fn courses_nest_their_subjects() -> Result<(), anyhow::Error> {
        let store = SeaOrmRecordStore::new(get_db().await?);

        let a = store.create_course("A", None).await?;
        let b = store.create_course("B", None).await?;
        for name in ["a1", "a2"] {
            store
                .create_subject(&NewSubject { name: name.into(), course_id: Some(a.id), student_id: None })
                .await?;
        }

        let listed = store.list_courses_with_subjects().await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].course.id, a.id);
        assert_eq!(
            listed[0].subjects.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["a1", "a2"]
        );
        assert_eq!(listed[1].course.id, b.id);
        assert!(listed[1].subjects.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_rows_report_not_found() -> Result<(), anyhow::Error> {
        let store = SeaOrmRecordStore::new(get_db().await?);
        let err = store.update_field(404, "x").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(!store.delete_subject(404).await?);
        assert!(store.find_course(404).await?.is_none());
        Ok(())
    }
}

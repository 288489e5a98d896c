use async_trait::async_trait;
use models::{course, field, student, subject};

use super::domain::{CourseChanges, CourseWithSubjects, NewSubject, StudentChanges, StudentWithCourse, SubjectChanges};
use crate::errors::ServiceError;

/// Persistence port for the four record entities.
///
/// Implementations translate to and from the data model and carry no
/// business rules: no dependency checks, no code generation. `find_*`
/// returns `None` for a missing row, `update_*` fails with
/// `ServiceError::NotFound`, and `delete_*` reports whether a row was removed.
/// Deletes never touch dependent rows.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_fields(&self) -> Result<Vec<field::Model>, ServiceError>;
    async fn find_field(&self, id: i32) -> Result<Option<field::Model>, ServiceError>;
    async fn create_field(&self, name: &str) -> Result<field::Model, ServiceError>;
    async fn update_field(&self, id: i32, name: &str) -> Result<field::Model, ServiceError>;
    async fn delete_field(&self, id: i32) -> Result<bool, ServiceError>;

    /// Courses in id order, each with its subjects (one level).
    async fn list_courses_with_subjects(&self) -> Result<Vec<CourseWithSubjects>, ServiceError>;
    async fn find_course(&self, id: i32) -> Result<Option<course::Model>, ServiceError>;
    async fn create_course(&self, name: &str, field_id: Option<i32>) -> Result<course::Model, ServiceError>;
    async fn update_course(&self, id: i32, changes: &CourseChanges) -> Result<course::Model, ServiceError>;
    async fn delete_course(&self, id: i32) -> Result<bool, ServiceError>;

    /// Denormalized student listing, see [`super::domain::project_students`].
    async fn list_students_with_course(&self) -> Result<Vec<StudentWithCourse>, ServiceError>;
    async fn find_student(&self, id: i32) -> Result<Option<student::Model>, ServiceError>;
    async fn create_student(&self, registration_code: &str, name: &str) -> Result<student::Model, ServiceError>;
    async fn update_student(&self, id: i32, changes: &StudentChanges) -> Result<student::Model, ServiceError>;
    async fn delete_student(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_subjects(&self) -> Result<Vec<subject::Model>, ServiceError>;
    async fn find_subject(&self, id: i32) -> Result<Option<subject::Model>, ServiceError>;
    async fn create_subject(&self, input: &NewSubject) -> Result<subject::Model, ServiceError>;
    async fn update_subject(&self, id: i32, changes: &SubjectChanges) -> Result<subject::Model, ServiceError>;
    async fn delete_subject(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    use crate::records::domain::project_students;

    #[derive(Default)]
    struct Tables {
        fields: BTreeMap<i32, field::Model>,
        courses: BTreeMap<i32, course::Model>,
        students: BTreeMap<i32, student::Model>,
        subjects: BTreeMap<i32, subject::Model>,
        next_id: i32,
        // remaining subject inserts before failures start
        subject_insert_budget: Option<usize>,
        offline: bool,
    }

    impl Tables {
        fn next_id(&mut self) -> i32 {
            self.next_id += 1;
            self.next_id
        }

        fn check_online(&self) -> Result<(), ServiceError> {
            if self.offline {
                return Err(ServiceError::Db("connection refused (in-memory store offline)".into()));
            }
            Ok(())
        }
    }

    /// Ids are drawn from one counter shared by all tables, so they are unique
    /// across entities as well; listings are in id order.
    #[derive(Default)]
    pub struct InMemoryRecordStore {
        tables: Mutex<Tables>,
    }

    impl InMemoryRecordStore {
        pub fn new() -> Self {
            Self::default()
        }

        fn tables(&self) -> Result<MutexGuard<'_, Tables>, ServiceError> {
            self.tables
                .lock()
                .map_err(|_| ServiceError::Db("in-memory store lock poisoned".into()))
        }

        /// Make every subsequent operation fail with a store error.
        pub fn set_offline(&self, offline: bool) {
            if let Ok(mut t) = self.tables.lock() {
                t.offline = offline;
            }
        }

        /// Allow `n` more subject inserts, then fail the rest.
        pub fn fail_subject_inserts_after(&self, n: usize) {
            if let Ok(mut t) = self.tables.lock() {
                t.subject_insert_budget = Some(n);
            }
        }
    }

    #[async_trait]
    impl RecordStore for InMemoryRecordStore {
        async fn list_fields(&self) -> Result<Vec<field::Model>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            Ok(t.fields.values().cloned().collect())
        }

        async fn find_field(&self, id: i32) -> Result<Option<field::Model>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            Ok(t.fields.get(&id).cloned())
        }

        async fn create_field(&self, name: &str) -> Result<field::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let id = t.next_id();
            let row = field::Model { id, name: name.to_string() };
            t.fields.insert(id, row.clone());
            Ok(row)
        }

        async fn update_field(&self, id: i32, name: &str) -> Result<field::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let row = t.fields.get_mut(&id).ok_or_else(|| ServiceError::not_found("field"))?;
            row.name = name.to_string();
            Ok(row.clone())
        }

        async fn delete_field(&self, id: i32) -> Result<bool, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            Ok(t.fields.remove(&id).is_some())
        }

        async fn list_courses_with_subjects(&self) -> Result<Vec<CourseWithSubjects>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            Ok(t.courses
                .values()
                .map(|c| CourseWithSubjects {
                    course: c.clone(),
                    subjects: t.subjects.values().filter(|s| s.course_id == Some(c.id)).cloned().collect(),
                })
                .collect())
        }

        async fn find_course(&self, id: i32) -> Result<Option<course::Model>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            Ok(t.courses.get(&id).cloned())
        }

        async fn create_course(&self, name: &str, field_id: Option<i32>) -> Result<course::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let id = t.next_id();
            let row = course::Model { id, name: name.to_string(), field_id };
            t.courses.insert(id, row.clone());
            Ok(row)
        }

        async fn update_course(&self, id: i32, changes: &CourseChanges) -> Result<course::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let row = t.courses.get_mut(&id).ok_or_else(|| ServiceError::not_found("course"))?;
            if let Some(name) = &changes.name {
                row.name = name.clone();
            }
            row.field_id = changes.field_id;
            Ok(row.clone())
        }

        async fn delete_course(&self, id: i32) -> Result<bool, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            Ok(t.courses.remove(&id).is_some())
        }

        async fn list_students_with_course(&self) -> Result<Vec<StudentWithCourse>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            let subjects: Vec<subject::Model> = t.subjects.values().cloned().collect();
            let courses: Vec<course::Model> = t.courses.values().cloned().collect();
            Ok(project_students(t.students.values().cloned().collect(), &subjects, &courses))
        }

        async fn find_student(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            Ok(t.students.get(&id).cloned())
        }

        async fn create_student(&self, registration_code: &str, name: &str) -> Result<student::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let id = t.next_id();
            let row = student::Model { id, registration_code: registration_code.to_string(), name: name.to_string() };
            t.students.insert(id, row.clone());
            Ok(row)
        }

        async fn update_student(&self, id: i32, changes: &StudentChanges) -> Result<student::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let row = t.students.get_mut(&id).ok_or_else(|| ServiceError::not_found("student"))?;
            if let Some(name) = &changes.name {
                row.name = name.clone();
            }
            if let Some(code) = &changes.registration_code {
                row.registration_code = code.clone();
            }
            Ok(row.clone())
        }

        async fn delete_student(&self, id: i32) -> Result<bool, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            Ok(t.students.remove(&id).is_some())
        }

        async fn list_subjects(&self) -> Result<Vec<subject::Model>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            Ok(t.subjects.values().cloned().collect())
        }

        async fn find_subject(&self, id: i32) -> Result<Option<subject::Model>, ServiceError> {
            let t = self.tables()?;
            t.check_online()?;
            Ok(t.subjects.get(&id).cloned())
        }

        async fn create_subject(&self, input: &NewSubject) -> Result<subject::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let budget = t.subject_insert_budget;
            match budget {
                Some(0) => return Err(ServiceError::Db("subject insert rejected by store".into())),
                Some(n) => t.subject_insert_budget = Some(n - 1),
                None => {}
            }
            let id = t.next_id();
            let row = subject::Model {
                id,
                name: input.name.clone(),
                course_id: input.course_id,
                student_id: input.student_id,
            };
            t.subjects.insert(id, row.clone());
            Ok(row)
        }

        async fn update_subject(&self, id: i32, changes: &SubjectChanges) -> Result<subject::Model, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            let row = t.subjects.get_mut(&id).ok_or_else(|| ServiceError::not_found("subject"))?;
            if let Some(name) = &changes.name {
                row.name = name.clone();
            }
            row.course_id = changes.course_id;
            row.student_id = changes.student_id;
            Ok(row.clone())
        }

        async fn delete_subject(&self, id: i32) -> Result<bool, ServiceError> {
            let mut t = self.tables()?;
            t.check_online()?;
            Ok(t.subjects.remove(&id).is_some())
        }
    }
}

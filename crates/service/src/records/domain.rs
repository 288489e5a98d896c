use std::collections::HashMap;

use models::{course, student, subject};
use serde::{Deserialize, Serialize};

/// How strictly supplied foreign keys are checked outside `Subject::create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Course field ids and subject updates are written as given.
    #[default]
    Lenient,
    /// Every supplied reference must resolve to an existing row.
    Strict,
}

impl ReferencePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Student row joined with the course of its earliest subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithCourse {
    pub id: i32,
    pub registration_code: String,
    pub name: String,
    pub course_id: Option<i32>,
    pub course_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseWithSubjects {
    #[serde(flatten)]
    pub course: course::Model,
    pub subjects: Vec<subject::Model>,
}

/// Result of the bulk add-subjects operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedSubjects {
    pub course: course::Model,
    pub subjects: Vec<subject::Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub field_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub registration_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    pub course_id: Option<i32>,
    pub student_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectChanges {
    pub name: Option<String>,
    pub course_id: Option<i32>,
    pub student_id: Option<i32>,
}

/// Left-join students onto courses through their subjects.
///
/// `students` keeps its order. For each student the earliest subject (lowest
/// id) carrying a course id decides the course; a dangling course id keeps
/// `course_id` and leaves `course_name` empty.
pub fn project_students(
    students: Vec<student::Model>,
    subjects: &[subject::Model],
    courses: &[course::Model],
) -> Vec<StudentWithCourse> {
    let course_names: HashMap<i32, &str> = courses.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut first_course: HashMap<i32, (i32, i32)> = HashMap::new();
    for sub in subjects {
        let (Some(student_id), Some(course_id)) = (sub.student_id, sub.course_id) else {
            continue;
        };
        first_course
            .entry(student_id)
            .and_modify(|(sub_id, cid)| {
                if sub.id < *sub_id {
                    *sub_id = sub.id;
                    *cid = course_id;
                }
            })
            .or_insert((sub.id, course_id));
    }

    students
        .into_iter()
        .map(|s| {
            let course_id = first_course.get(&s.id).map(|(_, cid)| *cid);
            let course_name = course_id
                .and_then(|cid| course_names.get(&cid))
                .map(|name| name.to_string());
            StudentWithCourse {
                id: s.id,
                registration_code: s.registration_code,
                name: s.name,
                course_id,
                course_name,
            }
        })
        .collect()
}

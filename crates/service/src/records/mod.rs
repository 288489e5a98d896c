//! Record services: students, subjects, courses and fields of study.
//!
//! Each service owns the relationship rules for its entity and delegates
//! persistence to a shared [`repository::RecordStore`].

pub mod domain;
pub mod repository;
pub mod repo;
pub mod field_service;
pub mod course_service;
pub mod student_service;
pub mod subject_service;

pub use course_service::CourseService;
pub use domain::ReferencePolicy;
pub use field_service::FieldService;
pub use repository::RecordStore;
pub use student_service::StudentService;
pub use subject_service::SubjectService;

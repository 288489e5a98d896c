use std::sync::Arc;

use service::records::{CourseService, FieldService, RecordStore, ReferencePolicy, StudentService, SubjectService};

/// Services shared by every handler. All of them sit on the same store.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<StudentService>,
    pub subjects: Arc<SubjectService>,
    pub courses: Arc<CourseService>,
    pub fields: Arc<FieldService>,
}

impl ServerState {
    pub fn new(store: Arc<dyn RecordStore>, policy: ReferencePolicy) -> Self {
        Self {
            students: Arc::new(StudentService::new(Arc::clone(&store))),
            subjects: Arc::new(SubjectService::new(Arc::clone(&store), policy)),
            courses: Arc::new(CourseService::new(Arc::clone(&store), policy)),
            fields: Arc::new(FieldService::new(store)),
        }
    }
}

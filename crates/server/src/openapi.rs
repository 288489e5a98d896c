use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct CreateStudentDoc {
    pub name: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateStudentDoc {
    pub name: Option<String>,
    pub registration_code: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateSubjectDoc {
    pub name: String,
    pub course_id: i32,
    pub student_id: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateSubjectDoc {
    pub name: Option<String>,
    pub course_id: Option<i32>,
    pub student_id: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CourseDoc {
    pub name: Option<String>,
    pub field_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct AddSubjectsDoc {
    pub subjects: Vec<String>,
}

#[derive(ToSchema)]
pub struct FieldDoc {
    pub name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::create,
        crate::routes::students::get,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::subjects::list,
        crate::routes::subjects::create,
        crate::routes::subjects::get,
        crate::routes::subjects::update,
        crate::routes::subjects::delete,
        crate::routes::courses::list,
        crate::routes::courses::create,
        crate::routes::courses::add_subjects,
        crate::routes::courses::get,
        crate::routes::courses::update,
        crate::routes::courses::delete,
        crate::routes::fields::list,
        crate::routes::fields::create,
        crate::routes::fields::get,
        crate::routes::fields::update,
        crate::routes::fields::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreateStudentDoc,
            UpdateStudentDoc,
            CreateSubjectDoc,
            UpdateSubjectDoc,
            CourseDoc,
            AddSubjectsDoc,
            FieldDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students"),
        (name = "subjects"),
        (name = "courses"),
        (name = "fields")
    )
)]
pub struct ApiDoc;

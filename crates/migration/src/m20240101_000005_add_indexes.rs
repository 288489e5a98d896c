use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Course: lookups by field
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_field")
                    .table(Course::Table)
                    .col(Course::FieldId)
                    .to_owned(),
            )
            .await?;

        // Subject: nested listing under a course
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subject_course")
                    .table(Subject::Table)
                    .col(Subject::CourseId)
                    .to_owned(),
            )
            .await?;

        // Subject: student projection
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subject_student")
                    .table(Subject::Table)
                    .col(Subject::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_registration_code")
                    .table(Student::Table)
                    .col(Student::RegistrationCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_student_registration_code").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_subject_student").table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_subject_course").table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_course_field").table(Course::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Course { Table, FieldId }

#[derive(DeriveIden)]
enum Subject { Table, CourseId, StudentId }

#[derive(DeriveIden)]
enum Student { Table, RegistrationCode }

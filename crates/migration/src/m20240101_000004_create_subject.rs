//! Create `subject` table.
//!
//! Deleting a course or student must leave its subjects in place, so the
//! reference columns have no FK constraint and no cascade.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subject::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Subject::CourseId).integer().null())
                    .col(ColumnDef::new(Subject::StudentId).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Subject::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Subject { Table, Id, Name, CourseId, StudentId }

use crate::m20250710_create_courses_table::Courses;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Instructor dashboards list courses by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_instructor_email")
                    .table(Courses::Table)
                    .col(Courses::InstructorEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_category")
                    .table(Courses::Table)
                    .col(Courses::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_created_at")
                    .table(Courses::Table)
                    .col(Courses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Student dashboards use jsonb containment on enrolled_students
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_courses_enrolled_students \
                 ON courses USING GIN (enrolled_students)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_courses_enrolled_students",
            "idx_courses_created_at",
            "idx_courses_category",
            "idx_courses_instructor_email",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Courses::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}

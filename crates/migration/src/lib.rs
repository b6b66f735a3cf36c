pub use sea_orm_migration::prelude::*;

mod m20250710_create_courses_table;
mod m20250711_add_course_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250710_create_courses_table::Migration),
            Box::new(m20250711_add_course_indexes::Migration),
        ]
    }
}

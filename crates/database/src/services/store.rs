use futures::future::BoxFuture;
use models::{
    course::{CourseError, CourseRecord, NewCourse},
    score::Score,
};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("course {0} not found")]
    NotFound(String),
    #[error("invalid course data: {0}")]
    Invalid(#[from] CourseError),
    #[error("stored {column} of course {course} is unreadable")]
    Corrupt { course: String, column: &'static str },
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("failed to encode course data: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("course store is unavailable")]
    Unavailable,
}

/// Where course records live
///
/// Reads return fresh snapshots. Writes go straight to the store and are
/// only visible through a later read.
pub trait CourseStore: Send + Sync {
    /// All courses in creation order
    fn fetch_courses(&self) -> BoxFuture<'_, Result<Vec<CourseRecord>, StoreError>>;

    fn fetch_course<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<Option<CourseRecord>, StoreError>>;

    /// Courses published under the given instructor email
    fn fetch_instructor_courses<'a>(
        &'a self,
        instructor_email: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CourseRecord>, StoreError>>;

    /// Courses the user is enrolled in
    fn fetch_enrolled_courses<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CourseRecord>, StoreError>>;

    fn create_course(
        &self,
        course: NewCourse,
        instructor_email: String,
    ) -> BoxFuture<'_, Result<CourseRecord, StoreError>>;

    /// Adds the user to the course's students. Enrolling twice is a no-op.
    fn enroll<'a>(&'a self, id: &'a str, user_id: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Records the user's rating, replacing any earlier one
    fn submit_rating<'a>(
        &'a self,
        id: &'a str,
        user_id: &'a str,
        score: Score,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    fn update_title<'a>(
        &'a self,
        id: &'a str,
        title: String,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    fn delete_course<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;
}

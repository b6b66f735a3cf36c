use crate::aggregate::AsCourse;
use models::score::Score;

/// Whether the user is enrolled in the course
pub fn is_enrolled<T: AsCourse>(record: &T, user_id: &str) -> bool {
    record
        .course()
        .enrolled_students
        .iter()
        .any(|student| student == user_id)
}

/// The rating the user gave the course, if any
pub fn user_rating<T: AsCourse>(record: &T, user_id: &str) -> Option<Score> {
    record.course().ratings.get(user_id).copied()
}

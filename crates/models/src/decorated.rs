use crate::course::CourseRecord;

/// A course together with the display fields derived from it
///
/// The derived fields are recomputed from `course` on every query and are
/// never written back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedCourse {
    pub course: CourseRecord,
    /// URL of the first attached file, or empty
    pub image_url: String,
    pub enrolled_students_count: usize,
    /// Mean of all ratings, or 0 when the course is unrated
    pub average_rating: f64,
}

impl DecoratedCourse {
    pub fn id(&self) -> &str {
        &self.course.id
    }

    pub fn is_rated(&self) -> bool {
        !self.course.ratings.is_empty()
    }
}

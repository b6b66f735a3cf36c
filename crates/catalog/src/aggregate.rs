use models::{
    course::{CourseRecord, UserId},
    decorated::DecoratedCourse,
    score::Score,
};
use std::collections::BTreeMap;

/// Anything that carries a course record
pub trait AsCourse {
    fn course(&self) -> &CourseRecord;
}

impl AsCourse for CourseRecord {
    fn course(&self) -> &CourseRecord {
        self
    }
}

impl AsCourse for DecoratedCourse {
    fn course(&self) -> &CourseRecord {
        &self.course
    }
}

/// Computes the display fields of a course
pub trait Decorate {
    fn decorate(&self) -> DecoratedCourse;
}

impl Decorate for CourseRecord {
    fn decorate(&self) -> DecoratedCourse {
        DecoratedCourse {
            course: self.clone(),
            image_url: self
                .files
                .first()
                .map(|file| file.url.clone())
                .unwrap_or_default(),
            enrolled_students_count: self.enrolled_students.len(),
            average_rating: average_rating(&self.ratings),
        }
    }
}

// Derived fields are rebuilt from the record, never carried over
impl Decorate for DecoratedCourse {
    fn decorate(&self) -> DecoratedCourse {
        self.course.decorate()
    }
}

/// Arithmetic mean of the ratings, or 0 when there are none
pub fn average_rating(ratings: &BTreeMap<UserId, Score>) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let total: f64 = ratings.values().map(|score| score.value()).sum();
    (total / ratings.len() as f64).clamp(Score::MIN, Score::MAX)
}

/// Decorates every record, preserving order
pub fn decorate_all<T: AsCourse>(records: &[T]) -> Vec<DecoratedCourse> {
    records
        .iter()
        .map(|record| record.course().decorate())
        .collect()
}

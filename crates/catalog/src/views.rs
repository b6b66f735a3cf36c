use crate::{
    aggregate::{AsCourse, Decorate, decorate_all},
    enrollment::user_rating,
    rank::{FEATURED_LIMIT, TRENDING_LIMIT, featured, rank_by_rating},
};
use models::{category::PopularCategory, decorated::DecoratedCourse};

/// How many courses the home page shows in each row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimits {
    pub featured: usize,
    pub trending: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            featured: FEATURED_LIMIT,
            trending: TRENDING_LIMIT,
        }
    }
}

/// Everything the home page renders from one catalog snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub featured: Vec<DecoratedCourse>,
    pub popular_categories: Vec<String>,
    pub trending: Vec<DecoratedCourse>,
    pub courses: Vec<DecoratedCourse>,
}

/// A course on a student's dashboard along with the rating they gave it
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolledCourse {
    pub course: DecoratedCourse,
    pub user_rating: Option<f64>,
}

pub fn home_view<T: AsCourse>(records: &[T], limits: ViewLimits) -> HomeView {
    HomeView {
        featured: featured(records, limits.featured),
        popular_categories: PopularCategory::names(),
        trending: rank_by_rating(records, limits.trending),
        courses: decorate_all(records),
    }
}

/// Decorated courses for an instructor's dashboard
///
/// The caller supplies only the instructor's own courses.
pub fn managed_courses<T: AsCourse>(records: &[T]) -> Vec<DecoratedCourse> {
    decorate_all(records)
}

/// Decorated courses for a student's dashboard
pub fn enrolled_courses<T: AsCourse>(records: &[T], user_id: &str) -> Vec<EnrolledCourse> {
    records
        .iter()
        .map(|record| EnrolledCourse {
            course: record.course().decorate(),
            user_rating: user_rating(record, user_id).map(f64::from),
        })
        .collect()
}

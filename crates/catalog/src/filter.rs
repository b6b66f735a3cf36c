use crate::aggregate::AsCourse;

/// Courses in the given category, in input order
///
/// The comparison is exact and case-sensitive. Without a category the input
/// is returned unfiltered.
pub fn filter_by_category<T: AsCourse + Clone>(records: &[T], category: Option<&str>) -> Vec<T> {
    match category {
        Some(category) => records
            .iter()
            .filter(|record| record.course().category == category)
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}

/// Courses whose title or instructor name contains `query`, ignoring case
///
/// A blank query matches nothing. Callers that want the whole catalog for an
/// empty search box have to handle that case themselves.
pub fn search<T: AsCourse + Clone>(records: &[T], query: &str) -> Vec<T> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            let course = record.course();
            course.title.to_lowercase().contains(&query)
                || course.instructor_name.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

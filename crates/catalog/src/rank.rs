use crate::aggregate::{AsCourse, Decorate};
use log::debug;
use models::decorated::DecoratedCourse;

/// Number of courses shown in the featured row
pub const FEATURED_LIMIT: usize = 3;

/// Number of courses shown in the trending row
pub const TRENDING_LIMIT: usize = 3;

/// Ranks rated courses by average rating, highest first
///
/// Unrated courses are left out. Courses with equal averages keep their
/// input order.
///
/// # Arguments
/// * `records` - The catalog snapshot
/// * `limit` - The maximum number of courses to return
pub fn rank_by_rating<T: AsCourse>(records: &[T], limit: usize) -> Vec<DecoratedCourse> {
    let mut rated: Vec<DecoratedCourse> = records
        .iter()
        .filter_map(|record| {
            let decorated = record.course().decorate();
            if decorated.is_rated() {
                Some(decorated)
            } else {
                debug!("No ratings found for course {}", decorated.id());
                None
            }
        })
        .collect();

    // `sort_by` is stable, so ties keep input order
    rated.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    rated.truncate(limit);

    rated
}

/// The top rated courses
pub fn trending<T: AsCourse>(records: &[T]) -> Vec<DecoratedCourse> {
    rank_by_rating(records, TRENDING_LIMIT)
}

/// The first `limit` courses of the catalog, unranked
pub fn featured<T: AsCourse>(records: &[T], limit: usize) -> Vec<DecoratedCourse> {
    records
        .iter()
        .take(limit)
        .map(|record| record.course().decorate())
        .collect()
}

#[cfg(test)]
mod test {
    use super::{featured, rank_by_rating, trending};
    use models::{course::CourseRecord, score::Score};

    fn course(id: &str, scores: &[f64]) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            ratings: scores
                .iter()
                .enumerate()
                .map(|(idx, score)| (format!("u{idx}"), Score::new(*score).unwrap()))
                .collect(),
            ..Default::default()
        }
    }

    fn ids(courses: &[models::decorated::DecoratedCourse]) -> Vec<&str> {
        courses.iter().map(|course| course.id()).collect()
    }

    #[test]
    fn test_rank_excludes_unrated_and_keeps_ties_stable() {
        let records = vec![
            course("a", &[5.0, 3.0]),
            course("b", &[]),
            course("c", &[4.0]),
        ];

        let ranked = rank_by_rating(&records, 3);

        assert_eq!(ids(&ranked), vec!["a", "c"]);
        assert_eq!(ranked[0].average_rating, 4.0);
        assert_eq!(ranked[1].average_rating, 4.0);
    }

    #[test]
    fn test_rank_orders_descending_and_respects_limit() {
        let records = vec![
            course("low", &[1.0]),
            course("high", &[5.0]),
            course("mid", &[3.0, 4.0]),
            course("top", &[5.0, 5.0]),
        ];

        let ranked = rank_by_rating(&records, 2);

        assert_eq!(ids(&ranked), vec!["high", "top"]);
        assert!(ranked.len() <= 2);
        assert!(
            ranked
                .windows(2)
                .all(|pair| pair[0].average_rating >= pair[1].average_rating)
        );
    }

    #[test]
    fn test_rank_with_zero_limit_is_empty() {
        assert!(rank_by_rating(&[course("a", &[5.0])], 0).is_empty());
    }

    #[test]
    fn test_trending_uses_top_three() {
        let records: Vec<_> = (1..=5)
            .map(|n| course(&format!("c{n}"), &[n as f64]))
            .collect();

        assert_eq!(ids(&trending(&records)), vec!["c5", "c4", "c3"]);
    }

    #[test]
    fn test_featured_is_unranked_prefix() {
        let records = vec![
            course("a", &[]),
            course("b", &[1.0]),
            course("c", &[5.0]),
            course("d", &[5.0]),
        ];

        let featured = featured(&records, 3);

        assert_eq!(ids(&featured), vec!["a", "b", "c"]);
        assert_eq!(featured[0].average_rating, 0.0);
    }
}

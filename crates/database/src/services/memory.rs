use crate::services::store::{CourseStore, StoreError};
use futures::{
    FutureExt,
    future::{BoxFuture, ready},
};
use log::info;
use models::{
    course::{CourseRecord, NewCourse, validate_title},
    score::Score,
};
use std::sync::RwLock;
use uuid::Uuid;

/// Course store kept in process memory, for tests and local development
#[derive(Debug, Default)]
pub struct MemoryCourseStore {
    courses: RwLock<Vec<CourseRecord>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given courses, kept in order
    pub fn with_courses(courses: Vec<CourseRecord>) -> Self {
        Self {
            courses: RwLock::new(courses),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&[CourseRecord]) -> T) -> Result<T, StoreError> {
        let courses = self.courses.read().map_err(|_| StoreError::Unavailable)?;
        Ok(f(&courses))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Vec<CourseRecord>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut courses = self.courses.write().map_err(|_| StoreError::Unavailable)?;
        f(&mut courses)
    }

    fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut CourseRecord) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.write(|courses| {
            let course = courses
                .iter_mut()
                .find(|course| course.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            f(course)
        })
    }

    fn filtered(
        &self,
        predicate: impl Fn(&CourseRecord) -> bool,
    ) -> Result<Vec<CourseRecord>, StoreError> {
        self.read(|courses| {
            courses
                .iter()
                .filter(|course| predicate(course))
                .cloned()
                .collect()
        })
    }

    fn insert(
        &self,
        new_course: NewCourse,
        instructor_email: String,
    ) -> Result<CourseRecord, StoreError> {
        new_course.validate()?;

        let record = new_course.into_record(Uuid::new_v4().to_string(), instructor_email);
        self.write(|courses| {
            courses.push(record.clone());
            Ok(())
        })?;

        info!("Created course {} ({})", record.id, record.title);
        Ok(record)
    }
}

impl CourseStore for MemoryCourseStore {
    fn fetch_courses(&self) -> BoxFuture<'_, Result<Vec<CourseRecord>, StoreError>> {
        ready(self.read(<[CourseRecord]>::to_vec)).boxed()
    }

    fn fetch_course<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<Option<CourseRecord>, StoreError>> {
        ready(self.read(|courses| courses.iter().find(|course| course.id == id).cloned())).boxed()
    }

    fn fetch_instructor_courses<'a>(
        &'a self,
        instructor_email: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CourseRecord>, StoreError>> {
        ready(self.filtered(|course| course.instructor_email == instructor_email)).boxed()
    }

    fn fetch_enrolled_courses<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CourseRecord>, StoreError>> {
        ready(self.filtered(|course| {
            course
                .enrolled_students
                .iter()
                .any(|student| student == user_id)
        }))
        .boxed()
    }

    fn create_course(
        &self,
        course: NewCourse,
        instructor_email: String,
    ) -> BoxFuture<'_, Result<CourseRecord, StoreError>> {
        ready(self.insert(course, instructor_email)).boxed()
    }

    fn enroll<'a>(&'a self, id: &'a str, user_id: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        let result = self.update(id, |course| {
            if !course.enrolled_students.iter().any(|student| student == user_id) {
                course.enrolled_students.push(user_id.to_string());
            }
            Ok(())
        });

        ready(result).boxed()
    }

    fn submit_rating<'a>(
        &'a self,
        id: &'a str,
        user_id: &'a str,
        score: Score,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        let result = self.update(id, |course| {
            course.ratings.insert(user_id.to_string(), score);
            Ok(())
        });

        ready(result).boxed()
    }

    fn update_title<'a>(
        &'a self,
        id: &'a str,
        title: String,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        let result = validate_title(&title).map_err(StoreError::from).and_then(|()| {
            self.update(id, |course| {
                course.title = title;
                Ok(())
            })
        });

        ready(result).boxed()
    }

    fn delete_course<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        let result = self.write(|courses| {
            let before = courses.len();
            courses.retain(|course| course.id != id);

            if courses.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }

            Ok(())
        });

        ready(result).boxed()
    }
}

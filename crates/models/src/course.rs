use crate::score::Score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Identifier of a user as issued by the identity provider
pub type UserId = String;

/// An uploaded file attached to a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    /// MIME type reported at upload time
    #[serde(rename = "type", default)]
    pub content_type: String,
}

/// A course as owned by the course store
///
/// Collections that are missing from a stored document deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub instructor_name: String,
    #[serde(default)]
    pub instructor_email: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub files: Vec<Attachment>,
    #[serde(default)]
    pub enrolled_students: Vec<UserId>,
    #[serde(default)]
    pub ratings: BTreeMap<UserId, Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Why a course cannot be published
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CourseError {
    #[error("title must not be blank")]
    BlankTitle,
    #[error("price {0} is not a valid amount")]
    InvalidPrice(f64),
    #[error("at least one file must be attached")]
    NoFiles,
}

/// Rejects titles that would render as nothing
pub fn validate_title(title: &str) -> Result<(), CourseError> {
    if title.trim().is_empty() {
        return Err(CourseError::BlankTitle);
    }

    Ok(())
}

/// The fields an instructor supplies when creating a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub instructor_name: String,
    pub files: Vec<Attachment>,
}

impl NewCourse {
    /// Checks the course can be published
    pub fn validate(&self) -> Result<(), CourseError> {
        validate_title(&self.title)?;

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CourseError::InvalidPrice(self.price));
        }

        if self.files.is_empty() {
            return Err(CourseError::NoFiles);
        }

        Ok(())
    }

    /// Builds the stored record for this course
    pub fn into_record(self, id: String, instructor_email: String) -> CourseRecord {
        CourseRecord {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            instructor_name: self.instructor_name,
            instructor_email,
            price: self.price,
            files: self.files,
            enrolled_students: Vec::new(),
            ratings: BTreeMap::new(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Attachment, CourseError, CourseRecord, NewCourse};

    fn new_course() -> NewCourse {
        NewCourse {
            title: "Rust for Pythonistas".to_string(),
            description: "Ownership without tears".to_string(),
            price: 49.0,
            category: "Programming".to_string(),
            instructor_name: "Ada".to_string(),
            files: vec![Attachment {
                url: "https://cdn.example.com/cover.png".to_string(),
                content_type: "image/png".to_string(),
            }],
        }
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let record: CourseRecord =
            serde_json::from_str(r#"{"id":"c1","title":"Intro","instructorName":"Ada"}"#).unwrap();

        assert_eq!(record.instructor_name, "Ada");
        assert!(record.files.is_empty());
        assert!(record.enrolled_students.is_empty());
        assert!(record.ratings.is_empty());
    }

    #[test]
    fn test_record_uses_camel_case_fields() {
        let record: CourseRecord = serde_json::from_str(
            r#"{"id":"c1","enrolledStudents":["u1"],"ratings":{"u1":5},"files":[{"url":"a.png","type":"image/png"}]}"#,
        )
        .unwrap();

        assert_eq!(record.enrolled_students, vec!["u1".to_string()]);
        assert_eq!(record.ratings["u1"].value(), 5.0);
        assert_eq!(record.files[0].content_type, "image/png");
    }

    #[test]
    fn test_new_course_validation() {
        assert!(new_course().validate().is_ok());

        let mut blank = new_course();
        blank.title = "   ".to_string();
        assert_eq!(blank.validate(), Err(CourseError::BlankTitle));

        let mut negative = new_course();
        negative.price = -1.0;
        assert_eq!(negative.validate(), Err(CourseError::InvalidPrice(-1.0)));

        let mut nan_price = new_course();
        nan_price.price = f64::NAN;
        assert!(nan_price.validate().is_err());

        let mut no_files = new_course();
        no_files.files.clear();
        assert_eq!(no_files.validate(), Err(CourseError::NoFiles));
    }

    #[test]
    fn test_into_record_starts_without_students_or_ratings() {
        let record = new_course().into_record("c9".to_string(), "ada@example.com".to_string());

        assert_eq!(record.id, "c9");
        assert_eq!(record.instructor_email, "ada@example.com");
        assert!(record.enrolled_students.is_empty());
        assert!(record.ratings.is_empty());
        assert!(record.created_at.is_some());
    }
}

use catalog::views::{EnrolledCourse, HomeView};
use models::{
    course::{Attachment, NewCourse},
    decorated::DecoratedCourse,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentDto {
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    pub files: Vec<AttachmentDto>,
    pub image_url: String,
    pub enrolled_students_count: usize,
    pub average_rating: f64,
    pub ratings_count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub featured: Vec<CourseResponse>,
    pub popular_categories: Vec<String>,
    pub trending: Vec<CourseResponse>,
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourseResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    /// The caller's own rating, if they rated the course
    pub user_rating: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub enrolled: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RatingRequest {
    /// Between 1 and 5
    pub rating: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub title: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    pub instructor_name: String,
    /// Already uploaded files; the first one is the cover image
    pub files: Vec<AttachmentDto>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseQueryParams {
    /// Exact, case-sensitive category name. Empty lists every course.
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Matched against course titles and instructor names. Blank matches nothing.
    #[serde(default)]
    pub q: String,
}

impl From<Attachment> for AttachmentDto {
    fn from(attachment: Attachment) -> Self {
        Self {
            url: attachment.url,
            content_type: attachment.content_type,
        }
    }
}

impl From<AttachmentDto> for Attachment {
    fn from(dto: AttachmentDto) -> Self {
        Self {
            url: dto.url,
            content_type: dto.content_type,
        }
    }
}

impl From<DecoratedCourse> for CourseResponse {
    fn from(decorated: DecoratedCourse) -> Self {
        let course = decorated.course;

        Self {
            ratings_count: course.ratings.len(),
            id: course.id,
            title: course.title,
            description: course.description,
            category: course.category,
            instructor_name: course.instructor_name,
            instructor_email: course.instructor_email,
            price: course.price,
            files: course.files.into_iter().map(AttachmentDto::from).collect(),
            image_url: decorated.image_url,
            enrolled_students_count: decorated.enrolled_students_count,
            average_rating: decorated.average_rating,
        }
    }
}

impl From<HomeView> for HomeResponse {
    fn from(view: HomeView) -> Self {
        Self {
            featured: into_responses(view.featured),
            popular_categories: view.popular_categories,
            trending: into_responses(view.trending),
            courses: into_responses(view.courses),
        }
    }
}

impl From<EnrolledCourse> for EnrolledCourseResponse {
    fn from(enrolled: EnrolledCourse) -> Self {
        Self {
            course: enrolled.course.into(),
            user_rating: enrolled.user_rating,
        }
    }
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(request: CreateCourseRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            price: request.price,
            category: request.category,
            instructor_name: request.instructor_name,
            files: request.files.into_iter().map(Attachment::from).collect(),
        }
    }
}

pub fn into_responses(courses: Vec<DecoratedCourse>) -> Vec<CourseResponse> {
    courses.into_iter().map(CourseResponse::from).collect()
}

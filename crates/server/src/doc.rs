use crate::{
    dtos::course::{
        AttachmentDto, CourseResponse, CreateCourseRequest, EnrolledCourseResponse,
        EnrollmentResponse, HomeResponse, RatingRequest, UpdateCourseRequest, UserResponse,
    },
    routes::{course, enrollment, health, instructor, me},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        me::get_me,
        course::get_courses,
        course::get_home,
        course::get_featured,
        course::get_trending,
        course::search_courses,
        course::get_course_by_id,
        enrollment::get_enrollment,
        enrollment::enroll,
        enrollment::rate_course,
        enrollment::get_enrolled_courses,
        instructor::create_course,
        instructor::update_course,
        instructor::delete_course,
        instructor::get_managed_courses
    ),
    components(schemas(
        AttachmentDto,
        CourseResponse,
        CreateCourseRequest,
        EnrolledCourseResponse,
        EnrollmentResponse,
        HomeResponse,
        RatingRequest,
        UpdateCourseRequest,
        UserResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Courses", description = "Course catalog views"),
        (name = "Enrollment", description = "Enrolling in and rating courses"),
        (name = "Instructors", description = "Publishing and managing courses"),
    ),
    info(
        title = "Course Marketplace API",
        version = "1.0.0",
        description = "Browse, enroll in, and rate courses",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

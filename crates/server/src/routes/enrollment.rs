use crate::{
    auth::CurrentUser,
    dtos::course::{EnrolledCourseResponse, EnrollmentResponse, RatingRequest},
    routes::{fetch_existing, store_error},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use catalog::{is_enrolled, views};
use log::info;
use models::score::Score;

/// Whether the caller is enrolled in the course
#[utoipa::path(
    get,
    path = "/courses/{id}/enrollment",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrollment state", body = EnrollmentResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollment"
)]
pub async fn get_enrollment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<EnrollmentResponse>, StatusCode> {
    let course = fetch_existing(&state, &id).await?;

    Ok(Json(EnrollmentResponse {
        enrolled: is_enrolled(&course, &user.id),
    }))
}

/// Enroll the caller in a course
#[utoipa::path(
    post,
    path = "/courses/{id}/enroll",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Enrolled"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Already enrolled"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollment"
)]
pub async fn enroll(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let course = fetch_existing(&state, &id).await?;

    if is_enrolled(&course, &user.id) {
        return Err(StatusCode::CONFLICT);
    }

    state
        .store
        .enroll(&id, &user.id)
        .await
        .map_err(store_error)?;

    info!("User {} enrolled in course {id}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Rate a course the caller is enrolled in
#[utoipa::path(
    put,
    path = "/courses/{id}/rating",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = RatingRequest,
    responses(
        (status = 204, description = "Rating saved"),
        (status = 403, description = "Caller is not enrolled in the course"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Rating outside 1 to 5"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollment"
)]
pub async fn rate_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(request): Json<RatingRequest>,
) -> Result<StatusCode, StatusCode> {
    let score = Score::new(request.rating).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    let course = fetch_existing(&state, &id).await?;

    if !is_enrolled(&course, &user.id) {
        return Err(StatusCode::FORBIDDEN);
    }

    state
        .store
        .submit_rating(&id, &user.id, score)
        .await
        .map_err(store_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// The caller's enrolled courses with the rating they gave each one
#[utoipa::path(
    get,
    path = "/me/courses/enrolled",
    responses(
        (status = 200, description = "Enrolled courses", body = Vec<EnrolledCourseResponse>),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollment"
)]
pub async fn get_enrolled_courses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<EnrolledCourseResponse>>, StatusCode> {
    let snapshot = state
        .store
        .fetch_enrolled_courses(&user.id)
        .await
        .map_err(store_error)?;

    Ok(Json(
        views::enrolled_courses(&snapshot, &user.id)
            .into_iter()
            .map(EnrolledCourseResponse::from)
            .collect(),
    ))
}

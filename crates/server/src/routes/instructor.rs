use crate::{
    auth::CurrentUser,
    dtos::course::{CourseResponse, CreateCourseRequest, UpdateCourseRequest, into_responses},
    routes::{fetch_existing, store_error},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use catalog::{Decorate, views};
use log::info;

/// The caller's email, which instructors are identified by
fn instructor_email(user: &CurrentUser) -> Result<&str, StatusCode> {
    user.email.as_deref().ok_or(StatusCode::FORBIDDEN)
}

/// Fails unless the caller published the course
async fn ensure_owner(state: &AppState, user: &CurrentUser, id: &str) -> Result<(), StatusCode> {
    let course = fetch_existing(state, id).await?;

    if instructor_email(user)? != course.instructor_email {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(())
}

/// Publish a new course owned by the caller
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 403, description = "Caller has no email claim"),
        (status = 422, description = "Course is missing a title, a valid price, or files"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Instructors"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), StatusCode> {
    let email = instructor_email(&user)?.to_string();

    let course = state
        .store
        .create_course(request.into(), email)
        .await
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(course.decorate().into())))
}

/// Rename a course the caller owns
#[utoipa::path(
    patch,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 204, description = "Course updated"),
        (status = 403, description = "Caller does not own the course"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Blank title"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Instructors"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<StatusCode, StatusCode> {
    ensure_owner(&state, &user, &id).await?;

    state
        .store
        .update_title(&id, request.title)
        .await
        .map_err(store_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a course the caller owns
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 403, description = "Caller does not own the course"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Instructors"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    ensure_owner(&state, &user, &id).await?;

    state.store.delete_course(&id).await.map_err(store_error)?;

    info!("Instructor {} deleted course {id}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Courses published by the caller
#[utoipa::path(
    get,
    path = "/me/courses/managed",
    responses(
        (status = 200, description = "Managed courses", body = Vec<CourseResponse>),
        (status = 403, description = "Caller has no email claim"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Instructors"
)]
pub async fn get_managed_courses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let email = instructor_email(&user)?;

    let snapshot = state
        .store
        .fetch_instructor_courses(email)
        .await
        .map_err(store_error)?;

    Ok(Json(into_responses(views::managed_courses(&snapshot))))
}

use crate::{
    dtos::course::{CourseQueryParams, CourseResponse, HomeResponse, SearchParams, into_responses},
    routes::store_error,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use catalog::{Decorate, decorate_all, featured, filter_by_category, rank_by_rating, search, views};

/// List all courses, optionally restricted to one category
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "Courses in catalog order", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let snapshot = state.store.fetch_courses().await.map_err(store_error)?;
    let category = params.category.as_deref().filter(|c| !c.is_empty());
    let courses = filter_by_category(&snapshot, category);

    Ok(Json(into_responses(decorate_all(&courses))))
}

/// Everything the home page shows: featured, popular categories, trending, and all courses
#[utoipa::path(
    get,
    path = "/courses/home",
    responses(
        (status = 200, description = "Home page view", body = HomeResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_home(State(state): State<AppState>) -> Result<Json<HomeResponse>, StatusCode> {
    let snapshot = state.store.fetch_courses().await.map_err(store_error)?;

    Ok(Json(views::home_view(&snapshot, state.limits).into()))
}

/// The first courses of the catalog, unranked
#[utoipa::path(
    get,
    path = "/courses/featured",
    responses(
        (status = 200, description = "Featured courses", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_featured(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let snapshot = state.store.fetch_courses().await.map_err(store_error)?;

    Ok(Json(into_responses(featured(&snapshot, state.limits.featured))))
}

/// The highest rated courses; unrated courses are never trending
#[utoipa::path(
    get,
    path = "/courses/trending",
    responses(
        (status = 200, description = "Trending courses, best rated first", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_trending(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let snapshot = state.store.fetch_courses().await.map_err(store_error)?;

    Ok(Json(into_responses(rank_by_rating(
        &snapshot,
        state.limits.trending,
    ))))
}

/// Search course titles and instructor names
#[utoipa::path(
    get,
    path = "/courses/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching courses; empty for a blank query", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let snapshot = state.store.fetch_courses().await.map_err(store_error)?;
    let matches = search(&snapshot, &params.q);

    Ok(Json(into_responses(decorate_all(&matches))))
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, StatusCode> {
    let course = state.store.fetch_course(&id).await.map_err(store_error)?;

    match course {
        Some(course) => Ok(Json(course.decorate().into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post, put},
};
use database::services::StoreError;
use log::error;
use models::course::CourseRecord;

pub mod course;
pub mod enrollment;
pub mod health;
pub mod instructor;
pub mod me;

/// Routes anyone can call
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/courses", get(course::get_courses))
        .route("/courses/home", get(course::get_home))
        .route("/courses/featured", get(course::get_featured))
        .route("/courses/trending", get(course::get_trending))
        .route("/courses/search", get(course::search_courses))
        .route("/courses/{id}", get(course::get_course_by_id))
}

/// Routes that need a [`crate::auth::CurrentUser`] extension
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me::get_me))
        .route("/me/courses/enrolled", get(enrollment::get_enrolled_courses))
        .route("/me/courses/managed", get(instructor::get_managed_courses))
        .route("/courses", post(instructor::create_course))
        .route(
            "/courses/{id}",
            axum::routing::patch(instructor::update_course).delete(instructor::delete_course),
        )
        .route("/courses/{id}/enrollment", get(enrollment::get_enrollment))
        .route("/courses/{id}/enroll", post(enrollment::enroll))
        .route("/courses/{id}/rating", put(enrollment::rate_course))
}

/// Maps a store failure to the status code the client sees
pub fn store_error(e: StoreError) -> StatusCode {
    match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Invalid(reason) => {
            log::debug!("Rejected course data: {reason}");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StoreError::Unavailable => {
            error!("Course store unavailable");
            StatusCode::SERVICE_UNAVAILABLE
        }
        e @ (StoreError::Database(_) | StoreError::Encoding(_) | StoreError::Corrupt { .. }) => {
            error!("Course store error: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Fetches a course or fails with 404
pub async fn fetch_existing(state: &AppState, id: &str) -> Result<CourseRecord, StatusCode> {
    state
        .store
        .fetch_course(id)
        .await
        .map_err(store_error)?
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod test {
    use super::{protected_routes, public_routes};
    use crate::{auth::CurrentUser, state::AppState};
    use axum::{
        Extension, Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use catalog::views::ViewLimits;
    use database::services::{CourseStore, MemoryCourseStore};
    use models::{
        course::{Attachment, CourseRecord},
        score::Score,
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn course(id: &str, title: &str, category: &str, ratings: &[(&str, f64)]) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            instructor_name: "Ada Lovelace".to_string(),
            instructor_email: "ada@example.com".to_string(),
            price: 10.0,
            files: vec![Attachment {
                url: format!("https://cdn.example.com/{id}.png"),
                content_type: "image/png".to_string(),
            }],
            enrolled_students: ratings.iter().map(|(user, _)| user.to_string()).collect(),
            ratings: ratings
                .iter()
                .map(|(user, score)| (user.to_string(), Score::new(*score).unwrap()))
                .collect(),
            created_at: None,
        }
    }

    fn store() -> Arc<MemoryCourseStore> {
        Arc::new(MemoryCourseStore::with_courses(vec![
            course("a", "Rust Basics", "Programming", &[("u1", 5.0), ("u2", 3.0)]),
            course("b", "Logo Design", "Design", &[]),
            course("c", "Color Theory", "Design", &[("u1", 4.0)]),
            course("d", "Startup Finance", "Business", &[("u3", 2.0)]),
        ]))
    }

    fn app(store: Arc<MemoryCourseStore>, user: Option<CurrentUser>) -> Router {
        let state = AppState::new(store, ViewLimits::default());
        let mut protected = protected_routes();

        if let Some(user) = user {
            protected = protected.layer(Extension(user));
        }

        public_routes().merge(protected).with_state(state)
    }

    fn user(id: &str, email: Option<&str>) -> Option<CurrentUser> {
        Some(CurrentUser {
            id: id.to_string(),
            email: email.map(str::to_string),
        })
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    fn ids(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|course| course["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_and_filter_by_category() {
        let (status, body) = get(app(store(), None), "/courses").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["a", "b", "c", "d"]);
        assert_eq!(body[0]["imageUrl"], "https://cdn.example.com/a.png");
        assert_eq!(body[0]["averageRating"], 4.0);
        assert_eq!(body[0]["enrolledStudentsCount"], 2);

        let (_, body) = get(app(store(), None), "/courses?category=Design").await;
        assert_eq!(ids(&body), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_empty_category_lists_everything() {
        let (status, body) = get(app(store(), None), "/courses?category=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_trending_excludes_unrated_and_breaks_ties_by_order() {
        let (status, body) = get(app(store(), None), "/courses/trending").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["a", "c", "d"]);
    }

    #[tokio::test]
    async fn test_home_view() {
        let (_, body) = get(app(store(), None), "/courses/home").await;

        assert_eq!(ids(&body["featured"]), vec!["a", "b", "c"]);
        assert_eq!(ids(&body["trending"]), vec!["a", "c", "d"]);
        assert_eq!(body["popularCategories"], json!(["Programming", "Design", "Business"]));
        assert_eq!(body["courses"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_search() {
        let (_, body) = get(app(store(), None), "/courses/search?q=THEORY").await;
        assert_eq!(ids(&body), vec!["c"]);

        let (_, body) = get(app(store(), None), "/courses/search?q=lovelace").await;
        assert_eq!(ids(&body).len(), 4);

        let (status, body) = get(app(store(), None), "/courses/search?q=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_get_course_by_id() {
        let (status, body) = get(app(store(), None), "/courses/b").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Logo Design");
        assert_eq!(body["averageRating"], 0.0);

        let (status, _) = get(app(store(), None), "/courses/zzz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_enroll_then_conflict() {
        let store = store();

        let student = || app(store.clone(), user("u9", None));

        let (status, body) = get(student(), "/courses/b/enrollment").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["enrolled"], false);

        let (status, _) = send(student(), Method::POST, "/courses/b/enroll", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(student(), Method::POST, "/courses/b/enroll", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = get(student(), "/courses/b/enrollment").await;
        assert_eq!(body["enrolled"], true);
    }

    #[tokio::test]
    async fn test_rating_requires_enrollment_and_valid_score() {
        let store = store();

        let (status, _) = send(
            app(store.clone(), user("u9", None)),
            Method::PUT,
            "/courses/b/rating",
            Some(json!({ "rating": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            app(store.clone(), user("u1", None)),
            Method::PUT,
            "/courses/a/rating",
            Some(json!({ "rating": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            app(store.clone(), user("u1", None)),
            Method::PUT,
            "/courses/a/rating",
            Some(json!({ "rating": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        // The next read reflects the new rating
        let (_, body) = get(app(store, None), "/courses/a").await;
        assert_eq!(body["averageRating"], 2.0);
    }

    #[tokio::test]
    async fn test_student_dashboard() {
        let (status, body) = get(app(store(), user("u1", None)), "/me/courses/enrolled").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["a", "c"]);
        assert_eq!(body[0]["userRating"], 5.0);
        assert_eq!(body[1]["userRating"], 4.0);
    }

    #[tokio::test]
    async fn test_instructor_create_update_delete() {
        let store = store();
        let ada = || user("instructor-1", Some("ada@example.com"));
        let other = || user("instructor-2", Some("ken@example.com"));

        let (status, created) = send(
            app(store.clone(), ada()),
            Method::POST,
            "/courses",
            Some(json!({
                "title": "Async Rust",
                "description": "Futures from scratch",
                "price": 25,
                "category": "Programming",
                "instructorName": "Ada Lovelace",
                "files": [{ "url": "https://cdn.example.com/async.png", "type": "image/png" }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["instructorEmail"], "ada@example.com");
        assert_eq!(created["imageUrl"], "https://cdn.example.com/async.png");
        assert_eq!(created["enrolledStudentsCount"], 0);

        let (_, managed) = get(app(store.clone(), ada()), "/me/courses/managed").await;
        assert_eq!(managed.as_array().unwrap().len(), 5);

        let (status, _) = send(
            app(store.clone(), other()),
            Method::PATCH,
            "/courses/a",
            Some(json!({ "title": "Hijacked" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            app(store.clone(), ada()),
            Method::PATCH,
            "/courses/a",
            Some(json!({ "title": "Rust in Depth" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(store.fetch_course("a").await.unwrap().unwrap().title, "Rust in Depth");

        let (status, _) = send(app(store.clone(), ada()), Method::DELETE, "/courses/b", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = get(app(store, None), "/courses/b").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_course_without_files() {
        let (status, _) = send(
            app(store(), user("instructor-1", Some("ada@example.com"))),
            Method::POST,
            "/courses",
            Some(json!({
                "title": "No Files",
                "price": 0,
                "category": "Design",
                "instructorName": "Ada Lovelace",
                "files": []
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_me() {
        let (status, body) = send(
            app(store(), user("u1", Some("u1@example.com"))),
            Method::GET,
            "/me",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": "u1", "email": "u1@example.com" }));
    }
}

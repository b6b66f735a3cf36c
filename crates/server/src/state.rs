use catalog::views::ViewLimits;
use database::services::CourseStore;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CourseStore>,
    pub limits: ViewLimits,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>, limits: ViewLimits) -> Self {
        Self { store, limits }
    }
}

use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit", post(handlers::submit_form))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/submissions", post(handlers::add_submission))
        .route("/api/sync", post(handlers::sync))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/missed", get(handlers::get_missed))
        .route("/api/export", get(handlers::export))
        .with_state(state)
}

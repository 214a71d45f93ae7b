pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/resume", get(handlers::handle_list_resumes))
        .route("/api/resume/:id", get(handlers::handle_get_resume))
        .route(
            "/api/resume/upload",
            post(handlers::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/resume/ats-score", post(handlers::handle_ats_score))
        .with_state(state)
}

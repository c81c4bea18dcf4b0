pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::questionnaire::handlers::handle_chatbot_score;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        // Ingestion
        .route("/upload_resume", post(handlers::handle_upload_resume))
        .route("/upload_job", post(handlers::handle_upload_job))
        // Listing and ranked retrieval
        .route("/jobs", get(handlers::handle_list_jobs))
        .route("/resumes", get(handlers::handle_list_resumes))
        .route("/job_matches/:job_id", get(handlers::handle_job_matches))
        .route(
            "/resume_matches/:resume_id",
            get(handlers::handle_resume_matches),
        )
        // Questionnaire
        .route("/chatbot_score", post(handle_chatbot_score))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

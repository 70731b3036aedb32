pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{cover_letter, insights, interview, profile, resume};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route("/api/v1/profile", post(profile::handlers::handle_update_profile))
        .route(
            "/api/v1/profile/status",
            get(profile::handlers::handle_onboarding_status),
        )
        // Dashboard insights
        .route("/api/v1/insights", get(insights::handlers::handle_get_insights))
        // Mock interview
        .route(
            "/api/v1/interview/quiz",
            post(interview::handlers::handle_generate_quiz),
        )
        .route(
            "/api/v1/interview/results",
            post(interview::handlers::handle_save_result),
        )
        .route(
            "/api/v1/interview/assessments",
            get(interview::handlers::handle_list_assessments),
        )
        // Resume
        .route(
            "/api/v1/resume",
            put(resume::handlers::handle_save_resume).get(resume::handlers::handle_get_resume),
        )
        .route(
            "/api/v1/resume/improve",
            post(resume::handlers::handle_improve),
        )
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            post(cover_letter::handlers::handle_generate).get(cover_letter::handlers::handle_list),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(cover_letter::handlers::handle_get)
                .delete(cover_letter::handlers::handle_delete),
        )
        .with_state(state)
}

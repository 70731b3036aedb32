use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::{current_user, SessionToken};
use crate::errors::AppError;
use crate::profile::update::{update_profile, ProfileUpdateRequest, ProfileUpdateResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OnboardingStatusResponse {
    pub is_onboarded: bool,
}

/// POST /api/v1/profile
///
/// The profile-and-insight update transaction. Returns the updated user and
/// the resolved industry insight.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    token: SessionToken,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileUpdateResponse>, AppError> {
    let user = current_user(&state, &token).await?;

    let response = update_profile(
        &state.db,
        state.insight_generator.as_ref(),
        &user,
        &request,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/v1/profile/status
///
/// Pure read: whether the stored user has a non-empty industry.
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<Json<OnboardingStatusResponse>, AppError> {
    let user = current_user(&state, &token).await?;

    Ok(Json(OnboardingStatusResponse {
        is_onboarded: user.is_onboarded(),
    }))
}

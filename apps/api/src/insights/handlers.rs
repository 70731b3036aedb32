use axum::{extract::State, Json};

use crate::auth::{current_user, SessionToken};
use crate::errors::AppError;
use crate::insights::store;
use crate::models::insight::IndustryInsightRow;
use crate::state::AppState;

/// GET /api/v1/insights
///
/// Returns the caller's industry insight for the dashboard. Requires a
/// completed onboarding. The insight should already exist after onboarding;
/// if it is somehow missing it is regenerated lazily under the same
/// uniqueness rules as the profile update.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<Json<IndustryInsightRow>, AppError> {
    let user = current_user(&state, &token).await?;

    let industry = user
        .industry
        .as_deref()
        .filter(|industry| !industry.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("Complete onboarding before requesting insights".to_string())
        })?;

    let mut tx = state.db.begin().await?;
    let insight =
        store::find_or_generate(&mut tx, state.insight_generator.as_ref(), industry).await?;
    tx.commit().await?;

    Ok(Json(insight))
}

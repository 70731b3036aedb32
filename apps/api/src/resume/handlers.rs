use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{current_user, SessionToken};
use crate::errors::AppError;
use crate::llm_client::prompts::MARKDOWN_ONLY_SYSTEM;
use crate::models::resume::ResumeRow;
use crate::resume::prompts::IMPROVE_PROMPT_TEMPLATE;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    /// Markdown document assembled by the client-side builder.
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub current: String,
    /// Section being rewritten: "experience", "project", "education", ...
    #[serde(rename = "type")]
    pub section_type: String,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub improved: String,
}

/// PUT /api/v1/resume
///
/// Upserts the caller's single resume document.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    token: SessionToken,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let user = current_user(&state, &token).await?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (user_id, content)
        VALUES ($1, $2)
        ON CONFLICT (user_id)
        DO UPDATE SET content = EXCLUDED.content, updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&request.content)
    .fetch_one(&state.db)
    .await?;

    info!("Saved resume {} for user {}", resume.id, user.id);

    Ok(Json(resume))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<Json<ResumeRow>, AppError> {
    let user = current_user(&state, &token).await?;

    let resume = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume saved yet".to_string()))?;

    Ok(Json(resume))
}

/// POST /api/v1/resume/improve
///
/// Rewrites one section description with the LLM. Nothing is persisted; the
/// client folds the result back into the builder form.
pub async fn handle_improve(
    State(state): State<AppState>,
    token: SessionToken,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    if request.current.trim().is_empty() {
        return Err(AppError::Validation("current cannot be empty".to_string()));
    }

    let user = current_user(&state, &token).await?;
    let industry = user.industry.as_deref().unwrap_or("general");

    let prompt = IMPROVE_PROMPT_TEMPLATE
        .replace("{section_type}", &request.section_type)
        .replace("{industry}", industry)
        .replace("{current}", &request.current);

    let improved = state
        .llm
        .call_text(&prompt, MARKDOWN_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume improvement failed: {e}")))?;

    Ok(Json(ImproveResponse { improved }))
}

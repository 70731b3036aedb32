use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{current_user, SessionToken};
use crate::cover_letter::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::MARKDOWN_ONLY_SYSTEM;
use crate::models::cover_letter::CoverLetterRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateCoverLetterRequest {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

impl GenerateCoverLetterRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("job_title", &self.job_title),
            ("company_name", &self.company_name),
            ("job_description", &self.job_description),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }
}

/// POST /api/v1/cover-letters
///
/// Generates a cover letter from the job posting plus the caller's profile,
/// persists it, and returns the stored row.
pub async fn handle_generate(
    State(state): State<AppState>,
    token: SessionToken,
    Json(request): Json<GenerateCoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    request.validate()?;

    let user = current_user(&state, &token).await?;

    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", &request.job_title)
        .replace("{company_name}", &request.company_name)
        .replace("{industry}", user.industry.as_deref().unwrap_or("general"))
        .replace(
            "{experience}",
            &user.experience.map_or("unspecified".to_string(), |y| y.to_string()),
        )
        .replace("{skills}", &user.skills.join(", "))
        .replace("{bio}", user.bio.as_deref().unwrap_or(""))
        .replace("{job_description}", &request.job_description);

    let content = state
        .llm
        .call_text(&prompt, MARKDOWN_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    let letter = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters (user_id, content, job_description, company_name, job_title)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&content)
    .bind(&request.job_description)
    .bind(&request.company_name)
    .bind(&request.job_title)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Generated cover letter {} for user {} ({} at {})",
        letter.id, user.id, request.job_title, request.company_name
    );

    Ok(Json(letter))
}

/// GET /api/v1/cover-letters
///
/// Lists the caller's cover letters, newest first.
pub async fn handle_list(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let user = current_user(&state, &token).await?;

    let letters = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(letters))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: SessionToken,
) -> Result<Json<CoverLetterRow>, AppError> {
    let user = current_user(&state, &token).await?;

    let letter = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;

    Ok(Json(letter))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: SessionToken,
) -> Result<StatusCode, AppError> {
    let user = current_user(&state, &token).await?;

    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_rejects_blank_fields() {
        let request = GenerateCoverLetterRequest {
            job_title: "Engineer".to_string(),
            company_name: "  ".to_string(),
            job_description: "Build things".to_string(),
        };
        assert!(matches!(
            request.validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_generate_request_accepts_complete_payload() {
        let request = GenerateCoverLetterRequest {
            job_title: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            job_description: "Build things".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}

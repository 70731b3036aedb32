use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::{current_user, SessionToken};
use crate::errors::AppError;
use crate::interview::quiz::{generate_quiz, grade, improvement_tip, QuizQuestion};
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveResultRequest {
    pub questions: Vec<QuizQuestion>,
    pub answers: Vec<String>,
}

/// POST /api/v1/interview/quiz
///
/// Generates a fresh quiz for the caller's industry and skills.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<Json<Vec<QuizQuestion>>, AppError> {
    let user = current_user(&state, &token).await?;
    let questions = generate_quiz(&state.llm, &user).await?;
    Ok(Json(questions))
}

/// POST /api/v1/interview/results
///
/// Grades a completed quiz, asks for an improvement tip on imperfect scores
/// (a tip failure never fails the save), and persists the assessment.
pub async fn handle_save_result(
    State(state): State<AppState>,
    token: SessionToken,
    Json(request): Json<SaveResultRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    let user = current_user(&state, &token).await?;

    let (results, score) = grade(&request.questions, &request.answers)?;

    let industry = user.industry.as_deref().unwrap_or("general");
    let tip = improvement_tip(&state.llm, industry, &results).await;

    let questions = serde_json::to_value(&results)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize results: {e}")))?;

    let assessment = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments (user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, 'Technical', $4)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(score)
    .bind(&questions)
    .bind(&tip)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Saved assessment {} for user {} (score {score:.1}%)",
        assessment.id, user.id
    );

    Ok(Json(assessment))
}

/// GET /api/v1/interview/assessments
///
/// Lists the caller's assessments, oldest first (the performance chart
/// consumes them in chronological order).
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let user = current_user(&state, &token).await?;

    let assessments = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(assessments))
}

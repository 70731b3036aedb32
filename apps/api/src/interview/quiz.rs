//! Quiz generation and grading.
//!
//! Questions come from the LLM and are validated before they reach the
//! client: exactly 4 options, correct answer present among them. Grading is
//! server-side; the client only submits its chosen answers.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::interview::prompts::{
    IMPROVEMENT_TIP_PROMPT_TEMPLATE, QUIZ_PROMPT_TEMPLATE, QUIZ_SYSTEM, TIP_SYSTEM,
};
use crate::llm_client::LlmClient;
use crate::models::user::User;

/// Max LLM retries when a generated quiz fails structural validation.
const MAX_QUIZ_RETRIES: u32 = 2;

const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    questions: Vec<QuizQuestion>,
}

/// A graded question, persisted as part of the assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub answer: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Generates a quiz for the user's industry and skills, retrying when the
/// LLM returns structurally invalid questions.
pub async fn generate_quiz(llm: &LlmClient, user: &User) -> Result<Vec<QuizQuestion>, AppError> {
    let industry = user
        .industry
        .as_deref()
        .filter(|industry| !industry.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("Complete onboarding before starting a quiz".to_string())
        })?;

    let skills_clause = if user.skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", user.skills.join(", "))
    };

    let prompt = QUIZ_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace("{skills_clause}", &skills_clause);

    for attempt in 0..=MAX_QUIZ_RETRIES {
        let payload: QuizPayload = llm
            .call_json(&prompt, QUIZ_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Quiz generation failed: {e}")))?;

        match validate_questions(&payload.questions) {
            Ok(()) => return Ok(payload.questions),
            Err(reason) => warn!(
                "Quiz attempt {}/{} failed validation: {reason} — retrying",
                attempt + 1,
                MAX_QUIZ_RETRIES + 1
            ),
        }
    }

    Err(AppError::Llm(format!(
        "Quiz generation failed after {} attempts: questions were consistently malformed",
        MAX_QUIZ_RETRIES + 1
    )))
}

fn validate_questions(questions: &[QuizQuestion]) -> Result<(), String> {
    if questions.is_empty() {
        return Err("no questions returned".to_string());
    }
    for (i, q) in questions.iter().enumerate() {
        if q.options.len() != OPTIONS_PER_QUESTION {
            return Err(format!("question {i} has {} options", q.options.len()));
        }
        if !q.options.contains(&q.correct_answer) {
            return Err(format!("question {i} correct answer not among its options"));
        }
    }
    Ok(())
}

/// Grades a completed quiz against the submitted answers.
/// Returns per-question results and the percentage score.
pub fn grade(
    questions: &[QuizQuestion],
    answers: &[String],
) -> Result<(Vec<QuestionResult>, f64), AppError> {
    if questions.is_empty() {
        return Err(AppError::Validation("quiz has no questions".to_string()));
    }
    if questions.len() != answers.len() {
        return Err(AppError::Validation(format!(
            "expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let results: Vec<QuestionResult> = questions
        .iter()
        .zip(answers)
        .map(|(q, user_answer)| QuestionResult {
            question: q.question.clone(),
            answer: q.correct_answer.clone(),
            user_answer: user_answer.clone(),
            is_correct: *user_answer == q.correct_answer,
            explanation: q.explanation.clone(),
        })
        .collect();

    let correct = results.iter().filter(|r| r.is_correct).count();
    let score = correct as f64 / results.len() as f64 * 100.0;

    Ok((results, score))
}

/// Asks the LLM for one improvement tip based on the missed questions.
/// Returns `None` when the user got everything right, and also on LLM
/// failure — a tip is never worth failing the save.
pub async fn improvement_tip(
    llm: &LlmClient,
    industry: &str,
    results: &[QuestionResult],
) -> Option<String> {
    let mistakes: Vec<String> = results
        .iter()
        .filter(|r| !r.is_correct)
        .map(|r| {
            format!(
                "Question: \"{}\"\nCorrect answer: \"{}\"\nUser answer: \"{}\"",
                r.question, r.answer, r.user_answer
            )
        })
        .collect();

    if mistakes.is_empty() {
        return None;
    }

    let prompt = IMPROVEMENT_TIP_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace("{mistakes}", &mistakes.join("\n\n"));

    match llm.call_text(&prompt, TIP_SYSTEM).await {
        Ok(tip) => Some(tip),
        Err(e) => {
            warn!("Improvement tip generation failed, saving result without it: {e}");
            None
        }
    }
}

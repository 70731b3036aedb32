use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated cover letter, kept per job application.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Markdown content produced by the LLM.
    pub content: String,
    pub job_description: Option<String>,
    pub company_name: String,
    pub job_title: String,
    pub created_at: DateTime<Utc>,
}

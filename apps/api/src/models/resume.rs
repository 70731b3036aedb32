use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's resume document. One per user (unique constraint on `user_id`);
/// saves are upserts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Markdown content assembled by the client-side builder.
    pub content: String,
    /// Reserved for an ATS review pass; not yet populated.
    pub ats_score: Option<f64>,
    /// Reserved for an ATS review pass; not yet populated.
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

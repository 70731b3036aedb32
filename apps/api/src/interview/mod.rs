//! Mock interview quizzes — LLM-generated technical questions, server-side
//! grading, and persisted assessments.

pub mod handlers;
pub mod prompts;
pub mod quiz;

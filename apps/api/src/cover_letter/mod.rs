//! Cover letters — LLM-generated per job application, stored per user.

pub mod handlers;
pub mod prompts;

//! Resume storage and AI-assisted section rewriting.

pub mod handlers;
pub mod prompts;

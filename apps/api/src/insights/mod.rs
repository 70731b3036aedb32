//! Industry insights — a lazily-populated cache of LLM-derived labor-market
//! analytics, keyed uniquely by industry.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;

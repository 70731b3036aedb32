use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::IdentityResolver;
use crate::config::Config;
use crate::insights::generator::InsightGenerator;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Verifies session tokens against the hosted identity provider.
    /// Injectable so tests can bypass the HTTP round trip.
    pub identity: Arc<dyn IdentityResolver>,
    /// Produces analytics payloads for industries with no cached insight.
    pub insight_generator: Arc<dyn InsightGenerator>,
}

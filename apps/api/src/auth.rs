//! Identity resolution — maps an externally-issued session token to a stored user.
//!
//! The hosted identity provider owns authentication; this service only
//! verifies tokens against it and looks up the matching `users` row. The
//! resolved identity is passed explicitly into every operation — handlers
//! never read ambient auth state.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// Bearer token extracted from the `Authorization` header.
/// Rejects the request with 401 when the header is missing or malformed.
pub struct SessionToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(SessionToken(token.to_string()))
    }
}

/// Resolves a session token to a stable subject identifier.
///
/// Injected as `Arc<dyn IdentityResolver>` so tests can substitute a static
/// resolver for the HTTP round trip.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns `Ok(Some(subject))` for a valid session, `Ok(None)` for an
    /// invalid or expired one, and `Err` only for provider outages.
    async fn resolve(&self, token: &str) -> Result<Option<String>, AppError>;
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    subject: String,
}

/// Default resolver: verifies the token against the identity provider's
/// session endpoint over HTTPS.
pub struct HttpIdentityResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityResolver {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<Option<String>, AppError> {
        let url = format!("{}/v1/sessions/verify", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Identity provider call failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 404 {
            debug!("Identity provider rejected session token ({status})");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Identity provider returned {status}"
            )));
        }

        let verified: VerifyResponse = response.json().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Malformed identity provider response: {e}"))
        })?;

        Ok(Some(verified.subject))
    }
}

/// Resolves the calling user or fails with the auth taxonomy:
/// `Unauthorized` when the token does not verify, `NotFound` when the
/// subject has no stored user row.
pub async fn current_user(state: &AppState, token: &SessionToken) -> Result<User, AppError> {
    let subject = state
        .identity
        .resolve(&token.0)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE external_id = $1")
        .bind(&subject)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user found for subject {subject}")))?;

    Ok(user)
}

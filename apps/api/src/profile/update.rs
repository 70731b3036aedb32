//! Profile Update Transaction.
//!
//! Under one bounded transaction: ensure an industry insight exists for the
//! submitted industry (generating one on a cache miss), then overwrite the
//! caller's profile fields. All-or-nothing — a failed generation leaves the
//! user row untouched, and a failed user update leaves no orphan insight.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::errors::AppError;
use crate::insights::generator::InsightGenerator;
use crate::insights::store;
use crate::models::insight::IndustryInsightRow;
use crate::models::user::User;

/// Upper bound on the whole transaction, including the generation call.
/// When it elapses the transactional future is dropped, the connection
/// rolls back on return to the pool, and the caller must resubmit.
pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Profile payload submitted at onboarding and on later edits.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdateRequest {
    pub industry: String,
    /// Years of experience.
    pub experience: i32,
    pub bio: String,
    pub skills: Vec<String>,
}

impl ProfileUpdateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.industry.trim().is_empty() {
            return Err(AppError::Validation("industry cannot be empty".to_string()));
        }
        if !(0..=60).contains(&self.experience) {
            return Err(AppError::Validation(
                "experience must be between 0 and 60 years".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    pub user: User,
    pub industry_insight: IndustryInsightRow,
}

/// Runs the profile update under a 10-second bound.
///
/// No automatic retry on timeout or on the insight-creation race; both
/// surface as errors and the caller resubmits.
pub async fn update_profile(
    pool: &PgPool,
    generator: &dyn InsightGenerator,
    user: &User,
    request: &ProfileUpdateRequest,
) -> Result<ProfileUpdateResponse, AppError> {
    request.validate()?;

    match tokio::time::timeout(UPDATE_TIMEOUT, run_transaction(pool, generator, user, request))
        .await
    {
        Ok(result) => result,
        Err(_elapsed) => Err(AppError::TransactionTimeout),
    }
}

async fn run_transaction(
    pool: &PgPool,
    generator: &dyn InsightGenerator,
    user: &User,
    request: &ProfileUpdateRequest,
) -> Result<ProfileUpdateResponse, AppError> {
    let mut tx = pool.begin().await?;

    // Cache hit skips the generator entirely; miss generates and inserts
    // inside this transaction so a later failure discards the insight too.
    let industry_insight =
        store::find_or_generate(&mut tx, generator, &request.industry).await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET industry = $1, experience = $2, bio = $3, skills = $4, updated_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&request.industry)
    .bind(request.experience)
    .bind(&request.bio)
    .bind(&request.skills)
    .bind(user.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Updated profile for user {} (industry '{}')",
        user.id, request.industry
    );

    Ok(ProfileUpdateResponse {
        user,
        industry_insight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::insights::generator::{DemandLevel, GeneratedInsight, MarketOutlook, SalaryRange};

    fn request(industry: &str, experience: i32) -> ProfileUpdateRequest {
        ProfileUpdateRequest {
            industry: industry.to_string(),
            experience,
            bio: "Backend engineer".to_string(),
            skills: vec!["rust".to_string()],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request("tech", 5).validate().is_ok());
    }

    #[test]
    fn test_empty_industry_rejected() {
        let err = request("  ", 5).validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_negative_experience_rejected() {
        assert!(request("tech", -1).validate().is_err());
    }

    #[test]
    fn test_implausible_experience_rejected() {
        assert!(request("tech", 61).validate().is_err());
        assert!(request("tech", 60).validate().is_ok());
        assert!(request("tech", 0).validate().is_ok());
    }

    #[test]
    fn test_request_deserializes_from_onboarding_payload() {
        let json = serde_json::json!({
            "industry": "tech",
            "experience": 5,
            "bio": "...",
            "skills": ["x"]
        });
        let parsed: ProfileUpdateRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.industry, "tech");
        assert_eq!(parsed.experience, 5);
        assert_eq!(parsed.skills, vec!["x".to_string()]);
    }

    #[test]
    fn test_update_timeout_is_ten_seconds() {
        assert_eq!(UPDATE_TIMEOUT, Duration::from_secs(10));
    }

    fn canned_insight() -> GeneratedInsight {
        GeneratedInsight {
            salary_ranges: vec![SalaryRange {
                role: "Backend Engineer".to_string(),
                min: 90_000.0,
                max: 180_000.0,
                median: 135_000.0,
                location: "US".to_string(),
            }],
            growth_rate: 6.5,
            demand_level: DemandLevel::High,
            top_skills: vec!["Rust".to_string()],
            market_outlook: MarketOutlook::Positive,
            key_trends: vec!["AI tooling".to_string()],
            recommended_skills: vec!["Distributed systems".to_string()],
        }
    }

    struct CountingGenerator {
        calls: AtomicUsize,
    }

    impl CountingGenerator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InsightGenerator for CountingGenerator {
        async fn generate(&self, _industry: &str) -> Result<GeneratedInsight, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(canned_insight())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl InsightGenerator for FailingGenerator {
        async fn generate(&self, industry: &str) -> Result<GeneratedInsight, AppError> {
            Err(AppError::Llm(format!(
                "insight generation failed for '{industry}'"
            )))
        }
    }

    async fn seed_user(pool: &PgPool) -> User {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (external_id, email) VALUES ('subj_test', 'test@example.com') RETURNING *",
        )
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_first_onboarding_creates_insight_and_updates_user(pool: PgPool) {
        let user = seed_user(&pool).await;
        let generator = CountingGenerator::new();

        let response = update_profile(&pool, &generator, &user, &request("tech", 5))
            .await
            .unwrap();

        assert_eq!(response.user.industry.as_deref(), Some("tech"));
        assert_eq!(response.user.experience, Some(5));
        assert_eq!(response.industry_insight.industry, "tech");
        assert_eq!(generator.call_count(), 1);

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM industry_insights WHERE industry = $1")
                .bind("tech")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_cached_industry_skips_generator(pool: PgPool) {
        let user = seed_user(&pool).await;
        let generator = CountingGenerator::new();

        let mut conn = pool.acquire().await.unwrap();
        store::insert(&mut conn, "tech", &canned_insight())
            .await
            .unwrap();
        drop(conn);

        let response = update_profile(&pool, &generator, &user, &request("tech", 5))
            .await
            .unwrap();

        assert_eq!(response.user.industry.as_deref(), Some("tech"));
        assert_eq!(generator.call_count(), 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_generator_failure_leaves_user_unchanged(pool: PgPool) {
        let user = seed_user(&pool).await;

        let err = update_profile(&pool, &FailingGenerator, &user, &request("tech", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));

        let stored: User = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(stored.industry.is_none());
        assert!(stored.bio.is_none());
        assert!(stored.skills.is_empty());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM industry_insights")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}

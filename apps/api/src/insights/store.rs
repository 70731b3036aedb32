//! Insight cache access. All writes run inside a caller-owned transaction so
//! they share the caller's commit-or-rollback fate.

use chrono::Utc;
use sqlx::PgConnection;
use tracing::info;

use crate::errors::AppError;
use crate::insights::generator::{GeneratedInsight, InsightGenerator};
use crate::models::insight::{next_update_after, IndustryInsightRow};

/// Looks up the cached insight for an industry key.
pub async fn find_by_industry(
    conn: &mut PgConnection,
    industry: &str,
) -> Result<Option<IndustryInsightRow>, sqlx::Error> {
    sqlx::query_as::<_, IndustryInsightRow>(
        "SELECT * FROM industry_insights WHERE industry = $1",
    )
    .bind(industry)
    .fetch_optional(conn)
    .await
}

/// Inserts a freshly generated insight.
///
/// Plain INSERT, deliberately without ON CONFLICT: the unique constraint on
/// `industry` makes the loser of a concurrent first-creation race abort, and
/// the caller resubmits. `next_update` is always creation time + 7 days.
pub async fn insert(
    conn: &mut PgConnection,
    industry: &str,
    generated: &GeneratedInsight,
) -> Result<IndustryInsightRow, AppError> {
    let last_updated = Utc::now();
    let next_update = next_update_after(last_updated);

    let salary_ranges = serde_json::to_value(&generated.salary_ranges)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize salary ranges: {e}")))?;

    sqlx::query_as::<_, IndustryInsightRow>(
        r#"
        INSERT INTO industry_insights
            (industry, salary_ranges, growth_rate, demand_level, market_outlook,
             top_skills, key_trends, recommended_skills, last_updated, next_update)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(industry)
    .bind(&salary_ranges)
    .bind(generated.growth_rate)
    .bind(generated.demand_level.as_str())
    .bind(generated.market_outlook.as_str())
    .bind(&generated.top_skills)
    .bind(&generated.key_trends)
    .bind(&generated.recommended_skills)
    .bind(last_updated)
    .bind(next_update)
    .fetch_one(conn)
    .await
    .map_err(AppError::from_insert)
}

/// Returns the cached insight for `industry`, generating and inserting one on
/// a cache miss. The generator is never invoked when a cached row exists.
pub async fn find_or_generate(
    conn: &mut PgConnection,
    generator: &dyn InsightGenerator,
    industry: &str,
) -> Result<IndustryInsightRow, AppError> {
    if let Some(existing) = find_by_industry(conn, industry).await? {
        return Ok(existing);
    }

    let generated = generator.generate(industry).await?;
    let inserted = insert(conn, industry, &generated).await?;
    info!(
        "Cached new insight for industry '{industry}' (next update {})",
        inserted.next_update
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sqlx::PgPool;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::insights::generator::{DemandLevel, MarketOutlook, SalaryRange};

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

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_cache_hit_never_invokes_generator(pool: PgPool) {
        let generator = CountingGenerator::new();
        let mut conn = pool.acquire().await.unwrap();

        insert(&mut conn, "tech", &canned_insight()).await.unwrap();

        let found = find_or_generate(&mut conn, &generator, "tech")
            .await
            .unwrap();
        assert_eq!(found.industry, "tech");
        assert_eq!(generator.call_count(), 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_cache_miss_generates_exactly_once(pool: PgPool) {
        let generator = CountingGenerator::new();
        let mut conn = pool.acquire().await.unwrap();

        let first = find_or_generate(&mut conn, &generator, "finance")
            .await
            .unwrap();
        let second = find_or_generate(&mut conn, &generator, "finance")
            .await
            .unwrap();

        assert_eq!(generator.call_count(), 1);
        assert_eq!(first.id, second.id);

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM industry_insights WHERE industry = $1")
                .bind("finance")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_next_update_is_seven_days_after_creation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        let inserted = insert(&mut conn, "tech", &canned_insight()).await.unwrap();
        assert_eq!(
            inserted.next_update - inserted.last_updated,
            chrono::Duration::days(7)
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_industry_insert_maps_to_conflict(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        insert(&mut conn, "tech", &canned_insight()).await.unwrap();
        let err = insert(&mut conn, "tech", &canned_insight())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }
}

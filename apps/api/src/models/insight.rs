use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// How long a cached insight stays fresh before the out-of-band refresh
/// (not part of this service) is expected to recompute it.
pub const INSIGHT_REFRESH_DAYS: i64 = 7;

/// Computes the scheduled refresh time for an insight computed at `computed_at`.
pub fn next_update_after(computed_at: DateTime<Utc>) -> DateTime<Utc> {
    computed_at + Duration::days(INSIGHT_REFRESH_DAYS)
}

/// A cached industry insight. At most one row exists per industry key
/// (enforced by a unique constraint on `industry`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IndustryInsightRow {
    pub id: Uuid,
    pub industry: String,
    /// JSONB array of `{role, min, max, median, location}` objects.
    pub salary_ranges: Value,
    pub growth_rate: f64,
    pub demand_level: String,
    pub market_outlook: String,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_update_is_exactly_seven_days_out() {
        let computed_at = Utc::now();
        let next = next_update_after(computed_at);
        assert_eq!(next - computed_at, Duration::days(7));
    }
}

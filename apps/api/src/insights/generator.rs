//! Insight Generator — produces a fresh analytics payload for an industry
//! that has no cached insight yet.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::insights::prompts::INSIGHT_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// One salary band within an industry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl DemandLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::High => "high",
            DemandLevel::Medium => "medium",
            DemandLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

impl MarketOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketOutlook::Positive => "positive",
            MarketOutlook::Neutral => "neutral",
            MarketOutlook::Negative => "negative",
        }
    }
}

/// Analytics payload returned by the generator, validated at the boundary
/// by serde before anything touches the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedInsight {
    pub salary_ranges: Vec<SalaryRange>,
    /// Projected annual growth, in percent.
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

/// Seam for insight generation. The default implementation calls the LLM;
/// tests substitute a canned generator.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, industry: &str) -> Result<GeneratedInsight, AppError>;
}

/// LLM-backed generator used in production.
pub struct LlmInsightGenerator {
    llm: LlmClient,
}

impl LlmInsightGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate(&self, industry: &str) -> Result<GeneratedInsight, AppError> {
        info!("Generating insight for industry '{industry}'");
        let prompt = INSIGHT_PROMPT_TEMPLATE.replace("{industry}", industry);
        self.llm
            .call_json::<GeneratedInsight>(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Insight generation failed for '{industry}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSIGHT_JSON: &str = r#"{
        "salary_ranges": [
            {"role": "Backend Engineer", "min": 90000.0, "max": 180000.0, "median": 135000.0, "location": "US"},
            {"role": "Data Engineer", "min": 95000.0, "max": 190000.0, "median": 140000.0, "location": "US"}
        ],
        "growth_rate": 6.5,
        "demand_level": "high",
        "top_skills": ["Rust", "Postgres", "Kubernetes"],
        "market_outlook": "positive",
        "key_trends": ["AI tooling", "Platform consolidation"],
        "recommended_skills": ["Distributed systems", "Observability"]
    }"#;

    #[test]
    fn test_generated_insight_deserializes() {
        let insight: GeneratedInsight = serde_json::from_str(INSIGHT_JSON).unwrap();
        assert_eq!(insight.salary_ranges.len(), 2);
        assert_eq!(insight.demand_level, DemandLevel::High);
        assert_eq!(insight.market_outlook, MarketOutlook::Positive);
        assert!((insight.growth_rate - 6.5).abs() < f64::EPSILON);
        assert_eq!(insight.salary_ranges[0].role, "Backend Engineer");
    }

    #[test]
    fn test_demand_level_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&DemandLevel::Medium).unwrap(),
            r#""medium""#
        );
        let parsed: DemandLevel = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(parsed, DemandLevel::Low);
    }

    #[test]
    fn test_market_outlook_as_str_round_trips_with_serde() {
        for outlook in [
            MarketOutlook::Positive,
            MarketOutlook::Neutral,
            MarketOutlook::Negative,
        ] {
            let json = serde_json::to_string(&outlook).unwrap();
            assert_eq!(json, format!(r#""{}""#, outlook.as_str()));
        }
    }

    #[test]
    fn test_unknown_demand_level_is_rejected() {
        let result: Result<DemandLevel, _> = serde_json::from_str(r#""extreme""#);
        assert!(result.is_err());
    }
}

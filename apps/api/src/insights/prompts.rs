/// Prompt for generating a full industry analytics payload.
/// The schema below must stay in sync with `GeneratedInsight`.
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"
Analyze the current state of the "{industry}" industry and provide insights in ONLY the following JSON format, without any additional notes or explanations:

{
  "salary_ranges": [
    { "role": "string", "min": number, "max": number, "median": number, "location": "string" }
  ],
  "growth_rate": number,
  "demand_level": "high" | "medium" | "low",
  "top_skills": ["skill1", "skill2"],
  "market_outlook": "positive" | "neutral" | "negative",
  "key_trends": ["trend1", "trend2"],
  "recommended_skills": ["skill1", "skill2"]
}

Rules:
- Include at least 5 common roles in salary_ranges, with salaries in USD.
- growth_rate is the projected annual growth as a percentage.
- Include at least 5 entries each in top_skills and key_trends.
"#;

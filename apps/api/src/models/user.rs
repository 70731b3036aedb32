use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user row. Created on first authenticated visit (by the identity-provider
/// sync, outside this service); profile fields are mutated by the profile
/// update transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Stable subject id from the hosted identity provider.
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub industry: Option<String>,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Onboarding is complete once the industry field is set and non-empty.
    pub fn is_onboarded(&self) -> bool {
        self.industry
            .as_deref()
            .is_some_and(|industry| !industry.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_industry(industry: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            external_id: "subj_123".to_string(),
            email: "a@example.com".to_string(),
            name: None,
            image_url: None,
            industry: industry.map(String::from),
            experience: None,
            bio: None,
            skills: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_onboarded_with_industry_set() {
        assert!(user_with_industry(Some("tech")).is_onboarded());
    }

    #[test]
    fn test_not_onboarded_when_industry_null() {
        assert!(!user_with_industry(None).is_onboarded());
    }

    #[test]
    fn test_not_onboarded_when_industry_blank() {
        assert!(!user_with_industry(Some("   ")).is_onboarded());
    }
}

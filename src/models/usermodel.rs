// models/usermodel.rs
use std::collections::HashMap;

use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Proficiency levels a user can attach to a skill. Stored inside the
/// `skills` JSONB map, so unknown level strings are rejected at the
/// serde boundary instead of leaking into scoring.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn to_str(&self) -> &str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: Option<String>,

    pub bio: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub college: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,

    /// skill name -> proficiency level
    pub skills: Json<HashMap<String, SkillLevel>>,

    pub reputation_points: i32,
    pub contribution_streak: i32,
    pub last_contribution_date: Option<NaiveDate>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Skill names only, for the matching engine.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.0.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_level_rejects_unknown_strings() {
        let ok: Result<SkillLevel, _> = serde_json::from_str("\"expert\"");
        assert!(ok.is_ok());

        let bad: Result<SkillLevel, _> = serde_json::from_str("\"wizard\"");
        assert!(bad.is_err());
    }
}

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    #[display("language")]
    Language,
    #[display("framework")]
    Framework,
    #[display("cloud")]
    Cloud,
    #[display("database")]
    Database,
    #[display("soft_skill")]
    SoftSkill,
    #[display("other")]
    Other,
}

/// Catalog entry. Read-only from the point of view of gap analysis.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            description: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

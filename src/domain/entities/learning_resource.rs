use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[display("internal")]
    Internal,
    #[display("external")]
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceLevel {
    #[display("beginner")]
    Beginner,
    #[display("intermediate")]
    Intermediate,
    #[display("advanced")]
    Advanced,
}

impl ResourceLevel {
    /// Difficulty to study at, given where the learner starts.
    /// The required level of the target plays no part.
    pub fn for_current_level(current_level: i16) -> Self {
        match current_level {
            i16::MIN..=0 => ResourceLevel::Beginner,
            1 => ResourceLevel::Intermediate,
            _ => ResourceLevel::Advanced,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LearningResource {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub kind: ResourceKind,
    pub skill_id: Uuid,
    pub level: ResourceLevel,
    /// Minutes.
    pub estimated_duration: Option<i32>,
    pub is_free: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LearningResource {
    pub fn new(title: impl Into<String>, url: impl Into<String>, skill_id: Uuid, level: ResourceLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            url: url.into(),
            kind: ResourceKind::External,
            skill_id,
            level,
            estimated_duration: None,
            is_free: true,
            description: None,
            created_at: Utc::now(),
        }
    }
}

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "target_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[display("role")]
    Role,
    #[display("project")]
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "target_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    #[display("active")]
    Active,
    #[display("archived")]
    Archived,
}

/// Ranking tier of a requirement. Declaration order is the recommendation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "importance", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    #[display("must_have")]
    MustHave,
    #[display("nice_to_have")]
    NiceToHave,
}

/// A role or project that skills are measured against.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Target {
    pub id: Uuid,
    pub name: String,
    pub kind: TargetKind,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub status: TargetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Target {
    pub fn new(name: impl Into<String>, kind: TargetKind, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            description: None,
            owner_id,
            status: TargetStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RequirementEntry {
    pub id: Uuid,
    pub target_id: Uuid,
    pub skill_id: Uuid,
    pub required_level: i16,
    pub importance: Importance,
}

impl RequirementEntry {
    pub fn new(target_id: Uuid, skill_id: Uuid, required_level: i16, importance: Importance) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_id,
            skill_id,
            required_level,
            importance,
        }
    }
}

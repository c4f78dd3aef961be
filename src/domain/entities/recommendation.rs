use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    learning_resource::{LearningResource, ResourceLevel},
    skill::SkillCategory,
    target::Importance,
};

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub skill_id: Uuid,
    pub skill_name: String,
    pub skill_category: SkillCategory,
    pub importance: Importance,
    pub current_level: i16,
    /// The requirement's level, not the difficulty of the resources.
    pub target_level: i16,
    pub gap: i16,
    pub resource_level: ResourceLevel,
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub target_id: Uuid,
    pub limit: Option<i64>,
}

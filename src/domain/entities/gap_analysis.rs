use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{skill::SkillCategory, target::Importance};

/// An unmet requirement. `current_level` is 0 when no approved record exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGap {
    pub skill_id: Uuid,
    pub skill_name: String,
    pub skill_category: SkillCategory,
    pub required_level: i16,
    pub current_level: i16,
    pub gap: i16,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub skill_id: Uuid,
    pub skill_name: String,
    pub skill_category: SkillCategory,
    pub required_level: i16,
    pub current_level: i16,
    pub importance: Importance,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapAnalysis {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub target_id: Uuid,
    pub target_name: String,
    pub match_score: f64,
    pub matches: Vec<SkillMatch>,
    pub gaps: Vec<SkillGap>,
    pub missing: Vec<SkillGap>,
}

#[derive(Debug, Deserialize)]
pub struct GapAnalysisQuery {
    pub target_id: Uuid,
}

/// Percentage of requirements met, rounded to two decimals.
/// A target without requirements scores 0.
pub fn match_score(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let score = matched as f64 * 100.0 / total as f64;
    (score * 100.0).round() / 100.0
}

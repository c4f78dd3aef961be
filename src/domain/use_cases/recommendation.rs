use uuid::Uuid;

use crate::{
    constants::{DEFAULT_RECOMMENDATION_LIMIT, MAX_RESOURCES_PER_SKILL},
    entities::{
        gap_analysis::SkillGap,
        learning_resource::{LearningResource, ResourceLevel},
        recommendation::Recommendation,
    },
    errors::AppError,
    repositories::{
        employee_skill::EmployeeSkillRepository,
        learning_resource::LearningResourceRepository,
        requirement::RequirementRepository,
        skill::SkillRepository,
    },
    use_cases::gap_analysis::GapAnalysisHandler,
};

/// Orders unmet requirements: must-haves first, then larger gaps first.
/// The sort is stable, so equal entries keep gaps-before-missing order.
pub fn rank_gaps(gaps: Vec<SkillGap>, missing: Vec<SkillGap>) -> Vec<SkillGap> {
    let mut ranked = gaps;
    ranked.extend(missing);
    ranked.sort_by(|a, b| {
        a.importance
            .cmp(&b.importance)
            .then_with(|| b.gap.cmp(&a.gap))
    });
    ranked
}

fn resolve_limit(limit: Option<i64>) -> Result<usize, AppError> {
    let limit = limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    if limit < 0 {
        return Err(AppError::validation("limit", "Limit cannot be negative"));
    }
    // Saturate where usize is narrower than i64
    Ok(usize::try_from(limit).unwrap_or(usize::MAX))
}

pub struct RecommendationHandler<S, R, C, L>
where
    S: EmployeeSkillRepository,
    R: RequirementRepository,
    C: SkillRepository,
    L: LearningResourceRepository,
{
    pub gap_analysis: GapAnalysisHandler<S, R, C>,
    pub resource_repo: L,
}

impl<S, R, C, L> RecommendationHandler<S, R, C, L>
where
    S: EmployeeSkillRepository,
    R: RequirementRepository,
    C: SkillRepository,
    L: LearningResourceRepository,
{
    pub fn new(gap_analysis: GapAnalysisHandler<S, R, C>, resource_repo: L) -> Self {
        RecommendationHandler {
            gap_analysis,
            resource_repo,
        }
    }

    /// Ranks the employee's unmet requirements for the target and attaches
    /// up to three learning resources to each
    pub async fn recommend(
        &self,
        employee_id: &Uuid,
        target_id: &Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Recommendation>, AppError> {
        let limit = resolve_limit(limit)?;

        let analysis = self.gap_analysis.analyze(employee_id, target_id).await?;
        let ranked = rank_gaps(analysis.gaps, analysis.missing);

        let mut recommendations = Vec::with_capacity(limit.min(ranked.len()));

        for gap in ranked.into_iter().take(limit) {
            let resource_level = ResourceLevel::for_current_level(gap.current_level);
            let resources = self.resources_for(&gap.skill_id, resource_level).await?;

            recommendations.push(Recommendation {
                skill_id: gap.skill_id,
                skill_name: gap.skill_name,
                skill_category: gap.skill_category,
                importance: gap.importance,
                current_level: gap.current_level,
                target_level: gap.required_level,
                gap: gap.gap,
                resource_level,
                resources,
            });
        }

        Ok(recommendations)
    }

    /// Resources at the given difficulty, or any difficulty when none match
    async fn resources_for(
        &self,
        skill_id: &Uuid,
        level: ResourceLevel,
    ) -> Result<Vec<LearningResource>, AppError> {
        let mut resources = self.resource_repo
            .find_resources_by_skill_and_level(skill_id, level)
            .await?;

        if resources.is_empty() {
            resources = self.resource_repo.find_resources_by_skill(skill_id).await?;
        }

        resources.truncate(MAX_RESOURCES_PER_SKILL);
        Ok(resources)
    }
}

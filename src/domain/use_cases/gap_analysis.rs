use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    entities::{
        gap_analysis::{match_score, GapAnalysis, SkillGap, SkillMatch},
        skill::Skill,
        target::RequirementEntry,
    },
    errors::AppError,
    repositories::{
        employee_skill::EmployeeSkillRepository,
        requirement::RequirementRepository,
        skill::SkillRepository,
    },
};

enum Classification {
    Matched(SkillMatch),
    Gapped(SkillGap),
    Missing(SkillGap),
}

fn classify(requirement: &RequirementEntry, skill: Skill, current_level: i16) -> Classification {
    let required_level = requirement.required_level;

    // No approved record counts as missing whatever level is required
    if current_level > 0 && current_level >= required_level {
        return Classification::Matched(SkillMatch {
            skill_id: skill.id,
            skill_name: skill.name,
            skill_category: skill.category,
            required_level,
            current_level,
            importance: requirement.importance,
        });
    }

    let gap = SkillGap {
        skill_id: skill.id,
        skill_name: skill.name,
        skill_category: skill.category,
        required_level,
        current_level,
        gap: required_level - current_level,
        importance: requirement.importance,
    };

    if current_level == 0 {
        Classification::Missing(gap)
    } else {
        Classification::Gapped(gap)
    }
}

#[derive(Clone)]
pub struct GapAnalysisHandler<S, R, C>
where
    S: EmployeeSkillRepository,
    R: RequirementRepository,
    C: SkillRepository,
{
    pub employee_skill_repo: S,
    pub requirement_repo: R,
    pub skill_repo: C,
}

impl<S, R, C> GapAnalysisHandler<S, R, C>
where
    S: EmployeeSkillRepository,
    R: RequirementRepository,
    C: SkillRepository,
{
    pub fn new(employee_skill_repo: S, requirement_repo: R, skill_repo: C) -> Self {
        GapAnalysisHandler {
            employee_skill_repo,
            requirement_repo,
            skill_repo,
        }
    }

    /// Compares the employee's approved skills with every requirement of the target
    pub async fn analyze(&self, employee_id: &Uuid, target_id: &Uuid) -> Result<GapAnalysis, AppError> {
        let employee = self.employee_skill_repo.find_employee_by_id(employee_id).await?;
        let target = self.requirement_repo.find_target_by_id(target_id).await?;

        let requirements = self.requirement_repo.find_requirements_by_target(target_id).await?;

        let current_levels: HashMap<Uuid, i16> = self.employee_skill_repo
            .find_approved_skills_by_employee(employee_id)
            .await?
            .into_iter()
            .map(|record| (record.skill_id, record.proficiency_level))
            .collect();

        let mut matches = Vec::new();
        let mut gaps = Vec::new();
        let mut missing = Vec::new();

        for requirement in &requirements {
            // A requirement pointing at a deleted skill aborts the analysis
            let skill = self.skill_repo.find_skill_by_id(&requirement.skill_id).await?;
            let current_level = current_levels.get(&requirement.skill_id).copied().unwrap_or(0);

            match classify(requirement, skill, current_level) {
                Classification::Matched(m) => matches.push(m),
                Classification::Gapped(g) => gaps.push(g),
                Classification::Missing(g) => missing.push(g),
            }
        }

        let match_score = match_score(matches.len(), requirements.len());

        tracing::debug!(
            %employee_id,
            %target_id,
            requirements = requirements.len(),
            matched = matches.len(),
            gapped = gaps.len(),
            missing = missing.len(),
            "gap analysis computed"
        );

        Ok(GapAnalysis {
            employee_id: employee.id,
            employee_name: employee.name,
            target_id: target.id,
            target_name: target.name,
            match_score,
            matches,
            gaps,
            missing,
        })
    }
}

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::db;

use shared_repos::{
    DynEmployeeSkillRepo, DynLearningResourceRepo, DynRequirementRepo, DynSkillRepo, SharedRepositories,
};
use use_cases::{
    approval::ApprovalHandler,
    gap_analysis::GapAnalysisHandler,
    recommendation::RecommendationHandler,
};

pub type AppGapAnalysisHandler = GapAnalysisHandler<DynEmployeeSkillRepo, DynRequirementRepo, DynSkillRepo>;
pub type AppRecommendationHandler =
    RecommendationHandler<DynEmployeeSkillRepo, DynRequirementRepo, DynSkillRepo, DynLearningResourceRepo>;
pub type AppApprovalHandler = ApprovalHandler<DynEmployeeSkillRepo, DynSkillRepo>;

pub struct AppState {
    pub gap_analysis_handler: AppGapAnalysisHandler,
    pub recommendation_handler: AppRecommendationHandler,
    pub approval_handler: AppApprovalHandler,
    pub repos: SharedRepositories,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, repos: SharedRepositories) -> Self {
        let gap_analysis_handler = GapAnalysisHandler::new(
            repos.employee_skill_repo.clone(),
            repos.requirement_repo.clone(),
            repos.skill_repo.clone(),
        );

        let recommendation_handler = RecommendationHandler::new(
            gap_analysis_handler.clone(),
            repos.resource_repo.clone(),
        );

        let approval_handler = ApprovalHandler::new(
            repos.employee_skill_repo.clone(),
            repos.skill_repo.clone(),
            config.require_reapproval_on_update,
        );

        AppState {
            gap_analysis_handler,
            recommendation_handler,
            approval_handler,
            repos,
        }
    }
}

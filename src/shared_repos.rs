use std::sync::Arc;

use crate::repositories::{
    employee_skill::EmployeeSkillRepository,
    learning_resource::LearningResourceRepository,
    memory::MemoryRepo,
    requirement::RequirementRepository,
    skill::SkillRepository,
    sqlx_repo::{SqlxEmployeeSkillRepo, SqlxLearningResourceRepo, SqlxRequirementRepo, SqlxSkillRepo},
};

pub type DynSkillRepo = Arc<dyn SkillRepository>;
pub type DynRequirementRepo = Arc<dyn RequirementRepository>;
pub type DynEmployeeSkillRepo = Arc<dyn EmployeeSkillRepository>;
pub type DynLearningResourceRepo = Arc<dyn LearningResourceRepository>;

#[derive(Clone)]
pub struct SharedRepositories {
    pub skill_repo: DynSkillRepo,
    pub requirement_repo: DynRequirementRepo,
    pub employee_skill_repo: DynEmployeeSkillRepo,
    pub resource_repo: DynLearningResourceRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let skill_repo = SqlxSkillRepo::new(pool.clone());
        let requirement_repo = SqlxRequirementRepo::new(pool.clone());
        let employee_skill_repo = SqlxEmployeeSkillRepo::new(pool.clone());
        let resource_repo = SqlxLearningResourceRepo::new(pool);

        SharedRepositories {
            skill_repo: Arc::new(skill_repo),
            requirement_repo: Arc::new(requirement_repo),
            employee_skill_repo: Arc::new(employee_skill_repo),
            resource_repo: Arc::new(resource_repo),
        }
    }

    pub fn in_memory(store: Arc<MemoryRepo>) -> Self {
        SharedRepositories {
            skill_repo: store.clone(),
            requirement_repo: store.clone(),
            employee_skill_repo: store.clone(),
            resource_repo: store,
        }
    }
}

use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxSkillRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxRequirementRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxEmployeeSkillRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxLearningResourceRepo {
    pub pool: PgPool,
}

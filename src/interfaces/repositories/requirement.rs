use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::target::{RequirementEntry, Target},
    errors::AppError,
    repositories::sqlx_repo::SqlxRequirementRepo,
};

#[async_trait]
pub trait RequirementRepository: Send + Sync {
    /// Retrieves a role or project by id
    async fn find_target_by_id(&self, id: &Uuid) -> Result<Target, AppError>;

    /// Lists every skill requirement declared for the target, in no particular order
    async fn find_requirements_by_target(&self, target_id: &Uuid) -> Result<Vec<RequirementEntry>, AppError>;
}

#[async_trait]
impl<T: RequirementRepository + ?Sized> RequirementRepository for Arc<T> {
    async fn find_target_by_id(&self, id: &Uuid) -> Result<Target, AppError> {
        (**self).find_target_by_id(id).await
    }

    async fn find_requirements_by_target(&self, target_id: &Uuid) -> Result<Vec<RequirementEntry>, AppError> {
        (**self).find_requirements_by_target(target_id).await
    }
}

impl SqlxRequirementRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxRequirementRepo { pool }
    }
}

#[async_trait]
impl RequirementRepository for SqlxRequirementRepo {
    async fn find_target_by_id(&self, id: &Uuid) -> Result<Target, AppError> {
        sqlx::query_as::<_, Target>("SELECT * FROM targets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role or project {}", id)))
    }

    async fn find_requirements_by_target(&self, target_id: &Uuid) -> Result<Vec<RequirementEntry>, AppError> {
        let requirements = sqlx::query_as::<_, RequirementEntry>(
            r#"
            SELECT id, target_id, skill_id, required_level, importance
            FROM target_requirements
            WHERE target_id = $1
            "#
        )
        .bind(target_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requirements)
    }
}

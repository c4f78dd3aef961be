use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::learning_resource::{LearningResource, ResourceLevel},
    errors::AppError,
    repositories::sqlx_repo::SqlxLearningResourceRepo,
};

#[async_trait]
pub trait LearningResourceRepository: Send + Sync {
    async fn find_resources_by_skill_and_level(
        &self,
        skill_id: &Uuid,
        level: ResourceLevel,
    ) -> Result<Vec<LearningResource>, AppError>;

    async fn find_resources_by_skill(&self, skill_id: &Uuid) -> Result<Vec<LearningResource>, AppError>;
}

#[async_trait]
impl<T: LearningResourceRepository + ?Sized> LearningResourceRepository for Arc<T> {
    async fn find_resources_by_skill_and_level(
        &self,
        skill_id: &Uuid,
        level: ResourceLevel,
    ) -> Result<Vec<LearningResource>, AppError> {
        (**self).find_resources_by_skill_and_level(skill_id, level).await
    }

    async fn find_resources_by_skill(&self, skill_id: &Uuid) -> Result<Vec<LearningResource>, AppError> {
        (**self).find_resources_by_skill(skill_id).await
    }
}

impl SqlxLearningResourceRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxLearningResourceRepo { pool }
    }
}

#[async_trait]
impl LearningResourceRepository for SqlxLearningResourceRepo {
    async fn find_resources_by_skill_and_level(
        &self,
        skill_id: &Uuid,
        level: ResourceLevel,
    ) -> Result<Vec<LearningResource>, AppError> {
        let resources = sqlx::query_as::<_, LearningResource>(
            r#"
            SELECT * FROM learning_resources
            WHERE skill_id = $1 AND level = $2
            ORDER BY created_at
            "#
        )
        .bind(skill_id)
        .bind(level)
        .fetch_all(&self.pool)
        .await?;

        Ok(resources)
    }

    async fn find_resources_by_skill(&self, skill_id: &Uuid) -> Result<Vec<LearningResource>, AppError> {
        let resources = sqlx::query_as::<_, LearningResource>(
            r#"SELECT * FROM learning_resources WHERE skill_id = $1 ORDER BY created_at"#
        )
        .bind(skill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(resources)
    }
}

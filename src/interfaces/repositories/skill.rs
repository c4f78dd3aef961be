use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{entities::skill::Skill, errors::AppError, repositories::sqlx_repo::SqlxSkillRepo};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Looks up catalog metadata, `NotFound` when the skill does not exist
    async fn find_skill_by_id(&self, id: &Uuid) -> Result<Skill, AppError>;
}

#[async_trait]
impl<T: SkillRepository + ?Sized> SkillRepository for Arc<T> {
    async fn find_skill_by_id(&self, id: &Uuid) -> Result<Skill, AppError> {
        (**self).find_skill_by_id(id).await
    }
}

impl SqlxSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn find_skill_by_id(&self, id: &Uuid) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Skill {}", id)))
    }
}

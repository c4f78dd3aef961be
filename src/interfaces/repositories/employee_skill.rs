use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        employee::Employee,
        employee_skill::{ApprovalDecision, ApprovalState, EmployeeSkillRecord, UpdateEmployeeSkillRequest},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxEmployeeSkillRepo,
};

#[async_trait]
pub trait EmployeeSkillRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;

    async fn find_employee_by_id(&self, id: &Uuid) -> Result<Employee, AppError>;

    /// Records in the `approved` state only
    async fn find_approved_skills_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError>;

    /// Records in every state, oldest first
    async fn find_skill_records_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError>;

    /// Pending records of the manager's direct reports, oldest first
    async fn find_pending_for_manager(&self, manager_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError>;

    async fn find_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<EmployeeSkillRecord, AppError>;

    /// Fails with `Conflict` when the employee already holds a record for the skill
    async fn insert_skill_record(&self, record: &EmployeeSkillRecord) -> Result<(), AppError>;

    /// Applies the update to the stored record as one read-modify-write
    async fn revise_skill_record(
        &self,
        employee_id: &Uuid,
        skill_id: &Uuid,
        update: &UpdateEmployeeSkillRequest,
        require_reapproval: bool,
    ) -> Result<EmployeeSkillRecord, AppError>;

    /// Checks the record is pending and writes the decision atomically
    async fn apply_decision(&self, record_id: &Uuid, decision: &ApprovalDecision) -> Result<EmployeeSkillRecord, AppError>;

    async fn delete_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<(), AppError>;
}

#[async_trait]
impl<T: EmployeeSkillRepository + ?Sized> EmployeeSkillRepository for Arc<T> {
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn find_employee_by_id(&self, id: &Uuid) -> Result<Employee, AppError> {
        (**self).find_employee_by_id(id).await
    }

    async fn find_approved_skills_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        (**self).find_approved_skills_by_employee(employee_id).await
    }

    async fn find_skill_records_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        (**self).find_skill_records_by_employee(employee_id).await
    }

    async fn find_pending_for_manager(&self, manager_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        (**self).find_pending_for_manager(manager_id).await
    }

    async fn find_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<EmployeeSkillRecord, AppError> {
        (**self).find_skill_record(employee_id, skill_id).await
    }

    async fn insert_skill_record(&self, record: &EmployeeSkillRecord) -> Result<(), AppError> {
        (**self).insert_skill_record(record).await
    }

    async fn revise_skill_record(
        &self,
        employee_id: &Uuid,
        skill_id: &Uuid,
        update: &UpdateEmployeeSkillRequest,
        require_reapproval: bool,
    ) -> Result<EmployeeSkillRecord, AppError> {
        (**self).revise_skill_record(employee_id, skill_id, update, require_reapproval).await
    }

    async fn apply_decision(&self, record_id: &Uuid, decision: &ApprovalDecision) -> Result<EmployeeSkillRecord, AppError> {
        (**self).apply_decision(record_id, decision).await
    }

    async fn delete_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<(), AppError> {
        (**self).delete_skill_record(employee_id, skill_id).await
    }
}

impl SqlxEmployeeSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxEmployeeSkillRepo { pool }
    }

    async fn write_record<'c, E>(executor: E, record: &EmployeeSkillRecord) -> Result<(), AppError>
    where
        E: sqlx::PgExecutor<'c>,
    {
        sqlx::query(
            r#"
            UPDATE employee_skills
            SET
                proficiency_level = $2,
                interest_level = $3,
                years_experience = $4,
                last_used_date = $5,
                source = $6,
                approval_state = $7,
                approver_id = $8,
                approved_at = $9,
                rejection_reason = $10,
                updated_at = $11
            WHERE id = $1
            "#
        )
        .bind(record.id)
        .bind(record.proficiency_level)
        .bind(record.interest_level)
        .bind(record.years_experience)
        .bind(record.last_used_date)
        .bind(record.source)
        .bind(record.approval_state)
        .bind(record.approver_id)
        .bind(record.approved_at)
        .bind(record.rejection_reason.as_deref())
        .bind(record.updated_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl EmployeeSkillRepository for SqlxEmployeeSkillRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn find_employee_by_id(&self, id: &Uuid) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {}", id)))
    }

    async fn find_approved_skills_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        let records = sqlx::query_as::<_, EmployeeSkillRecord>(
            r#"SELECT * FROM employee_skills WHERE employee_id = $1 AND approval_state = $2"#
        )
        .bind(employee_id)
        .bind(ApprovalState::Approved)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_skill_records_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        let records = sqlx::query_as::<_, EmployeeSkillRecord>(
            r#"SELECT * FROM employee_skills WHERE employee_id = $1 ORDER BY created_at"#
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_pending_for_manager(&self, manager_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        let records = sqlx::query_as::<_, EmployeeSkillRecord>(
            r#"
            SELECT es.*
            FROM employee_skills es
            JOIN employees e ON e.id = es.employee_id
            WHERE e.manager_id = $1 AND es.approval_state = $2
            ORDER BY es.created_at
            "#
        )
        .bind(manager_id)
        .bind(ApprovalState::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<EmployeeSkillRecord, AppError> {
        sqlx::query_as::<_, EmployeeSkillRecord>(
            r#"SELECT * FROM employee_skills WHERE employee_id = $1 AND skill_id = $2"#
        )
        .bind(employee_id)
        .bind(skill_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee skill not found".into()))
    }

    async fn insert_skill_record(&self, record: &EmployeeSkillRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO employee_skills (
                id,
                employee_id,
                skill_id,
                proficiency_level,
                interest_level,
                years_experience,
                last_used_date,
                source,
                approval_state,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#
        )
        .bind(record.id)
        .bind(record.employee_id)
        .bind(record.skill_id)
        .bind(record.proficiency_level)
        .bind(record.interest_level)
        .bind(record.years_experience)
        .bind(record.last_used_date)
        .bind(record.source)
        .bind(record.approval_state)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    AppError::Conflict("Employee already has this skill".to_string())
                }
                _ => AppError::from(e),
            }
        })?;

        Ok(())
    }

    async fn revise_skill_record(
        &self,
        employee_id: &Uuid,
        skill_id: &Uuid,
        update: &UpdateEmployeeSkillRequest,
        require_reapproval: bool,
    ) -> Result<EmployeeSkillRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut record = sqlx::query_as::<_, EmployeeSkillRecord>(
            r#"SELECT * FROM employee_skills WHERE employee_id = $1 AND skill_id = $2 FOR UPDATE"#
        )
        .bind(employee_id)
        .bind(skill_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee skill not found".into()))?;

        record.revise(update, require_reapproval);
        Self::write_record(&mut *tx, &record).await?;
        tx.commit().await?;

        Ok(record)
    }

    async fn apply_decision(&self, record_id: &Uuid, decision: &ApprovalDecision) -> Result<EmployeeSkillRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serialises concurrent reviewers of the same record
        let mut record = sqlx::query_as::<_, EmployeeSkillRecord>(
            r#"SELECT * FROM employee_skills WHERE id = $1 FOR UPDATE"#
        )
        .bind(record_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee skill {}", record_id)))?;

        let employee_manager: Option<Uuid> = sqlx::query_scalar(
            r#"SELECT manager_id FROM employees WHERE id = $1"#
        )
        .bind(record.employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .flatten();

        record.apply_decision(decision, employee_manager)?;
        Self::write_record(&mut *tx, &record).await?;
        tx.commit().await?;

        Ok(record)
    }

    async fn delete_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"DELETE FROM employee_skills WHERE employee_id = $1 AND skill_id = $2"#
        )
        .bind(employee_id)
        .bind(skill_id)
        .execute(&self.pool)
        .await
        .map(|result| {
            if result.rows_affected() == 0 {
                Err(AppError::NotFound("Employee skill not found".into()))
            } else {
                Ok(())
            }
        })?
    }
}

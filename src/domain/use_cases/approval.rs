use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::employee_skill::{
        ApprovalDecision, EmployeeSkillRecord, EmployeeSkillResponse, NewEmployeeSkill, PendingSkill,
        SkillRejectionRequest, UpdateEmployeeSkillRequest,
    },
    errors::AppError,
    repositories::{employee_skill::EmployeeSkillRepository, skill::SkillRepository},
};

pub struct ApprovalHandler<S, C>
where
    S: EmployeeSkillRepository,
    C: SkillRepository,
{
    pub employee_skill_repo: S,
    pub skill_repo: C,
    pub require_reapproval_on_update: bool,
}

impl<S, C> ApprovalHandler<S, C>
where
    S: EmployeeSkillRepository,
    C: SkillRepository,
{
    pub fn new(employee_skill_repo: S, skill_repo: C, require_reapproval_on_update: bool) -> Self {
        ApprovalHandler {
            employee_skill_repo,
            skill_repo,
            require_reapproval_on_update,
        }
    }

    /// Declares a skill for the employee; the record starts out pending
    pub async fn submit(
        &self,
        employee_id: &Uuid,
        request: NewEmployeeSkill,
    ) -> Result<EmployeeSkillResponse, AppError> {
        request.validate()?;

        self.employee_skill_repo.find_employee_by_id(employee_id).await?;
        let skill = self.skill_repo.find_skill_by_id(&request.skill_id).await?;

        let record = request.prepare_for_insert(*employee_id);
        self.employee_skill_repo.insert_skill_record(&record).await?;

        tracing::info!(record_id = %record.id, %employee_id, skill_id = %skill.id, "Skill submitted for approval");
        Ok(EmployeeSkillResponse::new(record, &skill))
    }

    /// Approves a pending record on behalf of the employee's direct manager
    pub async fn approve(&self, record_id: &Uuid, manager_id: &Uuid) -> Result<EmployeeSkillRecord, AppError> {
        self.employee_skill_repo.find_employee_by_id(manager_id).await?;

        let record = self.employee_skill_repo
            .apply_decision(record_id, &ApprovalDecision::approve(*manager_id))
            .await?;

        tracing::info!(%record_id, %manager_id, "Skill approved");
        Ok(record)
    }

    /// Rejects a pending record, keeping the manager's reason.
    /// Same reviewer rule as `approve`.
    pub async fn reject(
        &self,
        record_id: &Uuid,
        request: SkillRejectionRequest,
    ) -> Result<EmployeeSkillRecord, AppError> {
        request.validate()?;

        self.employee_skill_repo.find_employee_by_id(&request.manager_id).await?;

        let decision = ApprovalDecision::reject(request.manager_id, request.reason);
        let record = self.employee_skill_repo.apply_decision(record_id, &decision).await?;

        tracing::info!(%record_id, manager_id = %request.manager_id, "Skill rejected");
        Ok(record)
    }

    /// Overwrites the declared levels of an existing record
    pub async fn update(
        &self,
        employee_id: &Uuid,
        skill_id: &Uuid,
        request: UpdateEmployeeSkillRequest,
    ) -> Result<EmployeeSkillResponse, AppError> {
        request.validate()?;

        let skill = self.skill_repo.find_skill_by_id(skill_id).await?;
        let record = self.employee_skill_repo
            .revise_skill_record(employee_id, skill_id, &request, self.require_reapproval_on_update)
            .await?;

        Ok(EmployeeSkillResponse::new(record, &skill))
    }

    /// Removes the record whatever its state
    pub async fn delete(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<(), AppError> {
        self.employee_skill_repo.delete_skill_record(employee_id, skill_id).await?;

        tracing::info!(%employee_id, %skill_id, "Employee skill deleted");
        Ok(())
    }

    pub async fn get_employee_skill(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<EmployeeSkillResponse, AppError> {
        let record = self.employee_skill_repo.find_skill_record(employee_id, skill_id).await?;
        let skill = self.skill_repo.find_skill_by_id(skill_id).await?;
        Ok(EmployeeSkillResponse::new(record, &skill))
    }

    /// Lists the employee's records in every approval state
    pub async fn list_employee_skills(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillResponse>, AppError> {
        self.employee_skill_repo.find_employee_by_id(employee_id).await?;
        let records = self.employee_skill_repo.find_skill_records_by_employee(employee_id).await?;
        self.with_skills(records).await
    }

    pub async fn list_approved_skills(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillResponse>, AppError> {
        self.employee_skill_repo.find_employee_by_id(employee_id).await?;
        let records = self.employee_skill_repo.find_approved_skills_by_employee(employee_id).await?;
        self.with_skills(records).await
    }

    /// Pending submissions from the manager's direct reports
    pub async fn list_pending_for_manager(&self, manager_id: &Uuid) -> Result<Vec<PendingSkill>, AppError> {
        self.employee_skill_repo.find_employee_by_id(manager_id).await?;
        let records = self.employee_skill_repo.find_pending_for_manager(manager_id).await?;

        let mut pending = Vec::with_capacity(records.len());
        for record in records {
            let employee = self.employee_skill_repo.find_employee_by_id(&record.employee_id).await?;
            let skill = self.skill_repo.find_skill_by_id(&record.skill_id).await?;

            pending.push(PendingSkill {
                id: record.id,
                employee_id: employee.id,
                employee_name: employee.name,
                employee_email: employee.email,
                skill_id: skill.id,
                skill_name: skill.name,
                skill_category: skill.category,
                proficiency_level: record.proficiency_level,
                interest_level: record.interest_level,
                years_experience: record.years_experience,
                last_used_date: record.last_used_date,
                source: record.source,
                submitted_at: record.created_at,
            });
        }

        Ok(pending)
    }

    async fn with_skills(&self, records: Vec<EmployeeSkillRecord>) -> Result<Vec<EmployeeSkillResponse>, AppError> {
        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            let skill = self.skill_repo.find_skill_by_id(&record.skill_id).await?;
            responses.push(EmployeeSkillResponse::new(record, &skill));
        }
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        entities::{
            employee::Employee,
            employee_skill::{ApprovalState, SkillSource},
            skill::{Skill, SkillCategory},
        },
        repositories::memory::MemoryRepo,
    };

    struct Fixture {
        handler: ApprovalHandler<Arc<MemoryRepo>, Arc<MemoryRepo>>,
        repo: Arc<MemoryRepo>,
        employee_id: Uuid,
        manager_id: Uuid,
        skill_id: Uuid,
    }

    fn fixture(require_reapproval: bool) -> Fixture {
        let repo = Arc::new(MemoryRepo::new());
        let manager_id = repo.add_employee(Employee::new("Grace", "grace@example.com", None));
        let employee_id = repo.add_employee(Employee::new("Ada", "ada@example.com", Some(manager_id)));
        let skill_id = repo.add_skill(Skill::new("Rust", SkillCategory::Language));

        Fixture {
            handler: ApprovalHandler::new(repo.clone(), repo.clone(), require_reapproval),
            repo,
            employee_id,
            manager_id,
            skill_id,
        }
    }

    fn declaration(skill_id: Uuid, level: i16) -> NewEmployeeSkill {
        NewEmployeeSkill {
            skill_id,
            proficiency_level: level,
            interest_level: 2,
            years_experience: Some(2.0),
            last_used_date: None,
            source: SkillSource::SelfReported,
        }
    }

    fn update_to(level: i16) -> UpdateEmployeeSkillRequest {
        UpdateEmployeeSkillRequest {
            proficiency_level: level,
            interest_level: 1,
            years_experience: None,
            last_used_date: None,
        }
    }

    #[tokio::test]
    async fn submit_then_approve() {
        let f = fixture(false);

        let submitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 2)).await.unwrap();
        assert_eq!(submitted.record.approval_state, ApprovalState::Pending);
        assert_eq!(submitted.skill_name, "Rust");

        let approved = f.handler.approve(&submitted.record.id, &f.manager_id).await.unwrap();
        assert_eq!(approved.approval_state, ApprovalState::Approved);
        assert_eq!(approved.approver_id, Some(f.manager_id));
        assert_eq!(approved.source, SkillSource::ManagerValidated);

        let approved_list = f.handler.list_approved_skills(&f.employee_id).await.unwrap();
        assert_eq!(approved_list.len(), 1);
    }

    #[tokio::test]
    async fn second_approval_is_rejected_and_first_review_stands() {
        let f = fixture(false);
        let submitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 2)).await.unwrap();

        let first = f.handler.approve(&submitted.record.id, &f.manager_id).await.unwrap();
        let err = f.handler.approve(&submitted.record.id, &f.manager_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        let stored = f.handler.list_employee_skills(&f.employee_id).await.unwrap();
        assert_eq!(stored[0].record.approver_id, first.approver_id);
        assert_eq!(stored[0].record.approved_at, first.approved_at);
    }

    #[tokio::test]
    async fn employees_cannot_approve_their_own_skills() {
        let f = fixture(false);
        let submitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 3)).await.unwrap();

        let err = f.handler.approve(&submitted.record.id, &f.employee_id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let stored = f.handler.get_employee_skill(&f.employee_id, &f.skill_id).await.unwrap();
        assert_eq!(stored.record.approval_state, ApprovalState::Pending);
        assert_eq!(stored.record.source, SkillSource::SelfReported);
        assert!(f.handler.list_approved_skills(&f.employee_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_the_direct_manager_can_review() {
        let f = fixture(false);
        let other_manager = f.repo.add_employee(Employee::new("Linus", "linus@example.com", None));
        let submitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 2)).await.unwrap();

        let err = f.handler.approve(&submitted.record.id, &other_manager).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = f.handler
            .reject(&submitted.record.id, SkillRejectionRequest { manager_id: other_manager, reason: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let stored = f.handler.get_employee_skill(&f.employee_id, &f.skill_id).await.unwrap();
        assert_eq!(stored.record.approval_state, ApprovalState::Pending);
        assert!(stored.record.approver_id.is_none());
    }

    #[tokio::test]
    async fn rejected_records_cannot_be_approved() {
        let f = fixture(false);
        let submitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 2)).await.unwrap();

        let rejected = f.handler
            .reject(&submitted.record.id, SkillRejectionRequest {
                manager_id: f.manager_id,
                reason: Some("Needs a project reference".into()),
            })
            .await
            .unwrap();
        assert_eq!(rejected.approval_state, ApprovalState::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Needs a project reference"));

        let err = f.handler.approve(&submitted.record.id, &f.manager_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn duplicate_submission_conflicts_until_deleted() {
        let f = fixture(false);
        f.handler.submit(&f.employee_id, declaration(f.skill_id, 1)).await.unwrap();

        let err = f.handler.submit(&f.employee_id, declaration(f.skill_id, 3)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        f.handler.delete(&f.employee_id, &f.skill_id).await.unwrap();
        let resubmitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 3)).await.unwrap();
        assert_eq!(resubmitted.record.proficiency_level, 3);
    }

    #[tokio::test]
    async fn submit_validates_levels_and_references() {
        let f = fixture(false);

        let err = f.handler.submit(&f.employee_id, declaration(f.skill_id, 5)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = f.handler.submit(&Uuid::new_v4(), declaration(f.skill_id, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = f.handler.submit(&f.employee_id, declaration(Uuid::new_v4(), 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_keeps_approval_by_default() {
        let f = fixture(false);
        let submitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 1)).await.unwrap();
        f.handler.approve(&submitted.record.id, &f.manager_id).await.unwrap();

        let updated = f.handler.update(&f.employee_id, &f.skill_id, update_to(3)).await.unwrap();

        assert_eq!(updated.record.proficiency_level, 3);
        assert_eq!(updated.record.approval_state, ApprovalState::Approved);
    }

    #[tokio::test]
    async fn update_can_force_reapproval() {
        let f = fixture(true);
        let submitted = f.handler.submit(&f.employee_id, declaration(f.skill_id, 1)).await.unwrap();
        f.handler.approve(&submitted.record.id, &f.manager_id).await.unwrap();

        let updated = f.handler.update(&f.employee_id, &f.skill_id, update_to(3)).await.unwrap();

        assert_eq!(updated.record.approval_state, ApprovalState::Pending);
        let pending = f.handler.list_pending_for_manager(&f.manager_id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].proficiency_level, 3);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let f = fixture(false);

        let err = f.handler.update(&f.employee_id, &f.skill_id, update_to(2)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = f.handler.delete(&f.employee_id, &f.skill_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = f.handler.approve(&Uuid::new_v4(), &f.manager_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn pending_queue_lists_direct_reports_only() {
        let f = fixture(false);
        f.handler.submit(&f.employee_id, declaration(f.skill_id, 2)).await.unwrap();

        let pending = f.handler.list_pending_for_manager(&f.manager_id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].employee_name, "Ada");
        assert_eq!(pending[0].skill_name, "Rust");

        let none = f.handler.list_pending_for_manager(&f.employee_id).await.unwrap();
        assert!(none.is_empty());
    }
}

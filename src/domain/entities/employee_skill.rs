use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{entities::skill::{Skill, SkillCategory}, errors::AppError};

// ───── Enumerations ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    #[default]
    #[display("self_reported")]
    SelfReported,
    #[display("manager_validated")]
    ManagerValidated,
    #[display("certification")]
    Certification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    #[display("pending")]
    Pending,
    #[display("approved")]
    Approved,
    #[display("rejected")]
    Rejected,
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EmployeeSkillRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub skill_id: Uuid,
    pub proficiency_level: i16,
    pub interest_level: i16,
    pub years_experience: Option<f64>,
    pub last_used_date: Option<NaiveDate>,
    pub source: SkillSource,
    pub approval_state: ApprovalState,
    pub approver_id: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A manager's verdict on a pending record.
#[derive(Debug, Clone)]
pub enum ApprovalDecision {
    Approve {
        manager_id: Uuid,
        decided_at: DateTime<Utc>,
    },
    Reject {
        manager_id: Uuid,
        decided_at: DateTime<Utc>,
        reason: Option<String>,
    },
}

impl ApprovalDecision {
    pub fn approve(manager_id: Uuid) -> Self {
        ApprovalDecision::Approve { manager_id, decided_at: Utc::now() }
    }

    pub fn reject(manager_id: Uuid, reason: Option<String>) -> Self {
        ApprovalDecision::Reject { manager_id, decided_at: Utc::now(), reason }
    }

    pub fn manager_id(&self) -> Uuid {
        match self {
            ApprovalDecision::Approve { manager_id, .. } | ApprovalDecision::Reject { manager_id, .. } => *manager_id,
        }
    }
}

impl EmployeeSkillRecord {
    /// Moves a pending record into a terminal state.
    ///
    /// `employee_manager` is the current manager of the record's owner. Only
    /// that manager may decide, and never on their own record (`Forbidden`).
    /// Leaves the record untouched and returns `InvalidState` when it is
    /// already approved or rejected.
    pub fn apply_decision(
        &mut self,
        decision: &ApprovalDecision,
        employee_manager: Option<Uuid>,
    ) -> Result<(), AppError> {
        let reviewer = decision.manager_id();
        if reviewer == self.employee_id {
            return Err(AppError::Forbidden(format!(
                "Employee {} cannot review their own skill record", reviewer
            )));
        }
        if employee_manager != Some(reviewer) {
            return Err(AppError::Forbidden(format!(
                "Employee {} is not the manager of employee {}", reviewer, self.employee_id
            )));
        }

        if self.approval_state != ApprovalState::Pending {
            return Err(AppError::InvalidState(format!(
                "Skill record {} is {}, only pending records can be reviewed",
                self.id, self.approval_state
            )));
        }

        match decision {
            ApprovalDecision::Approve { manager_id, decided_at } => {
                self.approval_state = ApprovalState::Approved;
                self.approver_id = Some(*manager_id);
                self.approved_at = Some(*decided_at);
                self.source = SkillSource::ManagerValidated;
                self.updated_at = *decided_at;
            }
            ApprovalDecision::Reject { manager_id, decided_at, reason } => {
                self.approval_state = ApprovalState::Rejected;
                self.approver_id = Some(*manager_id);
                self.approved_at = Some(*decided_at);
                self.rejection_reason = reason.clone();
                self.updated_at = *decided_at;
            }
        }

        Ok(())
    }

    /// Overwrites the self-declared values.
    ///
    /// With `require_reapproval` set, a reviewed record whose proficiency
    /// changes falls back to `pending` and loses its review metadata.
    pub fn revise(&mut self, update: &UpdateEmployeeSkillRequest, require_reapproval: bool) {
        let proficiency_changed = self.proficiency_level != update.proficiency_level;

        self.proficiency_level = update.proficiency_level;
        self.interest_level = update.interest_level;
        self.years_experience = update.years_experience;
        self.last_used_date = update.last_used_date;
        self.updated_at = Utc::now();

        if require_reapproval && proficiency_changed && self.approval_state != ApprovalState::Pending {
            self.approval_state = ApprovalState::Pending;
            self.approver_id = None;
            self.approved_at = None;
            self.rejection_reason = None;
        }
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EmployeeSkillResponse {
    #[serde(flatten)]
    pub record: EmployeeSkillRecord,
    pub skill_name: String,
    pub skill_category: SkillCategory,
}

impl EmployeeSkillResponse {
    pub fn new(record: EmployeeSkillRecord, skill: &Skill) -> Self {
        Self {
            record,
            skill_name: skill.name.clone(),
            skill_category: skill.category,
        }
    }
}

/// A pending record as shown to the reviewing manager.
#[derive(Debug, Serialize)]
pub struct PendingSkill {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_email: String,
    pub skill_id: Uuid,
    pub skill_name: String,
    pub skill_category: SkillCategory,
    pub proficiency_level: i16,
    pub interest_level: i16,
    pub years_experience: Option<f64>,
    pub last_used_date: Option<NaiveDate>,
    pub source: SkillSource,
    pub submitted_at: DateTime<Utc>,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEmployeeSkill {
    pub skill_id: Uuid,

    #[validate(range(min = 0, max = 3, message = "Proficiency level must be between 0 and 3"))]
    pub proficiency_level: i16,

    #[validate(range(min = 0, max = 3, message = "Interest level must be between 0 and 3"))]
    pub interest_level: i16,

    #[validate(range(min = 0.0, message = "Years of experience cannot be negative"))]
    pub years_experience: Option<f64>,

    pub last_used_date: Option<NaiveDate>,

    #[serde(default)]
    pub source: SkillSource,
}

impl NewEmployeeSkill {
    pub fn prepare_for_insert(&self, employee_id: Uuid) -> EmployeeSkillRecord {
        let now = Utc::now();
        EmployeeSkillRecord {
            id: Uuid::new_v4(),
            employee_id,
            skill_id: self.skill_id,
            proficiency_level: self.proficiency_level,
            interest_level: self.interest_level,
            years_experience: self.years_experience,
            last_used_date: self.last_used_date,
            source: self.source,
            approval_state: ApprovalState::Pending,
            approver_id: None,
            approved_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmployeeSkillRequest {
    #[validate(range(min = 0, max = 3, message = "Proficiency level must be between 0 and 3"))]
    pub proficiency_level: i16,

    #[validate(range(min = 0, max = 3, message = "Interest level must be between 0 and 3"))]
    pub interest_level: i16,

    #[validate(range(min = 0.0, message = "Years of experience cannot be negative"))]
    pub years_experience: Option<f64>,

    pub last_used_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SkillApprovalRequest {
    pub manager_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SkillRejectionRequest {
    pub manager_id: Uuid,

    #[validate(length(max = 1000, message = "Rejection reason is too long"))]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPLOYEE: Uuid = Uuid::from_u128(1);
    const MANAGER: Uuid = Uuid::from_u128(2);

    fn pending_record() -> EmployeeSkillRecord {
        NewEmployeeSkill {
            skill_id: Uuid::new_v4(),
            proficiency_level: 2,
            interest_level: 3,
            years_experience: Some(1.5),
            last_used_date: None,
            source: SkillSource::Certification,
        }
        .prepare_for_insert(EMPLOYEE)
    }

    #[test]
    fn new_records_start_pending_without_review_metadata() {
        let record = pending_record();
        assert_eq!(record.approval_state, ApprovalState::Pending);
        assert!(record.approver_id.is_none());
        assert!(record.approved_at.is_none());
        assert!(record.rejection_reason.is_none());
    }

    #[test]
    fn approval_upgrades_source_and_stamps_reviewer() {
        let mut record = pending_record();

        record.apply_decision(&ApprovalDecision::approve(MANAGER), Some(MANAGER)).unwrap();

        assert_eq!(record.approval_state, ApprovalState::Approved);
        assert_eq!(record.approver_id, Some(MANAGER));
        assert!(record.approved_at.is_some());
        assert_eq!(record.source, SkillSource::ManagerValidated);
        assert!(record.rejection_reason.is_none());
    }

    #[test]
    fn rejection_keeps_source_and_records_reason() {
        let mut record = pending_record();

        record
            .apply_decision(&ApprovalDecision::reject(MANAGER, Some("No evidence".into())), Some(MANAGER))
            .unwrap();

        assert_eq!(record.approval_state, ApprovalState::Rejected);
        assert_eq!(record.approver_id, Some(MANAGER));
        assert_eq!(record.source, SkillSource::Certification);
        assert_eq!(record.rejection_reason.as_deref(), Some("No evidence"));
    }

    #[test]
    fn terminal_states_refuse_further_decisions() {
        let mut record = pending_record();
        record.apply_decision(&ApprovalDecision::approve(MANAGER), Some(MANAGER)).unwrap();
        let approved_at = record.approved_at;

        let err = record.apply_decision(&ApprovalDecision::approve(MANAGER), Some(MANAGER)).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert_eq!(record.approver_id, Some(MANAGER));
        assert_eq!(record.approved_at, approved_at);

        let err = record.apply_decision(&ApprovalDecision::reject(MANAGER, None), Some(MANAGER)).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert_eq!(record.approval_state, ApprovalState::Approved);
    }

    #[test]
    fn employees_cannot_review_their_own_record() {
        let mut record = pending_record();

        let err = record.apply_decision(&ApprovalDecision::approve(EMPLOYEE), Some(EMPLOYEE)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = record.apply_decision(&ApprovalDecision::approve(EMPLOYEE), None).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(record.approval_state, ApprovalState::Pending);
        assert!(record.approver_id.is_none());
    }

    #[test]
    fn only_the_direct_manager_may_decide() {
        let mut record = pending_record();
        let stranger = Uuid::from_u128(3);

        let err = record.apply_decision(&ApprovalDecision::approve(stranger), Some(MANAGER)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = record.apply_decision(&ApprovalDecision::reject(MANAGER, None), None).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        assert_eq!(record.approval_state, ApprovalState::Pending);
        assert_eq!(record.source, SkillSource::Certification);
    }

    #[test]
    fn revise_keeps_approval_unless_reapproval_required() {
        let mut record = pending_record();
        record.apply_decision(&ApprovalDecision::approve(MANAGER), Some(MANAGER)).unwrap();

        let update = UpdateEmployeeSkillRequest {
            proficiency_level: 3,
            interest_level: 1,
            years_experience: None,
            last_used_date: None,
        };

        let mut lenient = record.clone();
        lenient.revise(&update, false);
        assert_eq!(lenient.proficiency_level, 3);
        assert_eq!(lenient.approval_state, ApprovalState::Approved);

        let mut strict = record.clone();
        strict.revise(&update, true);
        assert_eq!(strict.approval_state, ApprovalState::Pending);
        assert!(strict.approver_id.is_none());
        assert!(strict.approved_at.is_none());
    }

    #[test]
    fn revise_without_level_change_keeps_review() {
        let mut record = pending_record();
        record.apply_decision(&ApprovalDecision::approve(MANAGER), Some(MANAGER)).unwrap();

        let update = UpdateEmployeeSkillRequest {
            proficiency_level: record.proficiency_level,
            interest_level: 0,
            years_experience: Some(4.0),
            last_used_date: None,
        };
        record.revise(&update, true);

        assert_eq!(record.approval_state, ApprovalState::Approved);
        assert_eq!(record.interest_level, 0);
    }

    #[test]
    fn out_of_range_levels_fail_validation() {
        let request = NewEmployeeSkill {
            skill_id: Uuid::new_v4(),
            proficiency_level: 4,
            interest_level: -1,
            years_experience: Some(-2.0),
            last_used_date: None,
            source: SkillSource::SelfReported,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("proficiency_level"));
        assert!(fields.contains_key("interest_level"));
        assert!(fields.contains_key("years_experience"));
    }
}

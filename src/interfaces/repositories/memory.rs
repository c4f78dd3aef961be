use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    entities::{
        employee::Employee,
        employee_skill::{ApprovalDecision, ApprovalState, EmployeeSkillRecord, UpdateEmployeeSkillRequest},
        learning_resource::{LearningResource, ResourceLevel},
        skill::Skill,
        target::{RequirementEntry, Target},
    },
    errors::AppError,
    repositories::{
        employee_skill::EmployeeSkillRepository,
        learning_resource::LearningResourceRepository,
        requirement::RequirementRepository,
        skill::SkillRepository,
    },
};

type RecordKey = (Uuid, Uuid);

/// Process-local store backing every repository trait.
///
/// Catalog tables sit behind `RwLock`s and are only written while seeding.
/// Skill records live in a `DashMap` keyed by `(employee_id, skill_id)`, so
/// a check-and-write on one record happens under that entry's shard lock.
#[derive(Default)]
pub struct MemoryRepo {
    skills: RwLock<HashMap<Uuid, Skill>>,
    targets: RwLock<HashMap<Uuid, Target>>,
    requirements: RwLock<Vec<RequirementEntry>>,
    employees: RwLock<HashMap<Uuid, Employee>>,
    resources: RwLock<Vec<LearningResource>>,
    records: DashMap<RecordKey, EmployeeSkillRecord>,
    record_keys: DashMap<Uuid, RecordKey>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_skill(&self, skill: Skill) -> Uuid {
        let id = skill.id;
        self.skills.write().insert(id, skill);
        id
    }

    pub fn remove_skill(&self, id: &Uuid) {
        self.skills.write().remove(id);
    }

    pub fn add_target(&self, target: Target) -> Uuid {
        let id = target.id;
        self.targets.write().insert(id, target);
        id
    }

    pub fn add_requirement(&self, requirement: RequirementEntry) {
        let mut requirements = self.requirements.write();
        requirements.retain(|r| !(r.target_id == requirement.target_id && r.skill_id == requirement.skill_id));
        requirements.push(requirement);
    }

    pub fn add_employee(&self, employee: Employee) -> Uuid {
        let id = employee.id;
        self.employees.write().insert(id, employee);
        id
    }

    /// Resources are returned in the order they were added.
    pub fn add_resource(&self, resource: LearningResource) -> Uuid {
        let id = resource.id;
        self.resources.write().push(resource);
        id
    }

    fn key_for(&self, record_id: &Uuid) -> Result<RecordKey, AppError> {
        self.record_keys
            .get(record_id)
            .map(|key| *key)
            .ok_or_else(|| AppError::NotFound(format!("Employee skill {}", record_id)))
    }

    fn collect_records<F>(&self, filter: F) -> Vec<EmployeeSkillRecord>
    where
        F: Fn(&EmployeeSkillRecord) -> bool,
    {
        let mut records: Vec<_> = self.records
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|r| r.created_at);
        records
    }
}

#[async_trait]
impl SkillRepository for MemoryRepo {
    async fn find_skill_by_id(&self, id: &Uuid) -> Result<Skill, AppError> {
        self.skills
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Skill {}", id)))
    }
}

#[async_trait]
impl RequirementRepository for MemoryRepo {
    async fn find_target_by_id(&self, id: &Uuid) -> Result<Target, AppError> {
        self.targets
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Role or project {}", id)))
    }

    async fn find_requirements_by_target(&self, target_id: &Uuid) -> Result<Vec<RequirementEntry>, AppError> {
        Ok(self.requirements
            .read()
            .iter()
            .filter(|r| &r.target_id == target_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LearningResourceRepository for MemoryRepo {
    async fn find_resources_by_skill_and_level(
        &self,
        skill_id: &Uuid,
        level: ResourceLevel,
    ) -> Result<Vec<LearningResource>, AppError> {
        Ok(self.resources
            .read()
            .iter()
            .filter(|r| &r.skill_id == skill_id && r.level == level)
            .cloned()
            .collect())
    }

    async fn find_resources_by_skill(&self, skill_id: &Uuid) -> Result<Vec<LearningResource>, AppError> {
        Ok(self.resources
            .read()
            .iter()
            .filter(|r| &r.skill_id == skill_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EmployeeSkillRepository for MemoryRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_employee_by_id(&self, id: &Uuid) -> Result<Employee, AppError> {
        self.employees
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Employee {}", id)))
    }

    async fn find_approved_skills_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        Ok(self.collect_records(|r| &r.employee_id == employee_id && r.approval_state == ApprovalState::Approved))
    }

    async fn find_skill_records_by_employee(&self, employee_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        Ok(self.collect_records(|r| &r.employee_id == employee_id))
    }

    async fn find_pending_for_manager(&self, manager_id: &Uuid) -> Result<Vec<EmployeeSkillRecord>, AppError> {
        let reports: Vec<Uuid> = self.employees
            .read()
            .values()
            .filter(|e| e.manager_id.as_ref() == Some(manager_id))
            .map(|e| e.id)
            .collect();

        Ok(self.collect_records(|r| {
            r.approval_state == ApprovalState::Pending && reports.contains(&r.employee_id)
        }))
    }

    async fn find_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<EmployeeSkillRecord, AppError> {
        self.records
            .get(&(*employee_id, *skill_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound("Employee skill not found".into()))
    }

    async fn insert_skill_record(&self, record: &EmployeeSkillRecord) -> Result<(), AppError> {
        let key = (record.employee_id, record.skill_id);
        match self.records.entry(key) {
            Entry::Occupied(_) => Err(AppError::Conflict("Employee already has this skill".to_string())),
            Entry::Vacant(slot) => {
                self.record_keys.insert(record.id, key);
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn revise_skill_record(
        &self,
        employee_id: &Uuid,
        skill_id: &Uuid,
        update: &UpdateEmployeeSkillRequest,
        require_reapproval: bool,
    ) -> Result<EmployeeSkillRecord, AppError> {
        let mut entry = self.records
            .get_mut(&(*employee_id, *skill_id))
            .ok_or_else(|| AppError::NotFound("Employee skill not found".into()))?;

        entry.revise(update, require_reapproval);
        Ok(entry.clone())
    }

    async fn apply_decision(&self, record_id: &Uuid, decision: &ApprovalDecision) -> Result<EmployeeSkillRecord, AppError> {
        let key = self.key_for(record_id)?;
        let employee_manager = self.employees.read().get(&key.0).and_then(|e| e.manager_id);

        let mut entry = self.records
            .get_mut(&key)
            .ok_or_else(|| AppError::NotFound(format!("Employee skill {}", record_id)))?;

        // The key may have been re-used by a newer record after a delete
        if entry.id != *record_id {
            return Err(AppError::NotFound(format!("Employee skill {}", record_id)));
        }

        entry.apply_decision(decision, employee_manager)?;
        Ok(entry.clone())
    }

    async fn delete_skill_record(&self, employee_id: &Uuid, skill_id: &Uuid) -> Result<(), AppError> {
        let (_, record) = self.records
            .remove(&(*employee_id, *skill_id))
            .ok_or_else(|| AppError::NotFound("Employee skill not found".into()))?;

        self.record_keys.remove(&record.id);
        Ok(())
    }
}

use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::employee_skill::{
        NewEmployeeSkill, SkillApprovalRequest, SkillRejectionRequest, UpdateEmployeeSkillRequest,
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state, data))]
pub async fn submit_skill(
    state: web::Data<AppState>,
    employee_id: web::Path<Uuid>,
    data: web::Json<NewEmployeeSkill>,
) -> Result<impl Responder, AppError> {
    let response = state.approval_handler
        .submit(&employee_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state))]
pub async fn list_employee_skills(
    state: web::Data<AppState>,
    employee_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let skills = state.approval_handler.list_employee_skills(&employee_id).await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state))]
pub async fn list_approved_skills(
    state: web::Data<AppState>,
    employee_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let skills = state.approval_handler.list_approved_skills(&employee_id).await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state))]
pub async fn get_skill(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, AppError> {
    let (employee_id, skill_id) = path.into_inner();

    let response = state.approval_handler.get_employee_skill(&employee_id, &skill_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, data))]
pub async fn update_skill(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Json<UpdateEmployeeSkillRequest>,
) -> Result<impl Responder, AppError> {
    let (employee_id, skill_id) = path.into_inner();

    let response = state.approval_handler
        .update(&employee_id, &skill_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, AppError> {
    let (employee_id, skill_id) = path.into_inner();

    state.approval_handler.delete(&employee_id, &skill_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state, data))]
pub async fn approve_skill(
    state: web::Data<AppState>,
    record_id: web::Path<Uuid>,
    data: web::Json<SkillApprovalRequest>,
) -> Result<impl Responder, AppError> {
    let record = state.approval_handler
        .approve(&record_id, &data.manager_id)
        .await?;

    Ok(HttpResponse::Ok().json(record))
}

#[instrument(skip(state, data))]
pub async fn reject_skill(
    state: web::Data<AppState>,
    record_id: web::Path<Uuid>,
    data: web::Json<SkillRejectionRequest>,
) -> Result<impl Responder, AppError> {
    let record = state.approval_handler
        .reject(&record_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(record))
}

#[instrument(skip(state))]
pub async fn list_pending_skills(
    state: web::Data<AppState>,
    manager_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let pending = state.approval_handler.list_pending_for_manager(&manager_id).await?;
    Ok(HttpResponse::Ok().json(pending))
}

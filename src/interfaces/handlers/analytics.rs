use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::{gap_analysis::GapAnalysisQuery, recommendation::RecommendationQuery},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_skill_gap(
    state: web::Data<AppState>,
    employee_id: web::Path<Uuid>,
    query: web::Query<GapAnalysisQuery>,
) -> Result<impl Responder, AppError> {
    let analysis = state.gap_analysis_handler
        .analyze(&employee_id, &query.target_id)
        .await?;

    Ok(HttpResponse::Ok().json(analysis))
}

#[instrument(skip(state))]
pub async fn get_recommendations(
    state: web::Data<AppState>,
    employee_id: web::Path<Uuid>,
    query: web::Query<RecommendationQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();

    let recommendations = state.recommendation_handler
        .recommend(&employee_id, &query.target_id, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(recommendations))
}

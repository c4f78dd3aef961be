use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Skill gap analysis API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "analytics": "/api/v1/analytics/employees/{employee_id}",
            "employee_skills": "/api/v1/employees/{employee_id}/skills",
            "approvals": "/api/v1/skill-records/{record_id}",
            "health": "/api/v1/admin/health"
        }
    }))
}

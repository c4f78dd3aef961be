use actix_web::web;

use crate::handlers::analytics;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics/employees/{employee_id}")
            .service(
                web::resource("/gap")
                    .route(web::get().to(analytics::get_skill_gap))
            )
            .service(
                web::resource("/recommendations")
                    .route(web::get().to(analytics::get_recommendations))
            )
    );
}

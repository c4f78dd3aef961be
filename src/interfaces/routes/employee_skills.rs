use actix_web::web;

use crate::handlers::employee_skills;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees/{employee_id}/skills")
            .service(
                web::resource("")
                    .route(web::get().to(employee_skills::list_employee_skills))
                    .route(web::post().to(employee_skills::submit_skill))
            )
            .service(
                web::resource("/approved")
                    .route(web::get().to(employee_skills::list_approved_skills))
            )
            .service(
                web::resource("/{skill_id}")
                    .route(web::get().to(employee_skills::get_skill))
                    .route(web::put().to(employee_skills::update_skill))
                    .route(web::delete().to(employee_skills::delete_skill))
            )
    );

    cfg.service(
        web::scope("/skill-records/{record_id}")
            .service(
                web::resource("/approve")
                    .route(web::post().to(employee_skills::approve_skill))
            )
            .service(
                web::resource("/reject")
                    .route(web::post().to(employee_skills::reject_skill))
            )
    );

    cfg.service(
        web::resource("/managers/{manager_id}/pending-skills")
            .route(web::get().to(employee_skills::list_pending_skills))
    );
}

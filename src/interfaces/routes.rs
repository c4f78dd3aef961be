use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod analytics;
mod employee_skills;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(admin::config_routes)
            .configure(analytics::config_routes)
            .configure(employee_skills::config_routes)
    );

    cfg.configure(json_error::config_routes);
}

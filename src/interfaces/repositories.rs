pub mod employee_skill;
pub mod learning_resource;
pub mod memory;
pub mod requirement;
pub mod skill;
pub mod sqlx_repo;

pub mod employee;
pub mod employee_skill;
pub mod gap_analysis;
pub mod learning_resource;
pub mod recommendation;
pub mod skill;
pub mod target;

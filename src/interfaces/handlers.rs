pub mod analytics;
pub mod employee_skills;
pub mod home;
pub mod system;

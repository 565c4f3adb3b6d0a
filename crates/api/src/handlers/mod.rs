pub mod admin_projects;
pub mod clients;
pub mod health;
pub mod projects;
pub mod sync;

pub mod profile_repo;
pub mod project_repo;

pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;

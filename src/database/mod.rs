pub mod activities_repo;
pub mod activity_participants_repo;
pub mod registry_db;

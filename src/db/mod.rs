pub mod schema;
pub mod user_repo;
pub mod contact_repo;

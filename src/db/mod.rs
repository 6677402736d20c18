pub mod feedback_repo;
pub mod models;
pub mod schema;
pub mod score_repo;
pub mod user_repo;

pub mod account;
pub mod admin;
pub mod auth;
pub mod feedback;
pub mod games;
pub mod health;
pub mod routes;
pub mod scores;
pub mod users;

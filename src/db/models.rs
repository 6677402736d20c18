use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub birthday: NaiveDate,
    pub age: i32,
    /// Sum of the user's best score in every game.
    pub high_score: i32,
    pub is_admin: bool,
    pub is_blocked: bool,
    pub blocked_reason: Option<String>,
    pub blocked_at: Option<DateTime<Utc>>,
    pub failed_logins: i32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: i32,
    pub title: String,
    pub emoji: String,
    pub is_quiz: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct Score {
    pub id: i32,
    pub user_id: i32,
    pub game_id: i32,
    pub score: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: i32,
    pub user_id: i32,
    pub topic_id: i32,
    pub rating: Option<i32>,
    pub category: Option<String>,
    pub message: String,
    pub screenshot_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_resolved: bool,
}

//! Append-only feedback log with an admin resolution flag.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::db::models::Feedback;

pub struct NewFeedback<'a> {
    pub user_id: i32,
    pub topic_id: i32,
    pub rating: Option<i32>,
    pub category: Option<&'a str>,
    pub message: &'a str,
    pub screenshot_url: Option<&'a str>,
}

pub async fn insert(db: &PgPool, fb: NewFeedback<'_>) -> Result<i32> {
    sqlx::query_scalar(
        r#"
        INSERT INTO feedback (user_id, topic_id, rating, category, message, screenshot_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(fb.user_id)
    .bind(fb.topic_id)
    .bind(fb.rating)
    .bind(fb.category)
    .bind(fb.message)
    .bind(fb.screenshot_url)
    .fetch_one(db)
    .await
    .context("inserting feedback")
}

/// One user's feedback for one topic, newest first.
pub async fn list_for_user_topic(
    db: &PgPool,
    user_id: i32,
    topic_id: i32,
) -> Result<Vec<Feedback>> {
    sqlx::query_as::<_, Feedback>(
        "SELECT * FROM feedback WHERE user_id = $1 AND topic_id = $2 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .bind(topic_id)
    .fetch_all(db)
    .await
    .context("listing user feedback")
}

/// Everything, newest first. Admin console view.
pub async fn list_all(db: &PgPool) -> Result<Vec<Feedback>> {
    sqlx::query_as::<_, Feedback>("SELECT * FROM feedback ORDER BY created_at DESC")
        .fetch_all(db)
        .await
        .context("listing all feedback")
}

pub async fn mark_resolved(db: &PgPool, id: i32) -> Result<bool> {
    let res = sqlx::query("UPDATE feedback SET is_resolved = TRUE WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("resolving feedback")?;
    Ok(res.rows_affected() > 0)
}

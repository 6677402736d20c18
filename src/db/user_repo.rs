//! User row queries: lookups, registration, login bookkeeping, moderation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db::models::User;

const USER_COLUMNS: &str = "id, username, email, password_hash, birthday, age, high_score, \
     is_admin, is_blocked, blocked_reason, blocked_at, failed_logins, \
     last_login_at, last_login_ip, created_at";

pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("fetching user by id")
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("fetching user by email")
}

pub async fn email_taken(db: &PgPool, email: &str) -> Result<bool> {
    let hit: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(db)
        .await
        .context("checking email")?;
    Ok(hit.is_some())
}

/// `exclude_id` lets the account route rename without colliding with itself.
pub async fn username_taken(db: &PgPool, username: &str, exclude_id: Option<i32>) -> Result<bool> {
    let hit: Option<i32> =
        sqlx::query_scalar("SELECT 1 FROM users WHERE username = $1 AND id != COALESCE($2, -1)")
            .bind(username)
            .bind(exclude_id)
            .fetch_optional(db)
            .await
            .context("checking username")?;
    Ok(hit.is_some())
}

/// Insert a fresh user; every moderation field starts at its default.
pub async fn insert_user(
    db: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    birthday: NaiveDate,
    age: i32,
) -> Result<i32> {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, password_hash, birthday, age)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(birthday)
    .bind(age)
    .fetch_one(db)
    .await
    .context("inserting user")
}

/// Bump the failed-login counter after a rejected credential check.
pub async fn record_login_failure(db: &PgPool, id: i32) -> Result<()> {
    sqlx::query("UPDATE users SET failed_logins = failed_logins + 1 WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("recording login failure")?;
    Ok(())
}

/// Successful login: reset the counter, stamp instant and origin.
pub async fn record_login(db: &PgPool, id: i32, ip: Option<&str>) -> Result<()> {
    sqlx::query(
        "UPDATE users SET failed_logins = 0, last_login_at = NOW(), last_login_ip = $2 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(ip)
    .execute(db)
    .await
    .context("recording login")?;
    Ok(())
}

pub async fn list_all(db: &PgPool) -> Result<Vec<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
        .fetch_all(db)
        .await
        .context("listing users")
}

pub async fn set_blocked(db: &PgPool, id: i32, reason: &str) -> Result<bool> {
    let res = sqlx::query(
        "UPDATE users SET is_blocked = TRUE, blocked_reason = $2, blocked_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(reason)
    .execute(db)
    .await
    .context("blocking user")?;
    Ok(res.rows_affected() > 0)
}

/// Unblocking also forgives past failed attempts.
pub async fn clear_blocked(db: &PgPool, id: i32) -> Result<bool> {
    let res = sqlx::query(
        "UPDATE users SET is_blocked = FALSE, blocked_reason = NULL, blocked_at = NULL, \
         failed_logins = 0 WHERE id = $1",
    )
    .bind(id)
    .execute(db)
    .await
    .context("unblocking user")?;
    Ok(res.rows_affected() > 0)
}

pub async fn set_admin(db: &PgPool, id: i32) -> Result<bool> {
    let res = sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("promoting user")?;
    Ok(res.rows_affected() > 0)
}

pub async fn update_username(db: &PgPool, id: i32, username: &str) -> Result<()> {
    sqlx::query("UPDATE users SET username = $2 WHERE id = $1")
        .bind(id)
        .bind(username)
        .execute(db)
        .await
        .context("updating username")?;
    Ok(())
}

pub async fn update_password_hash(db: &PgPool, id: i32, password_hash: &str) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(db)
        .await
        .context("updating password")?;
    Ok(())
}

pub async fn count_users(db: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
        .context("counting users")
}

pub async fn count_blocked(db: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_blocked")
        .fetch_one(db)
        .await
        .context("counting blocked users")
}

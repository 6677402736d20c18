//! Start-up schema creation and catalog seeding.

use anyhow::{Context, Result};
use sqlx::PgPool;

/// Create every table we need if it is not there yet. Safe to re-run.
pub async fn ensure_schema(db: &PgPool) -> Result<()> {
    // The UNIQUE pair on scores makes the best-score upsert race-free.
    let ddl = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id             SERIAL PRIMARY KEY,
            username       TEXT NOT NULL UNIQUE,
            email          TEXT NOT NULL UNIQUE,
            password_hash  TEXT NOT NULL,
            birthday       DATE NOT NULL,
            age            INT  NOT NULL,
            high_score     INT  NOT NULL DEFAULT 0,
            is_admin       BOOLEAN NOT NULL DEFAULT FALSE,
            is_blocked     BOOLEAN NOT NULL DEFAULT FALSE,
            blocked_reason TEXT,
            blocked_at     TIMESTAMPTZ,
            failed_logins  INT  NOT NULL DEFAULT 0,
            last_login_at  TIMESTAMPTZ,
            last_login_ip  TEXT,
            created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id      INT PRIMARY KEY,
            title   TEXT NOT NULL,
            emoji   TEXT NOT NULL,
            is_quiz BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS scores (
            id      SERIAL PRIMARY KEY,
            user_id INT NOT NULL REFERENCES users(id),
            game_id INT NOT NULL REFERENCES games(id),
            score   INT NOT NULL,
            UNIQUE (user_id, game_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            id             SERIAL PRIMARY KEY,
            user_id        INT NOT NULL REFERENCES users(id),
            topic_id       INT NOT NULL,
            rating         INT,
            category       VARCHAR(50),
            message        TEXT NOT NULL,
            screenshot_url VARCHAR(500),
            created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            is_resolved    BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    ];

    for stmt in ddl {
        sqlx::query(stmt)
            .execute(db)
            .await
            .context("creating schema")?;
    }
    Ok(())
}

/// Seed the 4 games that map to the module topics. Only runs against an
/// empty catalog; the table is immutable reference data afterwards.
pub async fn seed_games(db: &PgPool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM games")
        .fetch_one(db)
        .await
        .context("counting games")?;

    if count > 0 {
        return Ok(());
    }

    let catalog = [
        (1, "My Digital Footprint", "👣"),
        (2, "Personal Info & Privacy", "🧰"),
        (3, "Passwords & Passphrases", "🔐"),
        (4, "Social Media Safety", "📱"),
    ];

    for (id, title, emoji) in catalog {
        sqlx::query("INSERT INTO games (id, title, emoji, is_quiz) VALUES ($1, $2, $3, TRUE)")
            .bind(id)
            .bind(title)
            .bind(emoji)
            .execute(db)
            .await
            .context("seeding games")?;
    }

    log::info!("seeded game catalog ({} topics)", catalog.len());
    Ok(())
}

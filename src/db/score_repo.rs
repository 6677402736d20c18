//! Best-score ledger: race-free upsert, aggregates, leaderboards.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::db::models::Score;

/// What a submission leaves behind: the stored best for the pair and the
/// user's recomputed aggregate (sum of bests across every game).
#[derive(Debug)]
pub struct SubmitOutcome {
    pub best: i32,
    pub total_best: i32,
}

/// Keep the per-(user, game) best monotonically and refresh the aggregate,
/// all inside one transaction. The UNIQUE pair constraint plus GREATEST
/// makes concurrent submissions safe: neither duplicate rows nor a lost
/// aggregate update.
pub async fn submit_best(
    db: &PgPool,
    user_id: i32,
    game_id: i32,
    score: i32,
) -> Result<SubmitOutcome> {
    let mut tx = db.begin().await.context("starting score transaction")?;

    let best: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO scores (user_id, game_id, score)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, game_id)
        DO UPDATE SET score = GREATEST(scores.score, EXCLUDED.score)
        RETURNING score
        "#,
    )
    .bind(user_id)
    .bind(game_id)
    .bind(score)
    .fetch_one(&mut *tx)
    .await
    .context("upserting best score")?;

    let total_best: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(score), 0)::BIGINT FROM scores WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .context("summing bests")?;

    sqlx::query("UPDATE users SET high_score = $2 WHERE id = $1")
        .bind(user_id)
        .bind(total_best as i32)
        .execute(&mut *tx)
        .await
        .context("storing aggregate high score")?;

    tx.commit().await.context("committing score transaction")?;

    Ok(SubmitOutcome {
        best,
        total_best: total_best as i32,
    })
}

/// The user's best score per game, for games actually played.
pub async fn best_per_game(db: &PgPool, user_id: i32) -> Result<Vec<Score>> {
    sqlx::query_as::<_, Score>(
        "SELECT id, user_id, game_id, score FROM scores WHERE user_id = $1 ORDER BY game_id",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("fetching bests per game")
}

/// Top scores for one game. Ties resolve by row id, i.e. whoever got there
/// first stays ahead.
pub async fn game_leaderboard(
    db: &PgPool,
    game_id: i32,
    limit: i64,
) -> Result<Vec<(String, i32)>> {
    sqlx::query_as::<_, (String, i32)>(
        r#"
        SELECT u.username, s.score
          FROM scores s
          JOIN users u ON u.id = s.user_id
         WHERE s.game_id = $1
         ORDER BY s.score DESC, s.id
         LIMIT $2
        "#,
    )
    .bind(game_id)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("fetching game leaderboard")
}

/// Top users by aggregate high score. Ties resolve by user id.
pub async fn global_leaderboard(db: &PgPool, limit: i64) -> Result<Vec<(i32, String, i32)>> {
    sqlx::query_as::<_, (i32, String, i32)>(
        r#"
        SELECT id, username, high_score
          FROM users
         ORDER BY high_score DESC, id
         LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
    .context("fetching global leaderboard")
}

pub async fn count_scores(db: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM scores")
        .fetch_one(db)
        .await
        .context("counting scores")
}

/// Distinct users that have submitted at least once.
pub async fn count_players(db: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(DISTINCT user_id) FROM scores")
        .fetch_one(db)
        .await
        .context("counting players with scores")
}

/// The top (username, game title, best score) triples across the ledger.
pub async fn top_scores(db: &PgPool, limit: i64) -> Result<Vec<(String, String, i32)>> {
    sqlx::query_as::<_, (String, String, i32)>(
        r#"
        SELECT u.username, g.title, s.score
          FROM scores s
          JOIN users u ON u.id = s.user_id
          JOIN games g ON g.id = s.game_id
         ORDER BY s.score DESC, s.id
         LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
    .context("fetching top scores")
}

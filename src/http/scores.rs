//! Score submission, per-game leaderboards, and topic progress.

use actix_web::{get, post, web, HttpResponse};
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::cache;
use crate::db::score_repo;
use crate::error::ApiError;
use crate::http::auth::{self, JwtAuth};
use crate::scoring;

#[derive(Deserialize)]
pub struct ScoreIn {
    pub game_id: i32,
    pub score: i32,
}

#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: i32,
}

#[derive(Serialize)]
pub struct ProgressEntry {
    pub game_id: i32,
    pub title: String,
    pub emoji: String,
    pub best_score: i32,
    pub max_score: i32,
    pub percent: i32,
}

/// POST /api/scores : record a finished run. The stored best only ever
/// goes up; resubmitting a lower score still answers with the current
/// aggregate.
#[post("/scores")]
pub async fn submit_score(
    info: web::Json<ScoreIn>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    if info.score < 0 {
        return Err(ApiError::Validation("Score must not be negative".into()));
    }

    let user = auth::current_user(&db, &auth).await?;

    if cache::get_game(info.game_id).is_none() {
        return Err(ApiError::NotFound("Game"));
    }

    let outcome = score_repo::submit_best(&db, user.id, info.game_id, info.score).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Score saved",
        "best_score": outcome.best,
        "total_best": outcome.total_best,
    })))
}

/// GET /api/scores/leaderboard/{game_id} : public, cached for 30 s.
#[get("/scores/leaderboard/{game_id}")]
pub async fn game_leaderboard(
    path: web::Path<i32>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
    web::Query(params): web::Query<LeaderboardParams>,
) -> Result<HttpResponse, ApiError> {
    let game_id = path.into_inner();
    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    if cache::get_game(game_id).is_none() {
        return Err(ApiError::NotFound("Game"));
    }

    let key = format!("leaderboard:game:{game_id}:{limit}");
    let mut conn = redis.get_multiplexed_async_connection().await.ok();
    if let Some(c) = conn.as_mut() {
        if let Ok(cached) = c.get::<_, String>(&key).await {
            return Ok(HttpResponse::Ok()
                .content_type("application/json")
                .body(cached));
        }
    }

    let rows = score_repo::game_leaderboard(&db, game_id, limit).await?;
    let out: Vec<ScoreEntry> = rows
        .into_iter()
        .map(|(username, score)| ScoreEntry { username, score })
        .collect();

    if let Some(c) = conn.as_mut() {
        if let Ok(body) = serde_json::to_string(&out) {
            let _: () = c.set_ex(&key, &body, 30).await.unwrap_or(());
        }
    }

    Ok(HttpResponse::Ok().json(out))
}

/// GET /api/scores/progress : per-topic progress for the caller, covering
/// every catalog game whether or not it has been played.
#[get("/scores/progress")]
pub async fn progress(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let user = auth::current_user(&db, &auth).await?;

    let bests = score_repo::best_per_game(&db, user.id).await?;

    let out: Vec<ProgressEntry> = cache::all_games()
        .into_iter()
        .map(|g| {
            let best_score = bests
                .iter()
                .find(|s| s.game_id == g.id)
                .map(|s| s.score)
                .unwrap_or(0);
            let max_score = scoring::max_score_for(g.id);
            ProgressEntry {
                game_id: g.id,
                title: g.title,
                emoji: g.emoji,
                best_score,
                max_score,
                percent: scoring::progress_percent(best_score, max_score),
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(out))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_score)
        .service(game_leaderboard)
        .service(progress);
}

//! Game catalog, player dashboard, and the global leaderboard.

use actix_web::{get, web, HttpResponse};
use chrono::NaiveDate;
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::models::Game;
use crate::db::score_repo;
use crate::error::ApiError;
use crate::http::auth::{self, JwtAuth};

#[derive(Deserialize)]
pub struct LeaderboardParams {
    /// Maximum number of entries to return.
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct GlobalEntry {
    pub id: i32,
    pub username: String,
    pub high_score: i32,
}

#[derive(Serialize)]
pub struct DashboardOut {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub birthday: NaiveDate,
    pub age: i32,
    pub high_score: i32,
}

/// GET /api/game/list : public catalog read.
#[get("/game/list")]
pub async fn list_games(db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let games = sqlx::query_as::<_, Game>("SELECT id, title, emoji, is_quiz FROM games ORDER BY id")
        .fetch_all(&**db)
        .await
        .map_err(anyhow::Error::from)?;
    Ok(HttpResponse::Ok().json(games))
}

/// GET /api/game/dashboard : the caller's own profile.
#[get("/game/dashboard")]
pub async fn dashboard(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let user = auth::current_user(&db, &auth).await?;
    Ok(HttpResponse::Ok().json(DashboardOut {
        id: user.id,
        username: user.username,
        email: user.email,
        birthday: user.birthday,
        age: user.age,
        high_score: user.high_score,
    }))
}

/// GET /api/game/leaderboard : top users by aggregate high score. Public.
#[get("/game/leaderboard")]
pub async fn global_leaderboard(
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
    web::Query(params): web::Query<LeaderboardParams>,
) -> Result<HttpResponse, ApiError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    // Short-lived Redis cache; a cold or absent cache falls through to
    // Postgres instead of failing the request.
    let key = format!("leaderboard:global:{limit}");
    let mut conn = redis.get_multiplexed_async_connection().await.ok();
    if let Some(c) = conn.as_mut() {
        if let Ok(cached) = c.get::<_, String>(&key).await {
            return Ok(HttpResponse::Ok()
                .content_type("application/json")
                .body(cached));
        }
    }

    let rows = score_repo::global_leaderboard(&db, limit).await?;
    let out: Vec<GlobalEntry> = rows
        .into_iter()
        .map(|(id, username, high_score)| GlobalEntry {
            id,
            username,
            high_score,
        })
        .collect();

    if let Some(c) = conn.as_mut() {
        if let Ok(body) = serde_json::to_string(&out) {
            let _: () = c.set_ex(&key, &body, 30).await.unwrap_or(());
        }
    }

    Ok(HttpResponse::Ok().json(out))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_games)
        .service(dashboard)
        .service(global_leaderboard);
}

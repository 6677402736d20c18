//! Admin console: user list, moderation, stats, progress reports.

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::db::{score_repo, user_repo};
use crate::error::ApiError;
use crate::http::auth::{self, JwtAuth};
use crate::scoring;

#[derive(Serialize)]
pub struct AdminUserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub age: i32,
    pub birthday: NaiveDate,
    pub high_score: i32,
    pub is_admin: bool,
    pub is_blocked: bool,
    pub blocked_reason: Option<String>,
    pub blocked_at: Option<DateTime<Utc>>,
    pub failed_logins: i32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,
    pub suspicious: bool,
}

#[derive(Serialize)]
pub struct Stats {
    pub total_users: i64,
    pub total_scores: i64,
    pub players_with_scores: i64,
    pub blocked_users: i64,
}

#[derive(Deserialize)]
pub struct BlockRequest {
    pub reason: String,
}

#[derive(Serialize)]
pub struct TopScoreRow {
    pub username: String,
    pub game_title: String,
    pub score: i32,
}

/// GET /api/admin/users : everyone, moderation fields included.
#[get("/admin/users")]
pub async fn list_users(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;

    let users = user_repo::list_all(&db).await?;
    let out: Vec<AdminUserRow> = users
        .into_iter()
        .map(|u| {
            let suspicious =
                scoring::suspicious(u.failed_logins, u.last_login_at, u.last_login_ip.as_deref());
            AdminUserRow {
                id: u.id,
                username: u.username,
                email: u.email,
                age: u.age,
                birthday: u.birthday,
                high_score: u.high_score,
                is_admin: u.is_admin,
                is_blocked: u.is_blocked,
                blocked_reason: u.blocked_reason,
                blocked_at: u.blocked_at,
                failed_logins: u.failed_logins,
                last_login_at: u.last_login_at,
                last_login_ip: u.last_login_ip,
                suspicious,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(out))
}

async fn collect_stats(db: &PgPool) -> Result<Stats, ApiError> {
    Ok(Stats {
        total_users: user_repo::count_users(db).await?,
        total_scores: score_repo::count_scores(db).await?,
        players_with_scores: score_repo::count_players(db).await?,
        blocked_users: user_repo::count_blocked(db).await?,
    })
}

/// GET /api/admin/stats
#[get("/admin/stats")]
pub async fn stats(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;
    Ok(HttpResponse::Ok().json(collect_stats(&db).await?))
}

/// POST /api/admin/block/{user_id}
#[post("/admin/block/{user_id}")]
pub async fn block_user(
    path: web::Path<i32>,
    info: web::Json<BlockRequest>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;
    let user_id = path.into_inner();

    let target = user_repo::find_by_id(&db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    // Admins are off-limits to moderation.
    if target.is_admin {
        return Err(ApiError::Forbidden("Cannot block an admin".into()));
    }

    user_repo::set_blocked(&db, user_id, &info.reason).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{} has been blocked", target.username),
    })))
}

/// POST /api/admin/unblock/{user_id}
#[post("/admin/unblock/{user_id}")]
pub async fn unblock_user(
    path: web::Path<i32>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;
    let user_id = path.into_inner();

    if !user_repo::clear_blocked(&db, user_id).await? {
        return Err(ApiError::NotFound("User"));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "User unblocked" })))
}

/// POST /api/admin/make-admin/{user_id} : one-way promotion.
#[post("/admin/make-admin/{user_id}")]
pub async fn make_admin(
    path: web::Path<i32>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;
    let user_id = path.into_inner();

    let target = user_repo::find_by_id(&db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    user_repo::set_admin(&db, user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{} is now an admin", target.username),
    })))
}

/// GET /api/admin/progress/{user_id} : best score keyed by game id.
#[get("/admin/progress/{user_id}")]
pub async fn user_progress(
    path: web::Path<i32>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;
    let user_id = path.into_inner();

    if user_repo::find_by_id(&db, user_id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }

    let bests: BTreeMap<i32, i32> = score_repo::best_per_game(&db, user_id)
        .await?
        .into_iter()
        .map(|s| (s.game_id, s.score))
        .collect();

    Ok(HttpResponse::Ok().json(bests))
}

/// GET /api/admin/report : aggregate counts plus the top 10 ledger entries.
#[get("/admin/report")]
pub async fn report(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;

    let stats = collect_stats(&db).await?;
    let top: Vec<TopScoreRow> = score_repo::top_scores(&db, 10)
        .await?
        .into_iter()
        .map(|(username, game_title, score)| TopScoreRow {
            username,
            game_title,
            score,
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "stats": stats,
        "top_scores": top,
    })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(stats)
        .service(block_user)
        .service(unblock_user)
        .service(make_admin)
        .service(user_progress)
        .service(report);
}

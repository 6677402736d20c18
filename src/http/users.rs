//! Registration and the credential-checked login flow.

use actix_web::{post, web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::config::settings;
use crate::db::user_repo;
use crate::error::ApiError;
use crate::http::auth;
use crate::security;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub birthday: NaiveDate,
    pub age: i32,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_id: i32,
    pub username: String,
    pub is_admin: bool,
}

#[post("/users/register")]
pub async fn register(
    info: web::Json<RegisterRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let cfg = settings();

    // Age restriction per module target group.
    if info.age < cfg.min_age || info.age > cfg.max_age {
        return Err(ApiError::Validation(format!(
            "Age must be between {} and {}.",
            cfg.min_age, cfg.max_age
        )));
    }

    if user_repo::email_taken(&db, &info.email).await? {
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    if user_repo::username_taken(&db, &info.username, None).await? {
        return Err(ApiError::Conflict("Username already taken".into()));
    }

    if info.password.is_empty() {
        return Err(ApiError::Validation("Password must not be empty".into()));
    }
    let password_hash = security::hash_password(&info.password)?;

    let user_id = user_repo::insert_user(
        &db,
        &info.username,
        &info.email,
        &password_hash,
        info.birthday,
        info.age,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User registered successfully",
        "user_id": user_id,
    })))
}

#[post("/users/login")]
pub async fn login(
    info: web::Json<LoginRequest>,
    req: HttpRequest,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user = match user_repo::find_by_email(&db, &info.email).await? {
        Some(u) => u,
        // Same answer as a wrong password; nothing to count against.
        None => return Err(ApiError::Unauthenticated("Invalid credentials".into())),
    };

    if !security::verify_password(&info.password, &user.password_hash) {
        user_repo::record_login_failure(&db, user.id).await?;
        return Err(ApiError::Unauthenticated("Invalid credentials".into()));
    }

    if user.is_blocked {
        let reason = user
            .blocked_reason
            .clone()
            .unwrap_or_else(|| "Account blocked".into());
        return Err(ApiError::Forbidden(format!("Account blocked: {reason}")));
    }

    let ip = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);
    user_repo::record_login(&db, user.id, ip.as_deref()).await?;

    let cfg = settings();
    let access_token = auth::issue_token(user.id, cfg.jwt_secret.as_bytes(), cfg.token_ttl_hours)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "bearer",
        user_id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login);
}

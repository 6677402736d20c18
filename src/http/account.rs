//! Account self-service: username and password changes.

use actix_web::{patch, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::ApiError;
use crate::http::auth::{self, JwtAuth};
use crate::security;

#[derive(Deserialize)]
pub struct AccountUpdate {
    pub current_password: String,
    pub username: Option<String>,
    pub new_password: Option<String>,
}

/// PATCH /api/account : both changes are gated on the current password.
#[patch("/account")]
pub async fn update_account(
    info: web::Json<AccountUpdate>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user = auth::current_user(&db, &auth).await?;

    if !security::verify_password(&info.current_password, &user.password_hash) {
        return Err(ApiError::Validation("Current password is incorrect".into()));
    }

    let mut username = user.username.clone();
    if let Some(new_name) = info.username.as_deref() {
        if !new_name.is_empty() && new_name != user.username {
            if user_repo::username_taken(&db, new_name, Some(user.id)).await? {
                return Err(ApiError::Conflict("Username already taken".into()));
            }
            user_repo::update_username(&db, user.id, new_name).await?;
            username = new_name.to_string();
        }
    }

    if let Some(new_password) = info.new_password.as_deref() {
        if new_password.is_empty() {
            return Err(ApiError::Validation("Password must not be empty".into()));
        }
        let hash = security::hash_password(new_password)?;
        user_repo::update_password_hash(&db, user.id, &hash).await?;
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Account updated successfully",
        "username": username,
    })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(update_account);
}

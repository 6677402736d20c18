//! User feedback: submission, own history, admin review & resolution.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::db::feedback_repo::{self, NewFeedback};
use crate::error::ApiError;
use crate::http::auth::{self, JwtAuth};

const MESSAGE_MIN: usize = 3;
const MESSAGE_MAX: usize = 2000;

#[derive(Deserialize)]
pub struct FeedbackCreate {
    pub topic_id: i32,
    pub rating: Option<i32>,
    pub category: Option<String>,
    pub message: String,
    pub screenshot_url: Option<String>,
}

#[derive(Deserialize)]
pub struct MineParams {
    pub topic_id: i32,
}

/// POST /api/feedback
#[post("/feedback")]
pub async fn create_feedback(
    info: web::Json<FeedbackCreate>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user = auth::current_user(&db, &auth).await?;

    if let Some(rating) = info.rating {
        if !(1..=5).contains(&rating) {
            return Err(ApiError::Validation("Rating must be between 1 and 5".into()));
        }
    }
    let len = info.message.chars().count();
    if !(MESSAGE_MIN..=MESSAGE_MAX).contains(&len) {
        return Err(ApiError::Validation(format!(
            "Message must be between {MESSAGE_MIN} and {MESSAGE_MAX} characters"
        )));
    }

    let id = feedback_repo::insert(
        &db,
        NewFeedback {
            user_id: user.id,
            topic_id: info.topic_id,
            rating: info.rating,
            category: Some(info.category.as_deref().unwrap_or("other")),
            message: &info.message,
            screenshot_url: info.screenshot_url.as_deref(),
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Feedback submitted",
        "id": id,
    })))
}

/// GET /api/feedback/mine?topic_id=N : the caller's rows, newest first.
#[get("/feedback/mine")]
pub async fn my_feedback(
    web::Query(params): web::Query<MineParams>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user = auth::current_user(&db, &auth).await?;
    let rows = feedback_repo::list_for_user_topic(&db, user.id, params.topic_id).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/feedback/admin/all
#[get("/feedback/admin/all")]
pub async fn all_feedback(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;
    let rows = feedback_repo::list_all(&db).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/feedback/{id}/resolve
#[post("/feedback/{id}/resolve")]
pub async fn resolve_feedback(
    path: web::Path<i32>,
    auth: JwtAuth,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    auth::current_admin(&db, &auth).await?;

    if !feedback_repo::mark_resolved(&db, path.into_inner()).await? {
        return Err(ApiError::NotFound("Feedback"));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Feedback marked as resolved" })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_feedback)
        .service(my_feedback)
        .service(all_feedback)
        .service(resolve_feedback);
}

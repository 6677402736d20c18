//! Bearer-token issue/verify and the request authorization gate.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::models::User;
use crate::db::user_repo;
use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,
}

/// Sign a token for `user_id`, valid for `ttl_hours` from now.
pub fn issue_token(user_id: i32, secret: &[u8], ttl_hours: i64) -> anyhow::Result<String> {
    let exp = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| anyhow::anyhow!("token expiry overflow"))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Decode and validate (signature + expiry). Every failure mode collapses
/// into one error so callers cannot leak why a token was rejected.
pub fn decode_token(token: &str, secret: &[u8]) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::unauthenticated())
}

//////////////////////////////////////////////////
// ─────────────  JwtAuth extractor  ─────────────
//////////////////////////////////////////////////

pub mod extractor {
    use actix_web::{dev::Payload, FromRequest, HttpRequest, Result as ActixResult};
    use futures_util::future::{ready, Ready};

    use crate::config::settings;
    use crate::error::ApiError;

    /// Extracts and validates a Bearer-JWT, exposing the subject user id.
    #[derive(Debug, Clone)]
    pub struct JwtAuth {
        pub user_id: i32,
    }

    impl FromRequest for JwtAuth {
        type Error = actix_web::Error;
        type Future = Ready<ActixResult<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
            let res = (|| {
                // Expect:  Authorization: Bearer <JWT>
                let hdr = req
                    .headers()
                    .get("Authorization")
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(ApiError::unauthenticated)?;

                let token = hdr.strip_prefix("Bearer ").ok_or_else(ApiError::unauthenticated)?;

                let claims = super::decode_token(token, settings().jwt_secret.as_bytes())?;

                let user_id = claims
                    .sub
                    .parse::<i32>()
                    .map_err(|_| ApiError::unauthenticated())?;

                Ok(JwtAuth { user_id })
            })()
            .map_err(actix_web::Error::from);

            ready(res)
        }
    }
}
pub use extractor::JwtAuth;

/// Resolve the token's subject to a live user row. Unknown ids fold into
/// the same 401 as a bad token; a blocked account is shut out here, not
/// only at login, so blocking takes effect before the token expires.
pub async fn current_user(db: &PgPool, auth: &JwtAuth) -> Result<User, ApiError> {
    let user = user_repo::find_by_id(db, auth.user_id)
        .await?
        .ok_or_else(ApiError::unauthenticated)?;

    if user.is_blocked {
        let reason = user
            .blocked_reason
            .clone()
            .unwrap_or_else(|| "Account blocked".into());
        return Err(ApiError::Forbidden(format!("Account blocked: {reason}")));
    }
    Ok(user)
}

/// `current_user` plus the admin flag.
pub async fn current_admin(db: &PgPool, auth: &JwtAuth) -> Result<User, ApiError> {
    let user = current_user(db, auth).await?;
    if !user.is_admin {
        return Err(ApiError::Forbidden("Admin access required".into()));
    }
    Ok(user)
}

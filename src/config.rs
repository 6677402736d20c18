//! Runtime configuration for the CyberQuest server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// HS256 signing key for bearer tokens. No baked-in default.
    pub jwt_secret: String,
    /// Hours a freshly issued token stays valid.
    pub token_ttl_hours: i64,
    /// Youngest accepted age at registration (inclusive).
    pub min_age: i32,
    /// Oldest accepted age at registration (inclusive).
    pub max_age: i32,
    /// Origins allowed through CORS.
    pub allowed_origins: Vec<String>,
}

impl Settings {
    fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24);

        let min_age = env::var("REGISTER_MIN_AGE")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(13);

        let max_age = env::var("REGISTER_MAX_AGE")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(17);

        let allowed_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".into())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Settings {
            jwt_secret,
            token_ttl_hours,
            min_age,
            max_age,
            allowed_origins,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}

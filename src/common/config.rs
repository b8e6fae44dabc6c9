// src/common/config.rs
//! Process configuration, read from the environment exactly once at startup.
//!
//! Handlers never touch `std::env`; everything they need lives in this
//! immutable struct, shared through `AppState`. Missing values become a
//! `ConfigurationMissing` (500) on the routes that require them instead of
//! taking the whole process down.

use std::env;

use super::error::ApiError;

#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret for session credentials.
    pub session_secret: Option<String>,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    /// Fixed OAuth redirect target. The provider validates this byte-for-byte,
    /// so it is configured per deployment and never derived from request headers.
    pub redirect_uri: String,
    /// Where the browser is sent after a successful login.
    pub app_home_url: String,
    /// Mark cookies `Secure` when the deployment is served over HTTPS.
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let redirect_uri = env::var("OAUTH_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/auth/callback".to_string());
        let cookie_secure = redirect_uri.starts_with("https://");

        Self {
            session_secret: non_empty(env::var("SESSION_SECRET").ok()),
            google_client_id: non_empty(env::var("GOOGLE_CLIENT_ID").ok()),
            google_client_secret: non_empty(env::var("GOOGLE_CLIENT_SECRET").ok()),
            redirect_uri,
            app_home_url: env::var("APP_HOME_URL").unwrap_or_else(|_| "/".to_string()),
            cookie_secure,
        }
    }

    pub fn require_session_secret(&self) -> Result<&str, ApiError> {
        self.session_secret
            .as_deref()
            .ok_or(ApiError::ConfigurationMissing("SESSION_SECRET"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

//! Session resolution and the authorization gate

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use super::models::Claims;
use super::token::{self, TokenError};
use super::SESSION_COOKIE;
use crate::common::{ApiError, AppState};

/// Identity resolved from a verified session credential.
///
/// Claims are self-contained, so resolution never touches the database: an
/// unauthenticated request is rejected before any store access happens.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Extract and verify the session cookie.
///
/// An absent cookie and a failed verification are both "no identity"; codec
/// error detail stays at debug level and is never surfaced to the caller.
pub fn resolve_session(jar: &CookieJar, secret: Option<&str>) -> Option<SessionUser> {
    let credential = jar.get(SESSION_COOKIE)?.value().to_string();

    let Some(secret) = secret else {
        debug!("session cookie present but no signing secret configured");
        return None;
    };

    match token::verify(&credential, secret) {
        Ok(claims) => Some(SessionUser::from(claims)),
        Err(e) => {
            let reason = match e {
                TokenError::MalformedCredential => "malformed",
                TokenError::BadSignature => "bad signature",
                TokenError::Expired => "expired",
            };
            debug!(reason = reason, "session credential rejected");
            None
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state): Extension<AppState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let jar = CookieJar::from_headers(&parts.headers);

        resolve_session(&jar, app_state.config.session_secret.as_deref())
            .ok_or(ApiError::Unauthenticated)
    }
}

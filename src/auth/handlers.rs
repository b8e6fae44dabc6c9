//! Authentication handlers

use axum::{
    extract::{Extension, Query},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use super::extractors::SessionUser;
use super::models::User;
use super::oauth::GoogleOAuth;
use super::users::reconcile_user;
use super::{state_token, token, SESSION_COOKIE};
use crate::common::helpers::safe_token_log;
use crate::common::{safe_email_log, ApiError, AppState};

/// GET|POST /auth/start
/// Begins the OAuth flow: issues a fresh anti-forgery state value, sets it
/// as a short-lived cookie and redirects the browser to the provider.
pub async fn start_login(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let oauth = GoogleOAuth::from_config(state.http.clone(), &state.config)?;

    let state_value = state_token::issue();
    let authorize_url = oauth.authorization_url(&state_value);

    info!("starting OAuth login");

    let jar = jar.add(state_token::state_cookie(
        state_value,
        state.config.cookie_secure,
    ));
    Ok((jar, Redirect::to(&authorize_url)))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /auth/callback
/// Completes the OAuth flow: validates the echoed state against the cookie,
/// exchanges the code for an access token, fetches the profile, reconciles
/// the user row and issues the session credential.
pub async fn oauth_callback(
    Extension(state): Extension<AppState>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    if let Some(oauth_error) = params.error {
        warn!(oauth_error = %oauth_error, "provider returned an error on callback");
        return Err(ApiError::InvalidInput(format!(
            "provider error: {}",
            oauth_error
        )));
    }

    let cookie_value = jar
        .get(state_token::STATE_COOKIE)
        .map(|c| c.value().to_string());
    if !state_token::validate(params.state.as_deref(), cookie_value.as_deref()) {
        warn!("OAuth state mismatch or missing state cookie");
        return Err(ApiError::InvalidState("state validation failed".to_string()));
    }

    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("missing authorization code".to_string()))?;

    let oauth = GoogleOAuth::from_config(state.http.clone(), &state.config)?;
    // fail before any provider round-trip if we could not sign the result
    let secret = state.config.require_session_secret()?;

    let access_token = oauth.exchange_code(code).await?;
    debug!(token = %safe_token_log(&access_token), "access token obtained");

    let profile = oauth.fetch_profile(&access_token).await?;
    debug!(email = %safe_email_log(&profile.email), "provider profile fetched");

    let user = reconcile_user(
        &state.db,
        "google",
        &profile.sub,
        &profile.email,
        profile.name.as_deref(),
        profile.picture.as_deref(),
    )
    .await
    .map_err(ApiError::DatabaseError)?;

    let credential = token::issue_session(&user, secret).map_err(|e| {
        error!(error = %e, user_id = user.id, "failed to sign session credential");
        ApiError::InternalServer("could not issue session".to_string())
    })?;

    info!(
        user_id = user.id,
        email = %safe_email_log(&user.email),
        "login completed"
    );

    let jar = jar
        .remove(state_token::clear_state_cookie())
        .add(session_cookie(credential, state.config.cookie_secure));

    Ok((jar, Redirect::to(&state.config.app_home_url)))
}

/// GET /me
/// Returns the authenticated user's database record.
pub async fn me_handler(
    Extension(state): Extension<AppState>,
    session: SessionUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(session.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(serde_json::json!({ "ok": true, "user": user })))
}

/// POST /logout
/// Stateless credentials cannot be revoked server-side; logout clears the
/// cookie and any copy of the credential simply ages out at its expiry.
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    info!("user logout");
    let jar = jar.remove(clear_session_cookie());
    (
        jar,
        Json(serde_json::json!({ "ok": true, "message": "logged out" })),
    )
}

// ---- Cookie helpers ----

/// Session cookie instruction. No max-age: expiry is enforced by the
/// credential's embedded claim, not by the cookie.
fn session_cookie(credential: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, credential))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

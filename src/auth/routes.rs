//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET|POST /auth/start` - begin the OAuth flow (302 to provider)
/// - `GET /auth/callback` - OAuth redirect target (302 to app home)
/// - `GET /me` - current user information
/// - `POST /logout` - clear the session cookie
pub fn auth_routes() -> Router {
    Router::new()
        .route(
            "/auth/start",
            get(handlers::start_login).post(handlers::start_login),
        )
        .route("/auth/callback", get(handlers::oauth_callback))
        .route("/me", get(handlers::me_handler))
        .route("/logout", post(handlers::logout_handler))
}

//! # Auth Module
//!
//! The identity and authorization subsystem:
//! - Google OAuth authorization-code flow (start + callback)
//! - signed, self-contained session credentials carried in an HTTP-only cookie
//! - anti-forgery state cookie binding the two phases of a login attempt
//! - SessionUser extractor gating every protected route

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod oauth;
pub mod routes;
pub mod state_token;
pub mod token;
pub mod users;


pub use extractors::SessionUser;
pub use routes::auth_routes;

/// Name of the session credential cookie.
pub const SESSION_COOKIE: &str = "session";

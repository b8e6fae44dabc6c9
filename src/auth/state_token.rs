// src/auth/state_token.rs
//! Anti-forgery state for the OAuth flow
//!
//! A random value is issued when the flow starts, carried in a short-lived
//! HTTP-only cookie, and must be echoed back verbatim by the provider
//! redirect. The value lives only in the client-held cookie; replay within
//! the cookie's lifetime is a known residual risk accepted in place of a
//! server-side single-use ledger.

use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// Name of the state cookie set on `/auth/start`.
pub const STATE_COOKIE: &str = "oauth_state";

/// How long a login attempt may take before the state cookie lapses.
const STATE_TTL_MINUTES: i64 = 10;

/// Entropy per state value, comfortably above the 16-byte floor.
const STATE_BYTES: usize = 32;

/// Generate a fresh URL-safe state value.
pub fn issue() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// A callback is accepted only when both values are present, non-empty and
/// byte-equal. Missing and mismatched are treated identically.
pub fn validate(echoed: Option<&str>, cookie: Option<&str>) -> bool {
    match (echoed, cookie) {
        (Some(e), Some(c)) if !e.is_empty() && !c.is_empty() => e == c,
        _ => false,
    }
}

/// Cookie instruction carrying the state value for one login attempt.
pub fn state_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::minutes(STATE_TTL_MINUTES))
        .build()
}

/// Removal cookie for the state value once the flow completes.
pub fn clear_state_cookie() -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, "")).path("/").build()
}

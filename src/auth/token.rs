// src/auth/token.rs
//! Session token codec
//!
//! Credentials are compact HS256 JWS strings: a header and the claims as two
//! base64url segments plus the MAC as a third, joined by `.`, which is
//! outside the encoding alphabet. Verification recomputes the MAC over the
//! first two segments and compares it in constant time before any claim is
//! trusted, then rejects anything at or past its expiration.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::models::{Claims, User};

/// Validity window attached to every issued credential.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Why a credential was rejected.
///
/// The session resolver collapses all of these into "no identity"; the
/// distinction exists for logging and tests.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Not three segments, or a segment failed to decode.
    MalformedCredential,
    /// MAC mismatch.
    BadSignature,
    /// `exp` is at or before the current time.
    Expired,
}

/// Sign a session credential for `user`, expiring `SESSION_TTL_DAYS` from now.
pub fn issue_session(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).timestamp() as usize;
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        exp,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a credential and return its claims.
///
/// Expiry is checked here rather than by the library: its check passes a
/// credential whose `exp` equals the current second, while this codec
/// treats `now >= exp` as expired.
pub fn verify(credential: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let claims = decode::<Claims>(
        credential,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        _ => TokenError::MalformedCredential,
    })?;

    if claims.exp as i64 <= Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Session credential claims
///
/// Self-contained: validity is a function of the signature and `exp` alone,
/// so there is no server-side session table. A new login issues a fresh
/// credential; logout is client-side cookie deletion, and an already-issued
/// credential stays valid until it expires. That is the accepted trade-off
/// for keeping the service stateless.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub name: Option<String>,
    pub exp: usize,
}

/// User database model
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    #[serde(skip_serializing)]
    pub provider: String,
    #[serde(skip_serializing)]
    pub provider_id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub created_at: String,
}

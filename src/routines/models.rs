use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Routine database model
///
/// `created_at` is an ISO-8601 UTC string, assigned by the store.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Routine {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub title: String,
    pub created_at: String,
}

// Request fields are Options so that missing values surface as a 400 from
// the validators instead of a deserialization rejection.

#[derive(Debug, Deserialize)]
pub struct CreateRoutineRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoutineRequest {
    pub id: Option<i64>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRoutineRequest {
    pub id: Option<i64>,
}

use sqlx::SqlitePool;

use super::models::Routine;
use crate::common::ApiError;

/// Ownership-scoped routine store access.
///
/// Every statement carries the owner's user id as a mandatory predicate.
/// Update/delete that match zero rows surface as `NotFound` whether the row
/// is absent or belongs to someone else, so another user's rows are
/// indistinguishable from nonexistent ones.
pub struct RoutinesService {
    db: SqlitePool,
}

impl RoutinesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Newest-first listing of the caller's routines.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Routine>, ApiError> {
        sqlx::query_as::<_, Routine>(
            "SELECT id, user_id, title, created_at FROM routines
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn create(&self, user_id: i64, title: &str) -> Result<Routine, ApiError> {
        sqlx::query_as::<_, Routine>(
            "INSERT INTO routines (user_id, title) VALUES (?, ?)
             RETURNING id, user_id, title, created_at",
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn update(&self, user_id: i64, id: i64, title: &str) -> Result<Routine, ApiError> {
        sqlx::query_as::<_, Routine>(
            "UPDATE routines SET title = ? WHERE id = ? AND user_id = ?
             RETURNING id, user_id, title, created_at",
        )
        .bind(title)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("routine not found".to_string()))
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<i64, ApiError> {
        let deleted: Option<(i64,)> =
            sqlx::query_as("DELETE FROM routines WHERE id = ? AND user_id = ? RETURNING id")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        deleted
            .map(|(id,)| id)
            .ok_or_else(|| ApiError::NotFound("routine not found".to_string()))
    }
}

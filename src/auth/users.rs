// src/auth/users.rs
//! Identity reconciliation

use sqlx::SqlitePool;
use tracing::info;

use super::models::User;
use crate::common::safe_email_log;

/// Create-or-update a user from a provider profile.
///
/// A single atomic statement keyed on `(provider, provider_id)`: concurrent
/// logins for the same subject serialize on the store's conflict handling
/// rather than application-level locking, and a re-login refreshes
/// email/name/picture in place instead of creating a duplicate row.
///
/// A row left behind by a login that failed later in the flow stays valid
/// and is simply reconciled again on the next attempt.
pub async fn reconcile_user(
    pool: &SqlitePool,
    provider: &str,
    subject: &str,
    email: &str,
    name: Option<&str>,
    picture: Option<&str>,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (provider, provider_id, email, name, picture)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(provider, provider_id) DO UPDATE SET
            email = excluded.email,
            name = excluded.name,
            picture = excluded.picture
        RETURNING id, provider, provider_id, email, name, picture, created_at
        "#,
    )
    .bind(provider)
    .bind(subject)
    .bind(email)
    .bind(name)
    .bind(picture)
    .fetch_one(pool)
    .await?;

    info!(
        user_id = user.id,
        email = %safe_email_log(&user.email),
        provider = provider,
        "reconciled provider identity"
    );

    Ok(user)
}

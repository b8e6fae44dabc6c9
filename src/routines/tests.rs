//! Tests for routines module
//!
//! These tests verify core routine functionality including:
//! - request validation
//! - ownership-scoped store access
//! - newest-first ordering

#[cfg(test)]
mod tests {
    use super::super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::super::services::RoutinesService;
    use crate::auth::users::reconcile_user;
    use crate::common::{ApiError, Validator};

    // ---- Validation ----

    #[test]
    fn test_create_validation_accepts_title() {
        let request = models::CreateRoutineRequest {
            title: Some("Run 5k".to_string()),
        };
        assert!(request.validate(&request).is_valid);
    }

    #[test]
    fn test_create_validation_rejects_missing_title() {
        let request = models::CreateRoutineRequest { title: None };
        assert!(!request.validate(&request).is_valid);
    }

    #[test]
    fn test_create_validation_rejects_whitespace_title() {
        let request = models::CreateRoutineRequest {
            title: Some("   ".to_string()),
        };
        assert!(!request.validate(&request).is_valid);
    }

    #[test]
    fn test_update_validation_requires_id_and_title() {
        let request = models::UpdateRoutineRequest {
            id: None,
            title: Some("x".to_string()),
        };
        assert!(!request.validate(&request).is_valid);

        let request = models::UpdateRoutineRequest {
            id: Some(1),
            title: None,
        };
        assert!(!request.validate(&request).is_valid);

        let request = models::UpdateRoutineRequest {
            id: Some(1),
            title: Some("x".to_string()),
        };
        assert!(request.validate(&request).is_valid);
    }

    #[test]
    fn test_delete_validation_requires_id() {
        let request = models::DeleteRoutineRequest { id: None };
        assert!(!request.validate(&request).is_valid);

        let request = models::DeleteRoutineRequest { id: Some(7) };
        assert!(request.validate(&request).is_valid);
    }

    // ---- Store access ----

    async fn setup_test_db() -> sqlx::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        crate::common::migrations::run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed_user(pool: &sqlx::SqlitePool, subject: &str, email: &str) -> i64 {
        reconcile_user(pool, "google", subject, email, None, None)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_returns_row_with_timestamp() {
        let pool = setup_test_db().await;
        let user_id = seed_user(&pool, "sub-1", "one@example.com").await;
        let service = RoutinesService::new(pool);

        let item = service.create(user_id, "Run 5k").await.unwrap();
        assert!(item.id > 0);
        assert_eq!(item.title, "Run 5k");
        // ISO-8601 UTC from the store default
        assert!(item.created_at.contains('T'));
        assert!(item.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = setup_test_db().await;
        let user_id = seed_user(&pool, "sub-1", "one@example.com").await;
        let service = RoutinesService::new(pool);

        service.create(user_id, "first").await.unwrap();
        service.create(user_id, "second").await.unwrap();
        let newest = service.create(user_id, "third").await.unwrap();

        let items = service.list_for_user(user_id).await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, newest.id);
        assert_eq!(items[0].title, "third");
        assert_eq!(items[2].title, "first");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let pool = setup_test_db().await;
        let user_a = seed_user(&pool, "sub-a", "a@example.com").await;
        let user_b = seed_user(&pool, "sub-b", "b@example.com").await;
        let service = RoutinesService::new(pool);

        service.create(user_a, "mine").await.unwrap();

        let theirs = service.list_for_user(user_b).await.unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn test_update_of_foreign_routine_is_not_found() {
        let pool = setup_test_db().await;
        let user_a = seed_user(&pool, "sub-a", "a@example.com").await;
        let user_b = seed_user(&pool, "sub-b", "b@example.com").await;
        let service = RoutinesService::new(pool);

        let routine = service.create(user_a, "original").await.unwrap();

        // another user's id is indistinguishable from a nonexistent one
        let err = service.update(user_b, routine.id, "hijacked").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let items = service.list_for_user(user_a).await.unwrap();
        assert_eq!(items[0].title, "original");
    }

    #[tokio::test]
    async fn test_delete_of_foreign_routine_is_not_found() {
        let pool = setup_test_db().await;
        let user_a = seed_user(&pool, "sub-a", "a@example.com").await;
        let user_b = seed_user(&pool, "sub-b", "b@example.com").await;
        let service = RoutinesService::new(pool);

        let routine = service.create(user_a, "keep me").await.unwrap();

        let err = service.delete(user_b, routine.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let items = service.list_for_user(user_a).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_nonexistent_id_is_not_found() {
        let pool = setup_test_db().await;
        let user_id = seed_user(&pool, "sub-1", "one@example.com").await;
        let service = RoutinesService::new(pool);

        let err = service.update(user_id, 999_999, "x").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_deleted_id() {
        let pool = setup_test_db().await;
        let user_id = seed_user(&pool, "sub-1", "one@example.com").await;
        let service = RoutinesService::new(pool);

        let routine = service.create(user_id, "done soon").await.unwrap();
        let deleted_id = service.delete(user_id, routine.id).await.unwrap();

        assert_eq!(deleted_id, routine.id);
        assert!(service.list_for_user(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_persists_new_title() {
        let pool = setup_test_db().await;
        let user_id = seed_user(&pool, "sub-1", "one@example.com").await;
        let service = RoutinesService::new(pool);

        let routine = service.create(user_id, "before").await.unwrap();
        let updated = service.update(user_id, routine.id, "after").await.unwrap();

        assert_eq!(updated.id, routine.id);
        assert_eq!(updated.title, "after");
    }

    // ---- HTTP contract ----

    use axum::body::Body;
    use axum::extract::Extension;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::auth::token;
    use crate::common::{AppState, Config};

    const SECRET: &str = "test_secret_key";

    fn test_state(pool: sqlx::SqlitePool) -> AppState {
        AppState {
            db: pool,
            http: reqwest::Client::new(),
            config: Arc::new(Config {
                session_secret: Some(SECRET.to_string()),
                google_client_id: None,
                google_client_secret: None,
                redirect_uri: "http://localhost:8080/auth/callback".to_string(),
                app_home_url: "/".to_string(),
                cookie_secure: false,
            }),
        }
    }

    fn test_app(state: AppState) -> Router {
        Router::new()
            .merge(crate::auth::auth_routes())
            .merge(routes::routines_routes())
            .layer(Extension(state))
    }

    async fn session_cookie_for(pool: &sqlx::SqlitePool, subject: &str, email: &str) -> String {
        let user = reconcile_user(pool, "google", subject, email, None, None)
            .await
            .unwrap();
        let credential = token::issue_session(&user, SECRET).unwrap();
        format!("session={}", credential)
    }

    #[tokio::test]
    async fn test_post_routines_with_session_is_created() {
        let pool = setup_test_db().await;
        let cookie = session_cookie_for(&pool, "sub-1", "one@example.com").await;
        let app = test_app(test_state(pool));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/routines")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, cookie.as_str())
                    .body(Body::from(r#"{"title":"Run 5k"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_get_routines_without_session_is_unauthorized() {
        let pool = setup_test_db().await;
        let app = test_app(test_state(pool));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/routines")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_put_unknown_routine_is_not_found() {
        let pool = setup_test_db().await;
        let cookie = session_cookie_for(&pool, "sub-1", "one@example.com").await;
        let app = test_app(test_state(pool));

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/routines")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, cookie.as_str())
                    .body(Body::from(r#"{"id":999999,"title":"renamed"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

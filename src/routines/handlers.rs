//! Routine CRUD handlers
//!
//! Every handler takes `SessionUser`, so an unauthenticated request is
//! rejected with 401 before any store access occurs.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use super::models::{CreateRoutineRequest, DeleteRoutineRequest, UpdateRoutineRequest};
use super::services::RoutinesService;
use crate::auth::SessionUser;
use crate::common::{ApiError, AppState, Validator};

/// GET /routines - list the caller's routines, newest first
pub async fn list_routines(
    Extension(state): Extension<AppState>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError> {
    let service = RoutinesService::new(state.db.clone());
    let items = service.list_for_user(user.id).await?;

    Ok(Json(serde_json::json!({ "ok": true, "items": items })))
}

/// POST /routines - create a routine owned by the caller
pub async fn create_routine(
    Extension(state): Extension<AppState>,
    user: SessionUser,
    Json(request): Json<CreateRoutineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let Some(title) = trimmed_title(&request.title) else {
        return Err(ApiError::InvalidInput("title is required".to_string()));
    };

    let service = RoutinesService::new(state.db.clone());
    let item = service.create(user.id, &title).await?;

    info!(user_id = user.id, routine_id = item.id, "routine created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "ok": true, "item": item })),
    ))
}

/// PUT /routines - retitle one of the caller's routines
pub async fn update_routine(
    Extension(state): Extension<AppState>,
    user: SessionUser,
    Json(request): Json<UpdateRoutineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let (Some(id), Some(title)) = (request.id, trimmed_title(&request.title)) else {
        return Err(ApiError::InvalidInput("id and title are required".to_string()));
    };

    let service = RoutinesService::new(state.db.clone());
    let item = service.update(user.id, id, &title).await?;

    info!(user_id = user.id, routine_id = item.id, "routine updated");

    Ok(Json(serde_json::json!({ "ok": true, "item": item })))
}

/// DELETE /routines - delete one of the caller's routines
pub async fn delete_routine(
    Extension(state): Extension<AppState>,
    user: SessionUser,
    Json(request): Json<DeleteRoutineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let Some(id) = request.id else {
        return Err(ApiError::InvalidInput("id is required".to_string()));
    };

    let service = RoutinesService::new(state.db.clone());
    let deleted_id = service.delete(user.id, id).await?;

    info!(user_id = user.id, routine_id = deleted_id, "routine deleted");

    Ok(Json(
        serde_json::json!({ "ok": true, "deleted_id": deleted_id }),
    ))
}

fn trimmed_title(title: &Option<String>) -> Option<String> {
    title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

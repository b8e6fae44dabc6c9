//! Routine routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates the routines router
///
/// All four methods share one path; records are addressed through JSON
/// bodies rather than path parameters, matching the frontend contract.
pub fn routines_routes() -> Router {
    Router::new().route(
        "/routines",
        get(handlers::list_routines)
            .post(handlers::create_routine)
            .put(handlers::update_routine)
            .delete(handlers::delete_routine),
    )
}

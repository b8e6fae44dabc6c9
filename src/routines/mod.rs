//! # Routines Module
//!
//! Personal routine records: ownership-scoped CRUD behind the session gate.
//! Every store operation carries the authenticated user's id as a mandatory
//! predicate, so one user can never observe or mutate another's rows.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::routines_routes;

use super::models::{CreateRoutineRequest, DeleteRoutineRequest, UpdateRoutineRequest};
use crate::common::{ValidationResult, Validator};

/// Titles are trimmed before the empty check; whitespace-only is empty.
fn has_title(title: &Option<String>) -> bool {
    title
        .as_deref()
        .map(str::trim)
        .is_some_and(|t| !t.is_empty())
}

impl Validator<CreateRoutineRequest> for CreateRoutineRequest {
    fn validate(&self, data: &CreateRoutineRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !has_title(&data.title) {
            result.add_error("title", "title is required");
        }

        result
    }
}

impl Validator<UpdateRoutineRequest> for UpdateRoutineRequest {
    fn validate(&self, data: &UpdateRoutineRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !data.id.is_some_and(|id| id > 0) {
            result.add_error("id", "id is required");
        }

        if !has_title(&data.title) {
            result.add_error("title", "title is required");
        }

        result
    }
}

impl Validator<DeleteRoutineRequest> for DeleteRoutineRequest {
    fn validate(&self, data: &DeleteRoutineRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !data.id.is_some_and(|id| id > 0) {
            result.add_error("id", "id is required");
        }

        result
    }
}

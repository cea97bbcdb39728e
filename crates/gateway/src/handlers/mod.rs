//! API handlers module

pub mod analytics;
pub mod graph;
pub mod health;
pub mod metrics;
pub mod papers;
pub mod web;

use citegraph_common::errors::AppError;

/// Non-empty, trimmed value of a required query parameter
pub(crate) fn required_param<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingField {
            field: field.to_string(),
        })
}

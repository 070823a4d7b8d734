pub mod exercises;
pub mod health;
pub mod progress;
pub mod workouts;

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::parse_date;

/// Reads a required integer id from a query parameter.
fn required_id(value: Option<&str>, name: &str) -> Result<i64> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required", name)))?;

    value
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be an integer", name)))
}

/// Reads an optional `YYYY-MM-DD` query parameter; empty counts as absent.
fn optional_date(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_date(v)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{} must be a YYYY-MM-DD date", name))),
    }
}

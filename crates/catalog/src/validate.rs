//! Field-level input checks shared by catalog records.

use menucost_core::{DomainError, DomainResult};

pub(crate) const NAME_MAX: usize = 200;
pub(crate) const CATEGORY_MAX: usize = 100;
pub(crate) const COOKING_METHOD_MAX: usize = 200;
pub(crate) const IMAGE_URL_MAX: usize = 500;

pub(crate) fn name(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    max_len(field, value, NAME_MAX)
}

pub(crate) fn optional_text(field: &str, value: Option<&str>, max: usize) -> DomainResult<()> {
    match value {
        Some(v) => max_len(field, v, max),
        None => Ok(()),
    }
}

fn max_len(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub(crate) fn non_negative(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be a non-negative number (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn positive(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be greater than zero (got {value})"
        )));
    }
    Ok(())
}

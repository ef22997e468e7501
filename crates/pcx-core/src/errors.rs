//! Cross-cutting error types for PCX.
//!
//! Record-level validation errors live here because every crate that accepts
//! records (the schema boundary and the engine) checks the same field ranges.
//! Computation errors (`EngineError`) are defined in `pcx-engine`; a unified
//! error is deferred to `pcx-cli` where all crate errors converge.

use thiserror::Error;

/// Errors that can be raised by any PCX crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A record field is outside its allowed range or not a finite number.
    #[error("Invalid {entity_type} {id}: field '{field}' {reason}")]
    InvalidField {
        entity_type: String,
        id: String,
        field: String,
        reason: String,
    },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub(crate) fn invalid_field(
        entity_type: &str,
        id: &str,
        field: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Check that `value` is finite and inside `[min, max]`.
pub(crate) fn check_range(
    entity_type: &str,
    id: &str,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::invalid_field(
            entity_type,
            id,
            field,
            "must be a finite number",
        ));
    }
    if value < min || value > max {
        return Err(CoreError::invalid_field(
            entity_type,
            id,
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

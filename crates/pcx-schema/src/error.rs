//! Schema validation error types.

use pcx_core::errors::CoreError;
use thiserror::Error;

/// Errors from the schema registry and the decoding boundary.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// Individual error messages from the validator, each with its
        /// instance path.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),

    /// Value matched the schema but could not be deserialized.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A decoded record failed its own range checks.
    #[error(transparent)]
    Record(#[from] CoreError),
}

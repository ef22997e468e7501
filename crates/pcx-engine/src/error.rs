//! Engine error and warning types.

use pcx_core::errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal failures of an engine computation.
///
/// Division-by-zero cases are never errors; they resolve through the fallback
/// policies documented on each metric.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The WBS forest is malformed (orphan parent, duplicate id, bad weightage)
    /// or a referenced record does not exist.
    #[error("Structural error at {node_id}: {reason}")]
    Structural { node_id: String, reason: String },

    /// A parent chain loops back on itself.
    #[error("Cycle detected in WBS tree at node {node_id}")]
    Cycle { node_id: String },

    /// The project is not configured for the requested computation
    /// (e.g. no positive budget for EVM).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A record or argument carries a value the engine cannot compute with.
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl EngineError {
    pub(crate) fn structural(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Structural {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the roll-up of the affected project.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. } | Self::Cycle { .. })
    }
}

impl From<CoreError> for EngineError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidField {
                entity_type,
                id,
                field,
                reason,
            } => Self::InvalidInput {
                field: format!("{entity_type}.{field}"),
                reason: format!("{id}: {reason}"),
            },
            CoreError::NotFound { entity_type, id } => Self::Structural {
                node_id: id,
                reason: format!("{entity_type} not found"),
            },
            CoreError::Validation(reason) => Self::InvalidInput {
                field: "record".into(),
                reason,
            },
        }
    }
}

/// Non-fatal: a sibling group whose weightages do not sum to 100.
///
/// Computation proceeds with the literal weights; the warning travels with the
/// result so the inconsistency is visible instead of silently normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightageWarning {
    /// `None` for the root-level group.
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
    pub sum: f64,
}

impl std::fmt::Display for WeightageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.parent_id {
            Some(parent) => write!(
                f,
                "children of {parent} have weightage sum {:.4} (expected 100)",
                self.sum
            ),
            None => write!(
                f,
                "root nodes have weightage sum {:.4} (expected 100)",
                self.sum
            ),
        }
    }
}

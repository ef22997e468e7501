use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::enums::RiskStatus;
use crate::errors::CoreError;

/// A risk register entry.
///
/// `risk_score` is derived (`probability * impact`); any value supplied by a
/// client is ignored and recomputed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Risk {
    pub id: String,
    pub title: String,
    /// 1..=5
    pub probability: u8,
    /// 1..=5
    pub impact: u8,
    #[serde(default)]
    pub risk_score: u8,
    pub status: RiskStatus,
}

impl Validate for Risk {
    fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [("probability", self.probability), ("impact", self.impact)] {
            if !(1..=5).contains(&value) {
                return Err(CoreError::InvalidField {
                    entity_type: "risk".into(),
                    id: self.id.clone(),
                    field: field.into(),
                    reason: format!("must be between 1 and 5, got {value}"),
                });
            }
        }
        Ok(())
    }
}

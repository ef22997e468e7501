use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Validate;

/// The project record: budget, currency, and the explicitly active baseline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub total_budget: f64,
    pub currency: String,
    #[serde(default)]
    pub active_baseline_id: Option<String>,
}

impl Validate for Project {}

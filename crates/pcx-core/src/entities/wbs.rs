use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::errors::{CoreError, check_range};

/// A work-breakdown node. `weightage` is this node's share (0-100) of its
/// parent's total work.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WbsNode {
    pub id: String,
    /// Dotted hierarchical code, e.g. `2.1.3`.
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Declared depth, root = 0.
    #[serde(default)]
    pub level: u32,
    pub weightage: f64,
    /// Sibling sort key; ties are broken by `code`.
    #[serde(default)]
    pub order: i32,
}

/// The weightage must be a finite share in `0..=100`.
impl Validate for WbsNode {
    fn validate(&self) -> Result<(), CoreError> {
        check_range("wbs_node", &self.id, "weightage", self.weightage, 0.0, 100.0)
    }
}

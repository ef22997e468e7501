use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::enums::EntryType;
use crate::errors::{CoreError, check_range};

/// A cost code, optionally linked to one WBS node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CostCode {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: String,
    /// Unlinked codes only contribute to project-level totals.
    #[serde(default)]
    pub wbs_id: Option<String>,
}

/// A single ledger entry against a cost code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CostTransaction {
    #[serde(default)]
    pub id: Option<String>,
    pub cost_code_id: String,
    pub entry_type: EntryType,
    /// Signed; conventionally non-negative.
    pub amount: f64,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for CostCode {}

/// NaN and infinite amounts are rejected.
impl Validate for CostTransaction {
    fn validate(&self) -> Result<(), CoreError> {
        let id = self.id.as_deref().unwrap_or(&self.cost_code_id);
        check_range("cost_transaction", id, "amount", self.amount, f64::MIN, f64::MAX)
    }
}

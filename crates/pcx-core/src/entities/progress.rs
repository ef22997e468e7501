use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::errors::{CoreError, check_range};

/// A periodic progress report against one WBS node.
///
/// Physical and planned progress are optional so a report may carry only one
/// of them; roll-up resolves each independently from the latest report that
/// has it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProgressSnapshot {
    pub wbs_id: String,
    pub report_date: NaiveDate,
    #[serde(default)]
    pub physical_progress: Option<f64>,
    #[serde(default)]
    pub planned_progress: Option<f64>,
    #[serde(default)]
    pub manhours: Option<f64>,
}

/// Both progress values lie in `0..=100` and manhours is non-negative.
impl Validate for ProgressSnapshot {
    fn validate(&self) -> Result<(), CoreError> {
        let id = format!("{}@{}", self.wbs_id, self.report_date);
        if let Some(physical) = self.physical_progress {
            check_range("progress_snapshot", &id, "physical_progress", physical, 0.0, 100.0)?;
        }
        if let Some(planned) = self.planned_progress {
            check_range("progress_snapshot", &id, "planned_progress", planned, 0.0, 100.0)?;
        }
        if let Some(manhours) = self.manhours {
            check_range("progress_snapshot", &id, "manhours", manhours, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}

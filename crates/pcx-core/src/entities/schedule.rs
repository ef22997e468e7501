use std::collections::BTreeSet;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::errors::{CoreError, check_range};

/// A live schedule task. Its dates are the current actual/forecast dates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScheduleTask {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub predecessors: BTreeSet<String>,
    #[serde(default)]
    pub wbs_id: Option<String>,
}

impl ScheduleTask {
    /// Inclusive calendar duration in days (`end - start + 1`).
    #[must_use]
    pub fn duration(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Validate for ScheduleTask {
    fn validate(&self) -> Result<(), CoreError> {
        if self.end_date < self.start_date {
            return Err(CoreError::InvalidField {
                entity_type: "schedule_task".into(),
                id: self.id.clone(),
                field: "end_date".into(),
                reason: format!("{} is before start_date {}", self.end_date, self.start_date),
            });
        }
        check_range("schedule_task", &self.id, "progress", self.progress, 0.0, 100.0)
    }
}

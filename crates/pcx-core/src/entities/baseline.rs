use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Validate;

/// Planned dates of one task as captured in a baseline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BaselineTask {
    /// Stable id of the live `ScheduleTask` this row was captured from.
    pub task_id: String,
    pub planned_start: NaiveDate,
    pub planned_end: NaiveDate,
    pub planned_duration: i64,
    #[serde(default)]
    pub planned_progress: f64,
}

/// An immutable capture of the planned schedule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScheduleBaseline {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<BaselineTask>,
}

impl Validate for BaselineTask {}

impl Validate for ScheduleBaseline {}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    CostCode, CostTransaction, ProgressSnapshot, Project, Risk, ScheduleBaseline, ScheduleTask,
    Validate, WbsNode,
};
use crate::errors::CoreError;

/// Every record of one project, read from the same point-in-time view of the
/// store. The engine assumes the caller kept these consistent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectBundle {
    pub project: Project,
    #[serde(default)]
    pub wbs_nodes: Vec<WbsNode>,
    #[serde(default)]
    pub progress: Vec<ProgressSnapshot>,
    #[serde(default)]
    pub cost_codes: Vec<CostCode>,
    #[serde(default)]
    pub cost_transactions: Vec<CostTransaction>,
    #[serde(default)]
    pub schedule_tasks: Vec<ScheduleTask>,
    #[serde(default)]
    pub baselines: Vec<ScheduleBaseline>,
    #[serde(default)]
    pub risks: Vec<Risk>,
}

/// Checks every record in the bundle and stops at the first bad one.
impl Validate for ProjectBundle {
    fn validate(&self) -> Result<(), CoreError> {
        self.project.validate()?;
        validate_all(&self.wbs_nodes)?;
        validate_all(&self.progress)?;
        validate_all(&self.cost_codes)?;
        validate_all(&self.cost_transactions)?;
        validate_all(&self.schedule_tasks)?;
        validate_all(&self.baselines)?;
        validate_all(&self.risks)
    }
}

fn validate_all<T: Validate>(records: &[T]) -> Result<(), CoreError> {
    records.iter().try_for_each(Validate::validate)
}

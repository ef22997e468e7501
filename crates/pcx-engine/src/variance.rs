//! Baseline-versus-live schedule variance.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use pcx_config::VarianceConfig;
use pcx_core::entities::{BaselineTask, Project, ScheduleBaseline, ScheduleTask, Validate};
use pcx_core::enums::VarianceStatus;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Variance of one baseline task. Every `current_*` and `*_variance` field is
/// `None` when the live task no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskVariance {
    pub task_id: String,
    pub status: VarianceStatus,
    pub planned_start: NaiveDate,
    pub planned_end: NaiveDate,
    pub planned_duration: i64,
    pub current_start: Option<NaiveDate>,
    pub current_end: Option<NaiveDate>,
    pub current_duration: Option<i64>,
    /// Days; positive means later than planned.
    pub start_variance: Option<i64>,
    pub end_variance: Option<i64>,
    pub duration_variance: Option<i64>,
    pub is_critical: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VarianceSummary {
    pub total_tasks: usize,
    pub ahead: usize,
    pub on_track: usize,
    pub minor_delay: usize,
    pub major_delay: usize,
    pub deleted: usize,
    /// `ahead + on_track`
    pub on_track_count: usize,
    /// `minor_delay + major_delay`
    pub delayed_count: usize,
    pub on_track_percent: f64,
    pub delayed_percent: f64,
    /// Mean end variance over tasks finishing late; 0 when none do.
    pub average_delay_days: f64,
    pub critical_delayed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceReport {
    pub summary: VarianceSummary,
    pub per_task: Vec<TaskVariance>,
    /// Live tasks that were not captured in the baseline.
    pub new_tasks: Vec<String>,
}

/// Resolve the project's active baseline.
///
/// # Errors
///
/// [`EngineError::Structural`] when `active_baseline_id` names a baseline that
/// is not in `baselines`.
pub fn select_active_baseline<'a>(
    project: &Project,
    baselines: &'a [ScheduleBaseline],
) -> Result<Option<&'a ScheduleBaseline>, EngineError> {
    let Some(active_id) = project.active_baseline_id.as_deref() else {
        return Ok(None);
    };
    baselines
        .iter()
        .find(|baseline| baseline.id == active_id)
        .map(Some)
        .ok_or_else(|| {
            EngineError::structural(
                active_id,
                format!("active baseline of project {} does not exist", project.id),
            )
        })
}

/// Classify every baseline task against the live schedule.
///
/// # Errors
///
/// - [`EngineError::Structural`] when two live tasks share an id.
/// - [`EngineError::InvalidInput`] when a live task ends before it starts.
pub fn classify(
    baseline_tasks: &[BaselineTask],
    live_tasks: &[ScheduleTask],
    config: &VarianceConfig,
) -> Result<VarianceReport, EngineError> {
    let mut live: HashMap<&str, &ScheduleTask> = HashMap::with_capacity(live_tasks.len());
    for task in live_tasks {
        task.validate()?;
        if live.insert(task.id.as_str(), task).is_some() {
            return Err(EngineError::structural(&task.id, "duplicate schedule task id"));
        }
    }

    let per_task: Vec<TaskVariance> = baseline_tasks
        .iter()
        .map(|planned| task_variance(planned, live.get(planned.task_id.as_str()).copied(), config))
        .collect();

    let captured: HashSet<&str> = baseline_tasks.iter().map(|t| t.task_id.as_str()).collect();
    let new_tasks = live_tasks
        .iter()
        .filter(|task| !captured.contains(task.id.as_str()))
        .map(|task| task.id.clone())
        .collect();

    let summary = summarize(&per_task);
    tracing::debug!(
        tasks = summary.total_tasks,
        delayed = summary.delayed_count,
        deleted = summary.deleted,
        "variance: baseline classified"
    );

    Ok(VarianceReport {
        summary,
        per_task,
        new_tasks,
    })
}

fn task_variance(
    planned: &BaselineTask,
    live: Option<&ScheduleTask>,
    config: &VarianceConfig,
) -> TaskVariance {
    let mut row = TaskVariance {
        task_id: planned.task_id.clone(),
        status: VarianceStatus::TaskDeleted,
        planned_start: planned.planned_start,
        planned_end: planned.planned_end,
        planned_duration: planned.planned_duration,
        current_start: None,
        current_end: None,
        current_duration: None,
        start_variance: None,
        end_variance: None,
        duration_variance: None,
        is_critical: None,
    };
    let Some(task) = live else {
        return row;
    };

    let end_variance = (task.end_date - planned.planned_end).num_days();
    row.status = VarianceStatus::from_end_variance(end_variance, config.minor_delay_days);
    // A task with no progress has not started; its start date is only a plan.
    if task.progress > 0.0 {
        row.current_start = Some(task.start_date);
        row.start_variance = Some((task.start_date - planned.planned_start).num_days());
    }
    row.current_end = Some(task.end_date);
    row.current_duration = Some(task.duration());
    row.end_variance = Some(end_variance);
    row.duration_variance = Some(task.duration() - planned.planned_duration);
    row.is_critical = Some(task.is_critical);
    row
}

#[allow(clippy::cast_precision_loss)]
fn summarize(rows: &[TaskVariance]) -> VarianceSummary {
    let mut summary = VarianceSummary {
        total_tasks: rows.len(),
        ..VarianceSummary::default()
    };
    let mut delay_total = 0i64;
    let mut delay_count = 0usize;

    for row in rows {
        match row.status {
            VarianceStatus::Ahead => summary.ahead += 1,
            VarianceStatus::OnTrack => summary.on_track += 1,
            VarianceStatus::MinorDelay => summary.minor_delay += 1,
            VarianceStatus::MajorDelay => summary.major_delay += 1,
            VarianceStatus::TaskDeleted => summary.deleted += 1,
        }
        if row.status.is_on_track() {
            summary.on_track_count += 1;
        }
        if row.status.is_delayed() && row.is_critical == Some(true) {
            summary.critical_delayed += 1;
        }
        if let Some(days) = row.end_variance.filter(|days| *days > 0) {
            delay_total += days;
            delay_count += 1;
        }
    }

    summary.delayed_count = summary.minor_delay + summary.major_delay;
    if summary.total_tasks > 0 {
        let total = summary.total_tasks as f64;
        summary.on_track_percent = summary.on_track_count as f64 / total * 100.0;
        summary.delayed_percent = summary.delayed_count as f64 / total * 100.0;
    }
    if delay_count > 0 {
        summary.average_delay_days = delay_total as f64 / delay_count as f64;
    }
    summary
}

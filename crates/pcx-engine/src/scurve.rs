//! Cumulative planned/earned value series from progress history.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use pcx_core::entities::ProgressSnapshot;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, WeightageWarning};
use crate::rollup::{self, NodeProgress};
use crate::wbs::TreeBuild;

/// One point of the series: project-level progress as of `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SCurvePoint {
    pub date: NaiveDate,
    pub planned_progress: f64,
    pub physical_progress: f64,
    pub planned_value: f64,
    pub earned_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SCurve {
    pub budget: f64,
    /// Strictly ascending by date, one point per distinct report date.
    pub points: Vec<SCurvePoint>,
    pub warnings: Vec<WeightageWarning>,
}

/// Build the series, evaluating report dates in parallel.
///
/// # Errors
///
/// - [`EngineError::Configuration`] when `budget` is negative or not finite.
/// - [`EngineError::InvalidInput`] for an out-of-range snapshot.
pub fn build_s_curve(
    build: &TreeBuild,
    snapshots: &[ProgressSnapshot],
    budget: f64,
) -> Result<SCurve, EngineError> {
    let dates = prepare(snapshots, budget)?;
    let points = dates
        .par_iter()
        .map(|&date| point(build, snapshots, budget, date))
        .collect();
    Ok(finish(build, budget, points))
}

/// Same as [`build_s_curve`] on the calling thread.
///
/// # Errors
///
/// Same as [`build_s_curve`].
pub fn build_s_curve_sequential(
    build: &TreeBuild,
    snapshots: &[ProgressSnapshot],
    budget: f64,
) -> Result<SCurve, EngineError> {
    let dates = prepare(snapshots, budget)?;
    let points = dates
        .iter()
        .map(|&date| point(build, snapshots, budget, date))
        .collect();
    Ok(finish(build, budget, points))
}

fn prepare(snapshots: &[ProgressSnapshot], budget: f64) -> Result<Vec<NaiveDate>, EngineError> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(EngineError::Configuration(format!(
            "S-curve budget must be a non-negative number, got {budget}"
        )));
    }
    rollup::validate_snapshots(snapshots)?;
    let dates: BTreeSet<NaiveDate> = snapshots.iter().map(|s| s.report_date).collect();
    Ok(dates.into_iter().collect())
}

fn point(
    build: &TreeBuild,
    snapshots: &[ProgressSnapshot],
    budget: f64,
    date: NaiveDate,
) -> SCurvePoint {
    let NodeProgress {
        physical, planned, ..
    } = rollup::compute(build, snapshots, Some(date)).project;
    SCurvePoint {
        date,
        planned_progress: planned,
        physical_progress: physical,
        planned_value: budget * planned / 100.0,
        earned_value: budget * physical / 100.0,
    }
}

fn finish(build: &TreeBuild, budget: f64, points: Vec<SCurvePoint>) -> SCurve {
    tracing::debug!(points = points.len(), budget, "scurve: series built");
    SCurve {
        budget,
        points,
        warnings: build.warnings.clone(),
    }
}

//! Earned-value metrics.
//!
//! Every division has a fallback so no metric is ever NaN or infinite:
//!
//! | metric | formula                         | fallback when           |
//! |--------|---------------------------------|-------------------------|
//! | CPI    | EV / AC                         | AC <= 0 -> 1            |
//! | SPI    | EV / PV                         | PV <= 0 -> 1            |
//! | EAC    | BAC / CPI                       | CPI <= 0 -> BAC         |
//! | TCPI   | (BAC - EV) / (BAC - AC)         | BAC == AC -> 1          |

use std::collections::BTreeMap;

use pcx_core::entities::Project;
use pcx_core::enums::{CostStatus, ScheduleStatus};
use serde::{Deserialize, Serialize};

use crate::cost::CostTotals;
use crate::error::EngineError;
use crate::rollup::{NodeProgress, RollUp};
use crate::wbs::TreeBuild;

/// Earned-value indices and forecasts at project or WBS scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvmMetrics {
    /// Budget at completion.
    pub bac: f64,
    pub pv: f64,
    pub ev: f64,
    pub ac: f64,
    pub cv: f64,
    pub sv: f64,
    pub cpi: f64,
    pub spi: f64,
    pub eac: f64,
    pub etc: f64,
    pub vac: f64,
    pub tcpi: f64,
    pub percent_complete: f64,
    pub percent_planned: f64,
    /// `AC / BAC * 100`
    pub percent_spent: f64,
    pub cost_status: CostStatus,
    pub schedule_status: ScheduleStatus,
}

/// Project-level metrics with the project's currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEvm {
    pub project_id: String,
    pub currency: String,
    pub metrics: EvmMetrics,
}

/// Metrics for one WBS node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WbsEvm {
    pub wbs_id: String,
    pub code: String,
    pub metrics: EvmMetrics,
}

/// Compute earned-value metrics for one scope.
///
/// # Errors
///
/// - [`EngineError::Configuration`] when `budget` is not a positive finite
///   number.
/// - [`EngineError::InvalidInput`] when progress or actual cost is not finite.
pub fn compute_evm(
    budget: f64,
    progress: NodeProgress,
    cost: &CostTotals,
) -> Result<EvmMetrics, EngineError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(EngineError::Configuration(format!(
            "budget must be greater than zero to compute earned value, got {budget}"
        )));
    }
    for (field, value) in [
        ("physical_progress", progress.physical),
        ("planned_progress", progress.planned),
        ("actual_cost", cost.actual),
    ] {
        if !value.is_finite() {
            return Err(EngineError::invalid_input(field, "must be a finite number"));
        }
    }

    let pv = finite_or(budget * progress.planned / 100.0, 0.0);
    let ev = finite_or(budget * progress.physical / 100.0, 0.0);
    let ac = cost.actual;

    let cpi = if ac > 0.0 { finite_or(ev / ac, 1.0) } else { 1.0 };
    let spi = if pv > 0.0 { finite_or(ev / pv, 1.0) } else { 1.0 };
    let eac = if cpi > 0.0 {
        finite_or(budget / cpi, budget)
    } else {
        budget
    };
    let remaining = budget - ac;
    let tcpi = if remaining == 0.0 {
        1.0
    } else {
        finite_or((budget - ev) / remaining, 1.0)
    };

    Ok(EvmMetrics {
        bac: budget,
        pv,
        ev,
        ac,
        cv: finite_or(ev - ac, 0.0),
        sv: finite_or(ev - pv, 0.0),
        cpi,
        spi,
        eac,
        etc: finite_or(eac - ac, 0.0),
        vac: finite_or(budget - eac, 0.0),
        tcpi,
        percent_complete: progress.physical,
        percent_planned: progress.planned,
        percent_spent: finite_or(ac / budget * 100.0, 0.0),
        cost_status: CostStatus::from_cpi(cpi),
        schedule_status: ScheduleStatus::from_spi(spi),
    })
}

/// Project-scope metrics from the project's total budget and rolled-up
/// progress.
///
/// # Errors
///
/// Same as [`compute_evm`]; a project without a positive `total_budget` is a
/// configuration error.
pub fn compute_project_evm(
    project: &Project,
    rollup: &RollUp,
    totals: &CostTotals,
    default_currency: &str,
) -> Result<ProjectEvm, EngineError> {
    let metrics = compute_evm(project.total_budget, rollup.project, totals).map_err(|error| {
        match error {
            EngineError::Configuration(reason) => {
                EngineError::Configuration(format!("project {}: {reason}", project.id))
            }
            other => other,
        }
    })?;
    tracing::debug!(
        project = %project.id,
        cpi = metrics.cpi,
        spi = metrics.spi,
        "evm: project metrics computed"
    );
    Ok(ProjectEvm {
        project_id: project.id.clone(),
        currency: project_currency(project, default_currency),
        metrics,
    })
}

/// The project's currency, or `default_currency` when the project leaves it
/// blank.
#[must_use]
pub fn project_currency(project: &Project, default_currency: &str) -> String {
    let currency = project.currency.trim();
    if currency.is_empty() {
        default_currency.to_string()
    } else {
        currency.to_string()
    }
}

/// Per-node metrics, using each node's rolled-up cost budget.
///
/// Nodes without a positive rolled-up budget have no earned-value basis and
/// are skipped. Results follow the tree's pre-order.
///
/// # Errors
///
/// [`EngineError::InvalidInput`] when a node's progress or actual cost is not
/// finite.
pub fn compute_wbs_evm(
    build: &TreeBuild,
    rollup: &RollUp,
    node_costs: &BTreeMap<String, CostTotals>,
) -> Result<Vec<WbsEvm>, EngineError> {
    let tree = &build.tree;
    let mut out = Vec::new();
    for slot in tree.pre_order() {
        let node = &tree.at(slot).node;
        let Some(cost) = node_costs.get(&node.id) else {
            continue;
        };
        if cost.budget <= 0.0 {
            continue;
        }
        let progress = rollup.node(&node.id).unwrap_or_default();
        out.push(WbsEvm {
            wbs_id: node.id.clone(),
            code: node.code.clone(),
            metrics: compute_evm(cost.budget, progress, cost)?,
        });
    }
    Ok(out)
}

const fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

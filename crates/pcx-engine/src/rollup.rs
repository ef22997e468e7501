//! Weighted progress roll-up through the WBS forest.
//!
//! Leaves take their progress from the latest snapshot on or before the as-of
//! date; every internal node is `sum(child * child.weightage) / 100` over its
//! direct children, computed in post-order.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use pcx_core::entities::{ProgressSnapshot, Validate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, WeightageWarning};
use crate::wbs::TreeBuild;

/// Effective progress of one node (or of the whole project).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeProgress {
    /// Physical (earned) progress, 0-100 for consistent weights.
    pub physical: f64,
    /// Planned progress, 0-100 for consistent weights.
    pub planned: f64,
    /// Sum of the latest reported manhours over the leaves of this subtree.
    pub manhours: f64,
}

/// Result of a roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollUp {
    /// `None` for a full-history roll-up.
    pub as_of: Option<NaiveDate>,
    pub nodes: BTreeMap<String, NodeProgress>,
    pub project: NodeProgress,
    /// Weightage warnings of the tree the roll-up used.
    pub warnings: Vec<WeightageWarning>,
}

impl RollUp {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<NodeProgress> {
        self.nodes.get(id).copied()
    }
}

/// Latest value seen for one field, with the date it was reported.
#[derive(Debug, Clone, Copy, Default)]
struct Latest {
    value: Option<(NaiveDate, f64)>,
}

impl Latest {
    /// Later dates win; on equal dates the later record in input order wins.
    fn offer(&mut self, date: NaiveDate, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        if self.value.is_none_or(|(current, _)| date >= current) {
            self.value = Some((date, value));
        }
    }

    fn get(self) -> f64 {
        self.value.map_or(0.0, |(_, v)| v)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct LeafReport {
    physical: Latest,
    planned: Latest,
    manhours: Latest,
}

/// Roll progress up as of `as_of`.
///
/// Leaves without any snapshot on or before `as_of` count as 0 for both
/// physical and planned progress. Weightage warnings from the tree build are
/// carried into the result; literal weights are used regardless.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when a snapshot carries a progress
/// value outside 0-100 or a negative/non-finite manhour count.
pub fn roll_up(
    build: &TreeBuild,
    snapshots: &[ProgressSnapshot],
    as_of: NaiveDate,
) -> Result<RollUp, EngineError> {
    validate_snapshots(snapshots)?;
    Ok(compute(build, snapshots, Some(as_of)))
}

/// Roll progress up over the whole snapshot history (no date filter).
///
/// # Errors
///
/// Same as [`roll_up`].
pub fn roll_up_full_history(
    build: &TreeBuild,
    snapshots: &[ProgressSnapshot],
) -> Result<RollUp, EngineError> {
    validate_snapshots(snapshots)?;
    Ok(compute(build, snapshots, None))
}

pub(crate) fn validate_snapshots(snapshots: &[ProgressSnapshot]) -> Result<(), EngineError> {
    for snapshot in snapshots {
        snapshot.validate()?;
    }
    Ok(())
}

/// Roll-up over pre-validated snapshots.
pub(crate) fn compute(
    build: &TreeBuild,
    snapshots: &[ProgressSnapshot],
    as_of: Option<NaiveDate>,
) -> RollUp {
    let tree = &build.tree;
    let reports = latest_reports(build, snapshots, as_of);

    let mut progress = vec![NodeProgress::default(); tree.len()];
    for slot in tree.post_order() {
        let entry = tree.at(slot);
        let value = if entry.children.is_empty() {
            reports
                .get(entry.node.id.as_str())
                .map_or_else(NodeProgress::default, |report| NodeProgress {
                    physical: report.physical.get(),
                    planned: report.planned.get(),
                    manhours: report.manhours.get(),
                })
        } else {
            weighted(entry.children.iter().map(|&child| {
                (tree.at(child).node.weightage, progress[child])
            }))
        };
        progress[slot] = value;
    }

    let project = match tree.root_slots() {
        [] => NodeProgress::default(),
        [single] => progress[*single],
        roots => weighted(
            roots
                .iter()
                .map(|&root| (tree.at(root).node.weightage, progress[root])),
        ),
    };

    let nodes = (0..tree.len())
        .map(|slot| (tree.at(slot).node.id.clone(), progress[slot]))
        .collect();

    tracing::debug!(
        as_of = ?as_of,
        nodes = tree.len(),
        physical = project.physical,
        planned = project.planned,
        "rollup: computed"
    );

    RollUp {
        as_of,
        nodes,
        project,
        warnings: build.warnings.clone(),
    }
}

/// `sum(progress * weightage) / 100`; manhours are summed unweighted.
fn weighted(children: impl Iterator<Item = (f64, NodeProgress)>) -> NodeProgress {
    let mut total = NodeProgress::default();
    for (weightage, child) in children {
        total.physical += child.physical * weightage;
        total.planned += child.planned * weightage;
        total.manhours += child.manhours;
    }
    total.physical /= 100.0;
    total.planned /= 100.0;
    total
}

fn latest_reports<'a>(
    build: &TreeBuild,
    snapshots: &'a [ProgressSnapshot],
    as_of: Option<NaiveDate>,
) -> HashMap<&'a str, LeafReport> {
    let tree = &build.tree;
    let mut reports: HashMap<&str, LeafReport> = HashMap::new();
    let mut ignored = 0usize;

    for snapshot in snapshots {
        if as_of.is_some_and(|limit| snapshot.report_date > limit) {
            continue;
        }
        let is_leaf = tree
            .slot(&snapshot.wbs_id)
            .is_some_and(|slot| tree.at(slot).children.is_empty());
        if !is_leaf {
            ignored += 1;
            continue;
        }
        let report = reports.entry(snapshot.wbs_id.as_str()).or_default();
        report.physical.offer(snapshot.report_date, snapshot.physical_progress);
        report.planned.offer(snapshot.report_date, snapshot.planned_progress);
        report.manhours.offer(snapshot.report_date, snapshot.manhours);
    }

    if ignored > 0 {
        tracing::debug!(
            ignored,
            "rollup: snapshots on unknown or internal nodes were skipped"
        );
    }
    reports
}

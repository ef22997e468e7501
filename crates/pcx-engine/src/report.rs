//! One-call project report over a consistent bundle of records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pcx_config::PcxConfig;
use pcx_core::entities::{ProjectBundle, WbsNode};
use serde::{Deserialize, Serialize};

use crate::cost::{self, CostSummary, CostTotals};
use crate::error::{EngineError, WeightageWarning};
use crate::evm::{self, ProjectEvm, WbsEvm};
use crate::risk::{self, RiskMatrix};
use crate::rollup::{self, RollUp};
use crate::scurve::{self, SCurve};
use crate::variance::{self, VarianceReport};
use crate::wbs::{LevelMismatch, TreeBuild, WbsTree};

/// How many risks the report lists individually.
const TOP_RISKS: usize = 10;

/// A component that could not run for this project while the rest of the
/// report is still valid (e.g. no budget means no earned value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedComponent {
    pub component: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project_id: String,
    pub currency: String,
    pub as_of: NaiveDate,
    pub rollup: RollUp,
    pub costs: CostSummary,
    pub wbs_costs: BTreeMap<String, CostTotals>,
    pub evm: Option<ProjectEvm>,
    pub wbs_evm: Vec<WbsEvm>,
    pub s_curve: Option<SCurve>,
    pub variance: Option<VarianceReport>,
    pub risks: RiskMatrix,
    pub warnings: Vec<WeightageWarning>,
    pub level_mismatches: Vec<LevelMismatch>,
    pub skipped: Vec<SkippedComponent>,
}

/// Entry point that applies one configuration to every computation.
#[derive(Debug, Clone, Default)]
pub struct ProjectEngine {
    config: PcxConfig,
}

impl ProjectEngine {
    #[must_use]
    pub const fn new(config: PcxConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PcxConfig {
        &self.config
    }

    /// Build the WBS tree with the configured weightage tolerance.
    ///
    /// # Errors
    ///
    /// See [`WbsTree::build`].
    pub fn build_tree(&self, nodes: Vec<WbsNode>) -> Result<TreeBuild, EngineError> {
        WbsTree::build(nodes, self.config.wbs.weightage_tolerance)
    }

    /// Run every component for one project as of `as_of`.
    ///
    /// Structural problems in the WBS and invalid records abort the report.
    /// A missing budget or an unresolvable active baseline only skips the
    /// components that depend on them; the reason is kept in `skipped`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Structural`], [`EngineError::Cycle`], or
    /// [`EngineError::InvalidInput`] from the underlying components.
    pub fn report(
        &self,
        bundle: &ProjectBundle,
        as_of: NaiveDate,
    ) -> Result<ProjectReport, EngineError> {
        let project = &bundle.project;
        let _span = tracing::debug_span!("report", project = %project.id, %as_of).entered();

        let build = self.build_tree(bundle.wbs_nodes.clone())?;
        let rollup = rollup::roll_up(&build, &bundle.progress, as_of)?;
        let costs = cost::summarize(&bundle.cost_codes, &bundle.cost_transactions, Some(as_of))?;
        let wbs_costs = cost::roll_up_costs(&build, &costs);
        let mut skipped = Vec::new();

        let currency = evm::project_currency(project, &self.config.general.currency);
        let evm = match evm::compute_project_evm(
            project,
            &rollup,
            &costs.totals,
            &self.config.general.currency,
        ) {
            Ok(metrics) => Some(metrics),
            Err(EngineError::Configuration(reason)) => {
                tracing::warn!(project = %project.id, %reason, "report: earned value skipped");
                skipped.push(SkippedComponent {
                    component: "evm".into(),
                    reason,
                });
                None
            }
            Err(other) => return Err(other),
        };
        let wbs_evm = evm::compute_wbs_evm(&build, &rollup, &wbs_costs)?;

        let progress_to_date: Vec<_> = bundle
            .progress
            .iter()
            .filter(|snapshot| snapshot.report_date <= as_of)
            .cloned()
            .collect();
        let s_curve_result = if self.config.general.parallel_s_curve {
            scurve::build_s_curve(&build, &progress_to_date, project.total_budget)
        } else {
            scurve::build_s_curve_sequential(&build, &progress_to_date, project.total_budget)
        };
        let s_curve = match s_curve_result {
            Ok(curve) => Some(curve),
            Err(EngineError::Configuration(reason)) => {
                skipped.push(SkippedComponent {
                    component: "s_curve".into(),
                    reason,
                });
                None
            }
            Err(other) => return Err(other),
        };

        let variance = match variance::select_active_baseline(project, &bundle.baselines) {
            Ok(Some(baseline)) => Some(variance::classify(
                &baseline.tasks,
                &bundle.schedule_tasks,
                &self.config.variance,
            )?),
            Ok(None) => None,
            Err(EngineError::Structural { reason, .. }) => {
                tracing::warn!(project = %project.id, %reason, "report: baseline variance skipped");
                skipped.push(SkippedComponent {
                    component: "variance".into(),
                    reason,
                });
                None
            }
            Err(other) => return Err(other),
        };

        let risks = risk::build_matrix(&bundle.risks, TOP_RISKS)?;

        Ok(ProjectReport {
            project_id: project.id.clone(),
            currency,
            as_of,
            warnings: build.warnings.clone(),
            level_mismatches: build.tree.level_mismatches(),
            rollup,
            costs,
            wbs_costs,
            evm,
            wbs_evm,
            s_curve,
            variance,
            risks,
            skipped,
        })
    }
}

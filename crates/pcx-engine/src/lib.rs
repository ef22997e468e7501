//! # pcx-engine
//!
//! Pure computations over project-control records:
//!
//! - [`wbs`]: assemble and validate the WBS forest
//! - [`rollup`]: weighted physical/planned progress roll-up
//! - [`cost`]: cost ledger summaries by code, category, and WBS node
//! - [`evm`]: earned-value indices and forecasts
//! - [`scurve`]: cumulative PV/EV series over report dates
//! - [`variance`]: baseline versus live schedule classification
//! - [`risk`]: risk scores and the 5x5 matrix
//! - [`report`]: all of the above for one project in a single call
//!
//! Nothing here performs I/O or holds state between calls, so any function
//! can run concurrently for different projects or as-of dates. Structural
//! failures come back as [`EngineError`]; weightage inconsistencies come back
//! as [`WeightageWarning`]s next to a successful result.

pub mod cost;
pub mod error;
pub mod evm;
pub mod report;
pub mod risk;
pub mod rollup;
pub mod scurve;
pub mod variance;
pub mod wbs;

pub use cost::{CostSummary, CostTotals, roll_up_costs, summarize};
pub use error::{EngineError, WeightageWarning};
pub use evm::{
    EvmMetrics, ProjectEvm, WbsEvm, compute_evm, compute_project_evm, compute_wbs_evm,
    project_currency,
};
pub use report::{ProjectEngine, ProjectReport, SkippedComponent};
pub use risk::{RiskMatrix, build_matrix, rescore, risk_score};
pub use rollup::{NodeProgress, RollUp, roll_up, roll_up_full_history};
pub use scurve::{SCurve, SCurvePoint, build_s_curve};
pub use variance::{VarianceReport, classify, select_active_baseline};
pub use wbs::{TreeBuild, WbsTree};

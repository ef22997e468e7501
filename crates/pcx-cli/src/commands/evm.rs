use anyhow::Context;
use chrono::NaiveDate;
use pcx_core::entities::ProjectBundle;
use pcx_core::enums::{CostStatus, ScheduleStatus};
use pcx_engine::{EvmMetrics, ProjectEvm, WbsEvm, WeightageWarning};
use serde::Serialize;

use crate::cli::{BundleArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output_with_rows;

#[derive(Debug, Serialize)]
struct EvmResponse {
    project: ProjectEvm,
    wbs: Vec<WbsEvm>,
    warnings: Vec<WeightageWarning>,
}

#[derive(Debug, Serialize)]
struct EvmRow {
    scope: String,
    bac: f64,
    pv: f64,
    ev: f64,
    ac: f64,
    cpi: f64,
    spi: f64,
    eac: f64,
    cost_status: CostStatus,
    schedule_status: ScheduleStatus,
}

impl EvmRow {
    fn new(scope: &str, m: &EvmMetrics) -> Self {
        Self {
            scope: scope.to_string(),
            bac: m.bac,
            pv: m.pv,
            ev: m.ev,
            ac: m.ac,
            cpi: m.cpi,
            spi: m.spi,
            eac: m.eac,
            cost_status: m.cost_status,
            schedule_status: m.schedule_status,
        }
    }
}

/// Handle `pcx evm`.
pub fn handle(args: &BundleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (bundle, as_of) = ctx.load(args)?;
    let response = evaluate(bundle, as_of, ctx)?;

    let mut rows = vec![EvmRow::new("project", &response.project.metrics)];
    rows.extend(response.wbs.iter().map(|w| EvmRow::new(&w.code, &w.metrics)));

    output_with_rows(&response, &rows, &response.warnings, flags.format)
}

fn evaluate(
    bundle: ProjectBundle,
    as_of: NaiveDate,
    ctx: &AppContext,
) -> anyhow::Result<EvmResponse> {
    let build = ctx.engine.build_tree(bundle.wbs_nodes)?;
    let rollup = pcx_engine::roll_up(&build, &bundle.progress, as_of)?;
    let costs = pcx_engine::summarize(&bundle.cost_codes, &bundle.cost_transactions, Some(as_of))?;
    let wbs_costs = pcx_engine::roll_up_costs(&build, &costs);

    let project = pcx_engine::compute_project_evm(
        &bundle.project,
        &rollup,
        &costs.totals,
        &ctx.config().general.currency,
    )
    .context("earned value needs a project budget")?;
    let wbs = pcx_engine::compute_wbs_evm(&build, &rollup, &wbs_costs)?;

    Ok(EvmResponse {
        project,
        wbs,
        warnings: rollup.warnings,
    })
}

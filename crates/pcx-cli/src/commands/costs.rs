use std::collections::BTreeMap;

use chrono::NaiveDate;
use pcx_core::entities::ProjectBundle;
use pcx_engine::{CostSummary, CostTotals, WeightageWarning};
use serde::Serialize;

use crate::cli::{BundleArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output_with_rows;

#[derive(Debug, Serialize)]
struct CostsResponse {
    summary: CostSummary,
    /// Linked costs rolled up the WBS, each node including its descendants.
    wbs: BTreeMap<String, CostTotals>,
    warnings: Vec<WeightageWarning>,
}

#[derive(Debug, Serialize)]
struct CategoryRow {
    category: String,
    budget: f64,
    actual: f64,
    commitment: f64,
    forecast: f64,
    variance: f64,
    variance_percent: f64,
}

impl CategoryRow {
    fn new(category: &str, totals: &CostTotals) -> Self {
        Self {
            category: category.to_string(),
            budget: totals.budget,
            actual: totals.actual,
            commitment: totals.commitment,
            forecast: totals.forecast,
            variance: totals.variance,
            variance_percent: totals.variance_percent,
        }
    }
}

/// Handle `pcx costs`.
pub fn handle(args: &BundleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (bundle, as_of) = ctx.load(args)?;
    let response = evaluate(bundle, as_of, ctx)?;

    let mut rows: Vec<CategoryRow> = response
        .summary
        .by_category
        .iter()
        .map(|(category, totals)| CategoryRow::new(category, totals))
        .collect();
    rows.push(CategoryRow::new("total", &response.summary.totals));

    output_with_rows(&response, &rows, &response.warnings, flags.format)
}

fn evaluate(
    bundle: ProjectBundle,
    as_of: NaiveDate,
    ctx: &AppContext,
) -> anyhow::Result<CostsResponse> {
    let build = ctx.engine.build_tree(bundle.wbs_nodes)?;
    let summary =
        pcx_engine::summarize(&bundle.cost_codes, &bundle.cost_transactions, Some(as_of))?;
    let wbs = pcx_engine::roll_up_costs(&build, &summary);

    Ok(CostsResponse {
        summary,
        wbs,
        warnings: build.warnings,
    })
}

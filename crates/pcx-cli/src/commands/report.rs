use pcx_core::enums::RiskBucket;
use pcx_engine::ProjectReport;
use serde::Serialize;

use crate::cli::{BundleArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output_with_rows;

#[derive(Debug, Serialize)]
struct SummaryRow {
    metric: &'static str,
    value: String,
}

fn row(metric: &'static str, value: impl ToString) -> SummaryRow {
    SummaryRow {
        metric,
        value: value.to_string(),
    }
}

fn summary_rows(report: &ProjectReport) -> Vec<SummaryRow> {
    let mut rows = vec![
        row("project", &report.project_id),
        row("as_of", report.as_of),
        row("physical_progress", format!("{:.2}", report.rollup.project.physical)),
        row("planned_progress", format!("{:.2}", report.rollup.project.planned)),
        row(
            "actual_cost",
            format!("{:.2} {}", report.costs.totals.actual, report.currency),
        ),
    ];
    if let Some(evm) = &report.evm {
        rows.push(row("cpi", format!("{:.3}", evm.metrics.cpi)));
        rows.push(row("spi", format!("{:.3}", evm.metrics.spi)));
        rows.push(row("cost_status", evm.metrics.cost_status.as_str()));
        rows.push(row("schedule_status", evm.metrics.schedule_status.as_str()));
    }
    if let Some(variance) = &report.variance {
        rows.push(row("delayed_tasks", variance.summary.delayed_count));
        rows.push(row("deleted_tasks", variance.summary.deleted));
    }
    rows.push(row(
        "extreme_risks",
        report
            .risks
            .buckets
            .get(&RiskBucket::Extreme)
            .copied()
            .unwrap_or_default(),
    ));
    rows.push(row("weightage_warnings", report.warnings.len()));
    for skipped in &report.skipped {
        rows.push(row("skipped", format!("{}: {}", skipped.component, skipped.reason)));
    }
    rows
}

/// Handle `pcx report`.
pub fn handle(args: &BundleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (bundle, as_of) = ctx.load(args)?;
    let report = ctx.engine.report(&bundle, as_of)?;
    output_with_rows(&report, &summary_rows(&report), &report.warnings, flags.format)
}

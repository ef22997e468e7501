use anyhow::Context;

use crate::cli::{BundleArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output_with_rows;

/// Handle `pcx variance`.
pub fn handle(args: &BundleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (bundle, _) = ctx.load(args)?;
    let baseline = pcx_engine::select_active_baseline(&bundle.project, &bundle.baselines)?
        .with_context(|| format!("project {} has no active baseline", bundle.project.id))?;
    tracing::debug!(baseline = %baseline.id, name = %baseline.name, "variance: using active baseline");

    let report = pcx_engine::classify(
        &baseline.tasks,
        &bundle.schedule_tasks,
        &ctx.config().variance,
    )?;

    output_with_rows(&report, &report.per_task, &[], flags.format)
}

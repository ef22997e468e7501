use crate::cli::{BundleArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output_with_rows;

/// Handle `pcx s-curve`. Snapshots after the as-of date are left out.
pub fn handle(args: &BundleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (mut bundle, as_of) = ctx.load(args)?;
    bundle.progress.retain(|snapshot| snapshot.report_date <= as_of);
    let build = ctx.engine.build_tree(bundle.wbs_nodes)?;

    let budget = bundle.project.total_budget;
    let curve = if ctx.config().general.parallel_s_curve {
        pcx_engine::build_s_curve(&build, &bundle.progress, budget)?
    } else {
        pcx_engine::scurve::build_s_curve_sequential(&build, &bundle.progress, budget)?
    };

    output_with_rows(&curve, &curve.points, &build.warnings, flags.format)
}

use crate::cli::{GlobalFlags, RiskArgs};
use crate::context::AppContext;
use crate::output::output_with_rows;

/// Handle `pcx risk`.
pub fn handle(args: &RiskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (bundle, _) = ctx.load(&args.bundle)?;
    let matrix = pcx_engine::build_matrix(&bundle.risks, args.top)?;
    output_with_rows(&matrix, &matrix.top_risks, &[], flags.format)
}

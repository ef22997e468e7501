use serde::Serialize;

use crate::cli::{BundleArgs, GlobalFlags};
use crate::context::AppContext;
use crate::output::output_with_rows;

#[derive(Debug, Serialize)]
struct RollupRow {
    wbs_id: String,
    code: String,
    depth: u32,
    weightage: f64,
    physical: f64,
    planned: f64,
    manhours: f64,
}

/// Handle `pcx rollup`.
pub fn handle(args: &BundleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (bundle, as_of) = ctx.load(args)?;
    let build = ctx.engine.build_tree(bundle.wbs_nodes)?;
    let rollup = pcx_engine::roll_up(&build, &bundle.progress, as_of)?;

    let rows: Vec<RollupRow> = build
        .tree
        .pre_order()
        .into_iter()
        .map(|slot| {
            let entry = build.tree.at(slot);
            let progress = rollup.node(&entry.node.id).unwrap_or_default();
            RollupRow {
                wbs_id: entry.node.id.clone(),
                code: entry.node.code.clone(),
                depth: entry.depth,
                weightage: entry.node.weightage,
                physical: progress.physical,
                planned: progress.planned,
                manhours: progress.manhours,
            }
        })
        .collect();

    output_with_rows(&rollup, &rows, &rollup.warnings, flags.format)
}

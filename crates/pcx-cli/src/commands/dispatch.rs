use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Report(args) => commands::report::handle(&args, ctx, flags),
        Commands::Rollup(args) => commands::rollup::handle(&args, ctx, flags),
        Commands::Costs(args) => commands::costs::handle(&args, ctx, flags),
        Commands::Evm(args) => commands::evm::handle(&args, ctx, flags),
        Commands::SCurve(args) => commands::scurve::handle(&args, ctx, flags),
        Commands::Variance(args) => commands::variance::handle(&args, ctx, flags),
        Commands::Risk(args) => commands::risk::handle(&args, ctx, flags),
        Commands::Config { action } => commands::config::handle(&action, ctx, flags),
        Commands::Schema { .. } => {
            unreachable!("schema is pre-dispatched in main")
        }
    }
}

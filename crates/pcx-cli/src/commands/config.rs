use crate::cli::{ConfigCommands, GlobalFlags};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pcx config`.
pub fn handle(action: &ConfigCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show { toml: true } => {
            println!("{}", toml::to_string_pretty(ctx.config())?);
            Ok(())
        }
        ConfigCommands::Show { toml: false } => output(ctx.config(), flags.format),
    }
}

use anyhow::Context;
use pcx_schema::SchemaRegistry;
use serde_json::json;

use crate::bootstrap;
use crate::cli::{GlobalFlags, SchemaCommands};
use crate::output::output;

/// Handle `pcx schema`.
pub fn handle(action: &SchemaCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    match action {
        SchemaCommands::List => output(&registry.list(), flags.format),
        SchemaCommands::Get { name } => {
            let schema = registry
                .get(name)
                .with_context(|| format!("unknown schema '{name}'; see `pcx schema list`"))?;
            output(schema, flags.format)
        }
        SchemaCommands::Check { name, file } => {
            let value = bootstrap::read_json(file)?;
            registry
                .validate(name, &value)
                .with_context(|| format!("{} does not match schema '{name}'", file.display()))?;
            output(&json!({ "schema": name, "valid": true }), flags.format)
        }
    }
}

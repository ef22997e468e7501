use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::{BundleArgs, Commands, ConfigCommands, RiskArgs, SchemaCommands};

/// Top-level CLI parser for the `pcx` binary.
#[derive(Debug, Parser)]
#[command(name = "pcx", version, about = "PCX - project control metrics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Table colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the global and project config files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
            quiet: self.quiet,
            config: self.config.clone(),
        }
    }
}

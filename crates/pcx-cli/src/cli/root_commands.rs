use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Every metric for one project in a single report.
    Report(BundleArgs),
    /// Weighted progress roll-up over the WBS.
    Rollup(BundleArgs),
    /// Cost ledger totals by code, category, and WBS node.
    Costs(BundleArgs),
    /// Earned-value metrics for the project and each budgeted WBS node.
    Evm(BundleArgs),
    /// Cumulative planned/earned value series.
    #[command(name = "s-curve")]
    SCurve(BundleArgs),
    /// Active baseline against the live schedule.
    Variance(BundleArgs),
    /// Risk scores and the probability/impact matrix.
    Risk(RiskArgs),
    /// Inspect input record schemas.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
    /// Inspect the effective configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// A project bundle and the date to evaluate it at.
#[derive(Clone, Debug, Args)]
pub struct BundleArgs {
    /// Project bundle JSON file, or `-` for stdin
    pub bundle: PathBuf,

    /// Evaluate as of this date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Clone, Debug, Args)]
pub struct RiskArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// How many of the highest-scored risks to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// List registered schema names.
    List,
    /// Print one schema.
    Get {
        /// Schema name, e.g. `wbs_node` or `project_bundle`
        name: String,
    },
    /// Check a JSON file against a schema without running anything.
    Check {
        /// Schema name
        name: String,
        /// JSON file, or `-` for stdin
        file: PathBuf,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration.
    Show {
        /// Print as TOML, ready to paste into a config file
        #[arg(long)]
        toml: bool,
    },
}

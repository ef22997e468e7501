//! Command output: pretty JSON, single-line JSON, or an aligned table.
//!
//! In table mode a command prints its row view, followed by one `warning:`
//! line per weightage warning. JSON modes print the full response, which
//! carries the same warnings as a field.

use std::io::IsTerminal;
use std::sync::OnceLock;

use pcx_engine::WeightageWarning;
use serde::Serialize;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

pub mod table;

static TABLE_COLOR: OnceLock<bool> = OnceLock::new();

/// Decide once, from the global flags, whether table status cells are coloured.
pub fn init(flags: &GlobalFlags) {
    let color = flags.format == OutputFormat::Table
        && match flags.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::io::stdout().is_terminal()
                    && !flags.quiet
                    && std::env::var_os("NO_COLOR").is_none()
            }
        };
    let _ = TABLE_COLOR.set(color);
}

fn table_color() -> bool {
    TABLE_COLOR.get().copied().unwrap_or(false)
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(table::render(&serde_json::to_value(value)?, table_color())),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Render `rows` plus the warning lines in table mode, and the full `value`
/// otherwise.
pub fn render_with_rows<T: Serialize, R: Serialize>(
    value: &T,
    rows: &[R],
    warnings: &[WeightageWarning],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let mut lines = vec![render(&rows, format)?];
            lines.extend(table::warning_lines(warnings, table_color()));
            Ok(lines.join("\n"))
        }
        OutputFormat::Json | OutputFormat::Raw => render(value, format),
    }
}

/// Print the output of [`render_with_rows`].
pub fn output_with_rows<T: Serialize, R: Serialize>(
    value: &T,
    rows: &[R],
    warnings: &[WeightageWarning],
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("{}", render_with_rows(value, rows, warnings, format)?);
    Ok(())
}

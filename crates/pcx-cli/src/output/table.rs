//! Aligned plain-text tables for PCX row views.
//!
//! A column's format follows its name: money columns get thousands
//! separators, progress and percent columns a `%` suffix, EVM indices three
//! decimals, and schedule variances a signed day count. Status and bucket
//! columns are coloured when colour is on.

use pcx_engine::WeightageWarning;
use serde_json::{Map, Value};

/// Columns pinned to the left, in this order; the rest follow by name.
const LEADING: [&str; 8] = [
    "scope", "metric", "wbs_id", "code", "task_id", "id", "date", "category",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Money,
    Percent,
    Index,
    Days,
    Status,
    Text,
}

impl ColumnKind {
    fn of(name: &str) -> Self {
        match name {
            "bac" | "pv" | "ev" | "ac" | "cv" | "sv" | "eac" | "etc" | "vac" | "budget"
            | "actual" | "commitment" | "forecast" | "variance" | "planned_value"
            | "earned_value" | "amount" => Self::Money,
            "cpi" | "spi" | "tcpi" => Self::Index,
            "weightage" | "physical" | "planned" | "progress" => Self::Percent,
            "status" | "bucket" => Self::Status,
            _ if name.ends_with("_percent") || name.ends_with("_progress") => Self::Percent,
            _ if name.ends_with("_variance") => Self::Days,
            _ if name.ends_with("_status") => Self::Status,
            _ => Self::Text,
        }
    }

    const fn right_aligned(self) -> bool {
        matches!(self, Self::Money | Self::Percent | Self::Index | Self::Days)
    }

    fn cell(self, value: &Value) -> String {
        let Value::Number(number) = value else {
            return plain(value);
        };
        match (self, number.as_f64()) {
            (Self::Money, Some(amount)) => money(amount),
            (Self::Percent, Some(share)) => format!("{share:.1}%"),
            (Self::Index, Some(index)) => format!("{index:.3}"),
            (Self::Days, _) => number
                .as_i64()
                .map_or_else(|| number.to_string(), |days| format!("{days:+}d")),
            _ => plain(value),
        }
    }
}

/// Render a JSON value as a table. Arrays of objects become one row per
/// object; a lone object becomes key/value rows.
#[must_use]
pub fn render(value: &Value, color: bool) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) => {
            let records: Vec<&Map<String, Value>> =
                items.iter().filter_map(Value::as_object).collect();
            if records.len() == items.len() {
                render_records(&records, color)
            } else {
                let rows = items.iter().map(|item| vec![plain(item)]).collect();
                layout(&[("value", ColumnKind::Text)], rows, color)
            }
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), ColumnKind::of(key).cell(value)])
                .collect();
            layout(
                &[("key", ColumnKind::Text), ("value", ColumnKind::Text)],
                rows,
                color,
            )
        }
        scalar => plain(scalar),
    }
}

/// One `warning:` line per weightage warning, for printing under a table.
#[must_use]
pub fn warning_lines(warnings: &[WeightageWarning], color: bool) -> Vec<String> {
    warnings
        .iter()
        .map(|warning| {
            let label = paint("warning:", Some("33"), color);
            format!("{label} {warning}")
        })
        .collect()
}

fn render_records(records: &[&Map<String, Value>], color: bool) -> String {
    let mut names: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }
    names.sort_by_key(|name| {
        (
            LEADING.iter().position(|lead| lead == name).unwrap_or(LEADING.len()),
            *name,
        )
    });

    let columns: Vec<(&str, ColumnKind)> =
        names.iter().map(|name| (*name, ColumnKind::of(name))).collect();
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|(name, kind)| {
                    record
                        .get(*name)
                        .map_or_else(|| String::from("-"), |value| kind.cell(value))
                })
                .collect()
        })
        .collect();
    layout(&columns, rows, color)
}

fn layout(columns: &[(&str, ColumnKind)], rows: Vec<Vec<String>>, color: bool) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, (name, _))| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .fold(name.len(), usize::max)
        })
        .collect();

    let header = columns
        .iter()
        .zip(&widths)
        .map(|((name, kind), width)| pad(name, name, *width, kind.right_aligned()))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header.chars().count());

    let mut lines = vec![header.trim_end().to_string(), divider];
    for row in rows {
        let line = columns
            .iter()
            .zip(&widths)
            .zip(row)
            .map(|(((_, kind), width), cell)| {
                let shown = if *kind == ColumnKind::Status {
                    paint(&cell, status_color(&cell), color)
                } else {
                    cell.clone()
                };
                pad(&shown, &cell, *width, kind.right_aligned())
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Pad `shown` to `width` using the length of its uncoloured form `text`.
fn pad(shown: &str, text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    if right {
        format!("{fill}{shown}")
    } else {
        format!("{shown}{fill}")
    }
}

fn paint(text: &str, code: Option<&str>, color: bool) -> String {
    match code {
        Some(code) if color => format!("\u{1b}[{code}m{text}\u{1b}[0m"),
        _ => text.to_string(),
    }
}

fn status_color(status: &str) -> Option<&'static str> {
    match status {
        "ahead" | "on_track" | "under_budget" | "on_schedule" | "closed" | "very_low" | "low" => {
            Some("32")
        }
        "minor_delay" | "mitigating" | "medium" | "high" => Some("33"),
        "major_delay" | "task_deleted" | "over_budget" | "behind_schedule" | "extreme" => {
            Some("31")
        }
        _ => None,
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Number(number) if number.is_f64() => {
            number.as_f64().map_or_else(|| number.to_string(), |v| format!("{v:.2}"))
        }
        other => other.to_string(),
    }
}

/// Two decimals with `,` between thousands.
fn money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

//! Entry types, statuses, and computed labels for PCX.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `as_str()` returns the storage/wire form; `label()` returns the display text
//! shown to project-control users, which is also what `Display` prints.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntryType
// ---------------------------------------------------------------------------

/// Kind of amount recorded by a cost transaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Budget,
    Actual,
    Forecast,
    Commitment,
}

impl EntryType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Actual => "actual",
            Self::Forecast => "forecast",
            Self::Commitment => "commitment",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Actual => "Actual",
            Self::Forecast => "Forecast",
            Self::Commitment => "Commitment",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RiskStatus
// ---------------------------------------------------------------------------

/// Status of a risk register entry. Scoring ignores it; the matrix counts
/// risks per status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Open,
    Mitigating,
    Closed,
}

impl RiskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Mitigating => "mitigating",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Mitigating => "Mitigating",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RiskBucket
// ---------------------------------------------------------------------------

/// Severity band of a risk score (probability × impact).
///
/// Bands are inclusive on their lower edge:
///
/// ```text
///  1..=4   very_low
///  5..=9   low
/// 10..=14  medium
/// 15..=19  high
/// 20..=25  extreme
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    VeryLow,
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskBucket {
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Extreme,
    ];

    /// Map a risk score to its severity band.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=4 => Self::VeryLow,
            5..=9 => Self::Low,
            10..=14 => Self::Medium,
            15..=19 => Self::High,
            _ => Self::Extreme,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// VarianceStatus
// ---------------------------------------------------------------------------

/// Classification of a baseline task against its live counterpart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    Ahead,
    OnTrack,
    MinorDelay,
    MajorDelay,
    TaskDeleted,
}

impl VarianceStatus {
    /// Classify an end-date variance in days.
    ///
    /// `minor_delay_days` is the last delay (inclusive) still counted as minor.
    #[must_use]
    pub const fn from_end_variance(end_variance: i64, minor_delay_days: i64) -> Self {
        if end_variance < 0 {
            Self::Ahead
        } else if end_variance == 0 {
            Self::OnTrack
        } else if end_variance <= minor_delay_days {
            Self::MinorDelay
        } else {
            Self::MajorDelay
        }
    }

    /// Whether the task is at or ahead of its baseline finish.
    #[must_use]
    pub const fn is_on_track(self) -> bool {
        matches!(self, Self::Ahead | Self::OnTrack)
    }

    #[must_use]
    pub const fn is_delayed(self) -> bool {
        matches!(self, Self::MinorDelay | Self::MajorDelay)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ahead => "ahead",
            Self::OnTrack => "on_track",
            Self::MinorDelay => "minor_delay",
            Self::MajorDelay => "major_delay",
            Self::TaskDeleted => "task_deleted",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ahead => "Ahead",
            Self::OnTrack => "On Track",
            Self::MinorDelay => "Minor Delay",
            Self::MajorDelay => "Major Delay",
            Self::TaskDeleted => "Task Deleted",
        }
    }
}

impl fmt::Display for VarianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CostStatus / ScheduleStatus
// ---------------------------------------------------------------------------

/// Cost performance label derived from CPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CostStatus {
    UnderBudget,
    OverBudget,
}

impl CostStatus {
    /// `cpi >= 1.0` is favorable.
    #[must_use]
    pub fn from_cpi(cpi: f64) -> Self {
        if cpi >= 1.0 {
            Self::UnderBudget
        } else {
            Self::OverBudget
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderBudget => "under_budget",
            Self::OverBudget => "over_budget",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderBudget => "Under Budget",
            Self::OverBudget => "Over Budget",
        }
    }
}

impl fmt::Display for CostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Schedule performance label derived from SPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    OnSchedule,
    BehindSchedule,
}

impl ScheduleStatus {
    /// `spi >= 1.0` is favorable.
    #[must_use]
    pub fn from_spi(spi: f64) -> Self {
        if spi >= 1.0 {
            Self::OnSchedule
        } else {
            Self::BehindSchedule
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnSchedule => "on_schedule",
            Self::BehindSchedule => "behind_schedule",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnSchedule => "On Schedule",
            Self::BehindSchedule => "Behind Schedule",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, RiskBucket::VeryLow)]
    #[case(4, RiskBucket::VeryLow)]
    #[case(5, RiskBucket::Low)]
    #[case(9, RiskBucket::Low)]
    #[case(10, RiskBucket::Medium)]
    #[case(14, RiskBucket::Medium)]
    #[case(15, RiskBucket::High)]
    #[case(19, RiskBucket::High)]
    #[case(20, RiskBucket::Extreme)]
    #[case(25, RiskBucket::Extreme)]
    fn risk_bucket_lower_edges_are_inclusive(#[case] score: u8, #[case] expected: RiskBucket) {
        assert_eq!(RiskBucket::from_score(score), expected);
    }

    #[rstest]
    #[case(-3, VarianceStatus::Ahead)]
    #[case(0, VarianceStatus::OnTrack)]
    #[case(1, VarianceStatus::MinorDelay)]
    #[case(5, VarianceStatus::MinorDelay)]
    #[case(6, VarianceStatus::MajorDelay)]
    fn variance_status_thresholds(#[case] days: i64, #[case] expected: VarianceStatus) {
        assert_eq!(VarianceStatus::from_end_variance(days, 5), expected);
    }

    #[test]
    fn variance_labels_match_report_text() {
        assert_eq!(VarianceStatus::TaskDeleted.to_string(), "Task Deleted");
        assert_eq!(VarianceStatus::OnTrack.to_string(), "On Track");
    }

    #[test]
    fn performance_labels_split_at_one() {
        assert_eq!(CostStatus::from_cpi(1.0), CostStatus::UnderBudget);
        assert_eq!(CostStatus::from_cpi(0.99), CostStatus::OverBudget);
        assert_eq!(ScheduleStatus::from_spi(1.0), ScheduleStatus::OnSchedule);
        assert_eq!(ScheduleStatus::from_spi(0.5), ScheduleStatus::BehindSchedule);
    }

    #[test]
    fn entry_type_serializes_snake_case() {
        let json = serde_json::to_string(&EntryType::Commitment).unwrap();
        assert_eq!(json, "\"commitment\"");
    }
}

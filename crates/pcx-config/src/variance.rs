//! Baseline variance classification thresholds.

use serde::{Deserialize, Serialize};

const fn default_minor_delay_days() -> i64 {
    pcx_core::DEFAULT_MINOR_DELAY_DAYS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VarianceConfig {
    /// Largest end-date slip (days, inclusive) still classified as a minor delay.
    #[serde(default = "default_minor_delay_days")]
    pub minor_delay_days: i64,
}

impl Default for VarianceConfig {
    fn default() -> Self {
        Self {
            minor_delay_days: default_minor_delay_days(),
        }
    }
}

//! Work-breakdown validation settings.

use serde::{Deserialize, Serialize};

const fn default_tolerance() -> f64 {
    pcx_core::DEFAULT_WEIGHTAGE_TOLERANCE
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WbsConfig {
    /// Allowed deviation of a sibling group's weightage sum from 100.
    #[serde(default = "default_tolerance")]
    pub weightage_tolerance: f64,
}

impl Default for WbsConfig {
    fn default() -> Self {
        Self {
            weightage_tolerance: default_tolerance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerance_is_one_hundredth() {
        assert!((WbsConfig::default().weightage_tolerance - 0.01).abs() < f64::EPSILON);
    }
}

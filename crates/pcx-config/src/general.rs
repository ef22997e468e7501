//! General engine configuration.

use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "USD".to_string()
}

const fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Currency reported when a project record does not carry one.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Evaluate S-curve dates on the rayon pool instead of sequentially.
    #[serde(default = "default_parallel")]
    pub parallel_s_curve: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            parallel_s_curve: default_parallel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.currency, "USD");
        assert!(config.parallel_s_curve);
    }
}

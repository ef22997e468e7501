use chrono::NaiveDate;
use pcx_config::PcxConfig;
use pcx_core::entities::ProjectBundle;
use pcx_engine::ProjectEngine;
use pcx_schema::SchemaRegistry;

use crate::bootstrap;
use crate::cli::BundleArgs;

/// Everything a bundle command needs: the engine (with its config) and the
/// schema registry used to check input.
pub struct AppContext {
    pub engine: ProjectEngine,
    pub registry: SchemaRegistry,
}

impl AppContext {
    #[must_use]
    pub fn new(config: PcxConfig) -> Self {
        Self {
            engine: ProjectEngine::new(config),
            registry: SchemaRegistry::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PcxConfig {
        self.engine.config()
    }

    /// Read the bundle named by `args` and resolve the as-of date.
    pub fn load(&self, args: &BundleArgs) -> anyhow::Result<(ProjectBundle, NaiveDate)> {
        let bundle = bootstrap::load_bundle(&args.bundle, &self.registry)?;
        let as_of = args
            .as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        Ok((bundle, as_of))
    }
}

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pcx_config::PcxConfig;
use pcx_core::entities::ProjectBundle;
use pcx_schema::SchemaRegistry;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then the layered config (or the
/// file named by `--config`).
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PcxConfig> {
    load_dotenv()?;
    let config = match &flags.config {
        Some(path) => PcxConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PcxConfig::load().context("failed to load pcx configuration")?,
    };
    tracing::debug!(?config, "bootstrap: configuration loaded");
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Read and validate a project bundle.
pub fn load_bundle(path: &Path, registry: &SchemaRegistry) -> anyhow::Result<ProjectBundle> {
    let value = read_json(path)?;
    let bundle = pcx_schema::decode_bundle(registry, value)
        .with_context(|| format!("invalid project bundle {}", path.display()))?;
    tracing::debug!(
        project = %bundle.project.id,
        wbs_nodes = bundle.wbs_nodes.len(),
        snapshots = bundle.progress.len(),
        transactions = bundle.cost_transactions.len(),
        "bootstrap: bundle loaded"
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_valid_bundle_from_file() {
        let file = write_temp(
            r#"{
                "project": { "id": "P-1", "name": "Depot", "total_budget": 100.0, "currency": "USD" },
                "wbs_nodes": [ { "id": "r", "code": "1", "weightage": 100.0 } ]
            }"#,
        );
        let bundle = load_bundle(file.path(), &SchemaRegistry::new()).expect("bundle loads");
        assert_eq!(bundle.project.id, "P-1");
        assert_eq!(bundle.wbs_nodes.len(), 1);
    }

    #[test]
    fn rejects_bundle_with_unknown_field() {
        let file = write_temp(
            r#"{
                "project": { "id": "P-1", "name": "Depot", "total_budget": 100.0, "currency": "USD", "owner": "x" }
            }"#,
        );
        let err = load_bundle(file.path(), &SchemaRegistry::new()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid project bundle"));
    }

    #[test]
    fn rejects_malformed_json() {
        let file = write_temp("{ not json");
        let err = read_json(file.path()).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_json(Path::new("/nonexistent/bundle.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bundle.json"));
    }
}

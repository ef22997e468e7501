//! Central schema registry for all PCX input records.
//!
//! The `SchemaRegistry` builds JSON Schemas from pcx-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use pcx_core::entities::{
    BaselineTask, CostCode, CostTransaction, ProgressSnapshot, Project, ProjectBundle, Risk,
    ScheduleBaseline, ScheduleTask, WbsNode,
};
use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas PCX accepts as input.
///
/// Provides lookup by name and validation of arbitrary JSON values against
/// registered schemas.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing every record schema plus the
    /// whole-project bundle.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Records (9) ---
        register!(schemas, "project", Project);
        register!(schemas, "wbs_node", WbsNode);
        register!(schemas, "progress_snapshot", ProgressSnapshot);
        register!(schemas, "cost_code", CostCode);
        register!(schemas, "cost_transaction", CostTransaction);
        register!(schemas, "schedule_task", ScheduleTask);
        register!(schemas, "baseline_task", BaselineTask);
        register!(schemas, "schedule_baseline", ScheduleBaseline);
        register!(schemas, "risk", Risk);

        // --- Bundle (1) ---
        register!(schemas, "project_bundle", ProjectBundle);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let validator = self.validator(name)?;
        let errors = collect_errors(&validator, instance, "");
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Compile the named schema once for repeated validation.
    pub(crate) fn validator(&self, name: &str) -> Result<jsonschema::Validator, SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;
        jsonschema::validator_for(schema).map_err(|e| SchemaError::Generation(format!("{e}")))
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator messages, each prefixed with `prefix` and the instance path.
pub(crate) fn collect_errors(
    validator: &jsonschema::Validator,
    instance: &serde_json::Value,
    prefix: &str,
) -> Vec<String> {
    validator
        .iter_errors(instance)
        .map(|e| format!("{prefix}{}: {e}", e.instance_path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcx_core::enums::RiskStatus;
    use pretty_assertions::assert_eq;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        // 9 records + 1 bundle
        assert_eq!(registry().schema_count(), 10);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(registry().get("finding").is_none());
    }

    #[test]
    fn validate_valid_risk() {
        let risk = Risk {
            id: "R-1".into(),
            title: "Crane availability".into(),
            probability: 3,
            impact: 4,
            risk_score: 12,
            status: RiskStatus::Mitigating,
        };
        let json = serde_json::to_value(&risk).unwrap();
        assert!(registry().validate("risk", &json).is_ok());
    }

    #[test]
    fn validate_rejects_missing_required_field() {
        let invalid = serde_json::json!({
            "id": "1.2",
            // "code" is missing
            "weightage": 40.0
        });
        let result = registry().validate("wbs_node", &invalid);
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert!(!errors.is_empty());
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn validate_rejects_unknown_field() {
        let invalid = serde_json::json!({
            "id": "1.2",
            "code": "1.2",
            "weightage": 40.0,
            "weight": 40.0
        });
        assert!(registry().validate("wbs_node", &invalid).is_err());
    }

    #[test]
    fn validate_rejects_invalid_enum() {
        let invalid = serde_json::json!({
            "cost_code_id": "C1",
            "entry_type": "accrual",
            "amount": 10.0,
            "entry_date": "2024-01-01"
        });
        assert!(registry().validate("cost_transaction", &invalid).is_err());
    }

    #[test]
    fn errors_carry_instance_path() {
        let invalid = serde_json::json!({
            "project": { "id": "P", "name": "P", "total_budget": 1.0, "currency": "USD" },
            "risks": [{ "id": "R", "title": "t", "probability": "high", "impact": 2, "status": "open" }]
        });
        let Err(SchemaError::ValidationFailed { errors }) =
            registry().validate("project_bundle", &invalid)
        else {
            panic!("Expected ValidationFailed");
        };
        assert!(
            errors.iter().any(|e| e.starts_with("/risks/0/probability")),
            "{errors:?}"
        );
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = registry().validate("bogus", &serde_json::json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }

    #[test]
    fn all_expected_schemas_present() {
        let expected = [
            "project",
            "wbs_node",
            "progress_snapshot",
            "cost_code",
            "cost_transaction",
            "schedule_task",
            "baseline_task",
            "schedule_baseline",
            "risk",
            "project_bundle",
        ];
        let reg = registry();
        for name in &expected {
            assert!(reg.get(name).is_some(), "Missing expected schema: {name}");
        }
    }
}

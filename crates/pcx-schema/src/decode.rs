//! Validated decoding: schema check, typed deserialization, then the
//! record's own range checks.

use pcx_core::entities::{ProjectBundle, Validate};
use serde::de::DeserializeOwned;

use crate::error::SchemaError;
use crate::registry::{SchemaRegistry, collect_errors};

/// Decode one record after checking it against the schema `name`.
///
/// # Errors
///
/// `SchemaError::NotFound`, `SchemaError::ValidationFailed`,
/// `SchemaError::Decode`, or `SchemaError::Record` when a value is out of
/// range.
pub fn decode<T: DeserializeOwned + Validate>(
    registry: &SchemaRegistry,
    name: &str,
    value: serde_json::Value,
) -> Result<T, SchemaError> {
    registry.validate(name, &value)?;
    let record: T = serde_json::from_value(value)?;
    record.validate()?;
    Ok(record)
}

/// Decode a JSON array of records of one kind. Every element is checked
/// before any is deserialized; errors are prefixed with `[index]`.
///
/// # Errors
///
/// `SchemaError::ValidationFailed` when `value` is not an array or any
/// element fails the schema, `SchemaError::Decode` when an element does not
/// deserialize, `SchemaError::Record` for the first out-of-range element.
pub fn decode_records<T: DeserializeOwned + Validate>(
    registry: &SchemaRegistry,
    name: &str,
    value: serde_json::Value,
) -> Result<Vec<T>, SchemaError> {
    let serde_json::Value::Array(items) = value else {
        return Err(SchemaError::ValidationFailed {
            errors: vec![format!("expected an array of {name} records")],
        });
    };
    let validator = registry.validator(name)?;
    let errors: Vec<String> = items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| collect_errors(&validator, item, &format!("[{index}]")))
        .collect();
    if !errors.is_empty() {
        return Err(SchemaError::ValidationFailed { errors });
    }
    items
        .into_iter()
        .map(|item| {
            let record: T = serde_json::from_value(item)?;
            record.validate()?;
            Ok(record)
        })
        .collect()
}

/// Decode a whole project bundle and range-check every record in it.
///
/// # Errors
///
/// Schema and decode errors as for [`decode`], or `SchemaError::Record`
/// for the first record whose values are out of range.
pub fn decode_bundle(
    registry: &SchemaRegistry,
    value: serde_json::Value,
) -> Result<ProjectBundle, SchemaError> {
    decode(registry, "project_bundle", value)
}

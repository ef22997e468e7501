//! # pcx-schema
//!
//! JSON Schema registry and validated decoding for PCX input records.
//!
//! This crate provides:
//! - `SchemaRegistry`: every input record schema, generated from `pcx-core` types
//! - `decode`: schema check, then typed deserialization, then record range checks
//! - Schema export for external tooling (`pcx schema get <name>`)
//!
//! ## Architecture
//!
//! Entity types are defined in `pcx-core` with `#[derive(JsonSchema)]` and
//! `deny_unknown_fields`. This crate turns them into schemas once and checks
//! raw JSON against them before anything reaches the engine, so a misspelled
//! or extra field is rejected with a path instead of silently dropped.

pub mod decode;
pub mod error;
pub mod registry;

pub use decode::{decode, decode_bundle, decode_records};
pub use error::SchemaError;
pub use registry::SchemaRegistry;

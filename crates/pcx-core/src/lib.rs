//! # pcx-core
//!
//! Core records, status enums, and error types for PCX.
//!
//! This crate provides the foundational types shared across all PCX crates:
//! - Entity structs for the records the engine reads (WBS nodes, progress
//!   snapshots, cost codes and transactions, schedule tasks, baselines, risks)
//! - Status and label enums for computed views (variance status, risk bucket,
//!   cost and schedule status)
//! - Cross-cutting error types
//!
//! Every entity is a closed record: unknown fields are rejected on
//! deserialization, and each derives `JsonSchema` so the boundary layer in
//! `pcx-schema` can validate raw JSON before it reaches the engine.

pub mod entities;
pub mod enums;
pub mod errors;

/// Tolerance used when comparing a sibling group's weightage sum to 100.
pub const DEFAULT_WEIGHTAGE_TOLERANCE: f64 = 0.01;

/// Default day threshold separating "Minor Delay" from "Major Delay".
pub const DEFAULT_MINOR_DELAY_DAYS: i64 = 5;

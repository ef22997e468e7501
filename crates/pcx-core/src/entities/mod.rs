//! Entity structs for the records the PCX engine reads.
//!
//! Each entity maps to a row owned by the surrounding application's store.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`, and reject
//! unknown fields so loosely-typed payloads fail at the boundary.

mod baseline;
mod bundle;
mod cost;
mod progress;
mod project;
mod risk;
mod schedule;
mod wbs;

pub use baseline::{BaselineTask, ScheduleBaseline};
pub use bundle::ProjectBundle;
pub use cost::{CostCode, CostTransaction};
pub use progress::ProgressSnapshot;
pub use project::Project;
pub use risk::Risk;
pub use schedule::ScheduleTask;
pub use wbs::WbsNode;

use crate::errors::CoreError;

/// Value checks a record's JSON Schema cannot express, such as numeric
/// ranges and date ordering. Records with nothing to check keep the default.
pub trait Validate {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidField`] naming the first bad field.
    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

//! Data models for projsync.
//!
//! This module defines the core data structures:
//!
//! - [`ProjectSchema`]: The project's fields with their options and iterations
//! - [`WorkItem`]: A project item with its due date, estimate and current values
//! - [`FieldUpdate`]: A single value to write back to a field
//! - [`Reconciliation`]: Updates plus the human-readable [`ChangeSummary`]

mod item;
mod schema;
mod update;

pub use item::{ItemContent, WorkItem};
pub use schema::{FieldConfig, FieldDefinition, Iteration, IterationConfig, ProjectSchema, SelectOption};
pub use update::{ChangeSummary, FieldKind, FieldUpdate, Reconciliation, SummaryEntry};

//! Entity schemas for the catalog API.
//!
//! Validation, defaulting and documentation metadata for the Movie,
//! CrewMember, Course and Enrollment families. Pure logic: no I/O, no shared
//! mutable state, safe to call from any thread.

pub mod entities;
pub mod entity;
pub mod error;
pub mod lifecycle;
pub mod record;
pub mod schema;
pub mod types;
pub mod validation;

pub use entity::{Entity, FieldChange, Patch};
pub use error::{FieldViolation, ValidationError, ViolationKind};
pub use lifecycle::RecordMeta;
pub use record::Record;

//! Payload validation.
//!
//! Pure logic over `serde_json::Value`; no I/O and no shared state.

pub mod payload;

pub use payload::{FieldValue, PayloadReader};

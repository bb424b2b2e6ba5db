//! OpenAPI document generator for the catalog API.
//!
//! Renders the documentation metadata attached to every entity family into
//! an OpenAPI 3.1 document describing the create/update/read contract.

pub mod config;
pub mod openapi;

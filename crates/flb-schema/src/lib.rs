//! Plugin schema catalogue and configuration validator
//!
//! This crate embeds the versioned Fluent Bit plugin schemas, selects a
//! schema by semantic version, augments it with the LTS plugin descriptors
//! and validates parsed configurations against it.

pub mod catalogue;
pub mod validate;

// Re-export main types
pub use catalogue::{
    default_schema, get_schema, versions, AgentMeta, Schema, SchemaOption, SchemaProperties,
    SchemaSection,
};
pub use validate::{validate, validate_with_schema};

//! # flb-core
//!
//! Core types shared across the fluentbit-config crates.
//!
//! This crate provides:
//! - The `Scalar` value type with classic-format lexeme coercion
//! - `Property` and `PropertyList` for ordered, case-insensitive sections
//! - `SectionKind` for the closed set of configuration sections
//! - The unified `FlbError` enum and `FlbResult` alias

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{FlbError, FlbResult};
pub use types::{Property, PropertyList, Scalar, SectionKind};

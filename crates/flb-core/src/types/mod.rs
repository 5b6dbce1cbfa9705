//! Core data types for the fluentbit-config model.
//!
//! This module provides the fundamental value types shared by every codec:
//! - `Scalar` tagged values with classic lexeme coercion
//! - `Property` and `PropertyList` ordered key/value collections
//! - `SectionKind` for the closed set of section kinds

pub mod property;
pub mod scalar;
pub mod section;

// Re-export all public types
pub use property::{Property, PropertyList};
pub use scalar::Scalar;
pub use section::SectionKind;

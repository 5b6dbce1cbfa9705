//! Configuration codecs for the Fluent Bit agent
//!
//! This crate parses the classic INI-like dialect, YAML and JSON into one
//! in-memory model, serialises the model back to any of the three surfaces
//! and derives operational metadata such as the network ports a
//! configuration would open.

pub mod classic;
pub mod format;
pub mod model;
pub mod ports;

// Re-export main types
pub use format::Format;
pub use model::{Config, Pipeline, Plugin};
pub use ports::{Protocol, ServicePort};

pub use flb_core::{FlbError, FlbResult, Property, PropertyList, Scalar, SectionKind};

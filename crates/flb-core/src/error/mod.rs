//! Error types and result aliases for fluentbit-config operations.
//!
//! Provides a unified error type covering every failure mode across the
//! fluentbit-config crates. The `Display` spellings are user-visible and
//! stable: callers match on the formatted strings.

use thiserror::Error;

use crate::types::SectionKind;

/// Unified error type for all fluentbit-config operations
#[derive(Error, Debug)]
pub enum FlbError {
    // Classic-format parse errors, 1-based line numbers
    #[error("{line}: {message}")]
    Classic { line: usize, message: String },

    // Structured decode errors, surfaced unchanged
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    // Validation errors
    #[error("{kind}: unknown plugin {name:?}")]
    UnknownPlugin { kind: SectionKind, name: String },

    #[error("{kind}: {plugin}: unknown property {key:?}")]
    UnknownProperty {
        kind: SectionKind,
        plugin: String,
        key: String,
    },

    #[error("{kind}: {plugin}: expected {key:?} to be a valid {expected}, got {got}")]
    InvalidPropertyType {
        kind: SectionKind,
        plugin: String,
        key: String,
        expected: String,
        got: String,
    },

    #[error("missing name property")]
    MissingName,

    // Format dispatch
    #[error("format unknown")]
    UnknownFormat,

    // Schema catalogue
    #[error("invalid schema version: {0}")]
    InvalidSchemaVersion(#[from] semver::Error),

    #[error("no schema found for version {0}")]
    SchemaNotFound(semver::Version),
}

/// Result type alias for fluentbit-config operations
pub type FlbResult<T> = Result<T, FlbError>;

impl FlbError {
    /// Create a classic parse error at the given 1-based line
    pub fn classic(line: usize, message: impl Into<String>) -> Self {
        Self::Classic {
            line,
            message: message.into(),
        }
    }

    /// Check if this error came out of the schema validator
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FlbError::UnknownPlugin { .. }
                | FlbError::UnknownProperty { .. }
                | FlbError::InvalidPropertyType { .. }
                | FlbError::MissingName
        )
    }
}

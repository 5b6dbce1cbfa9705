//! The unified configuration model.
//!
//! All three codecs produce a `Config`. The structured formats decode it
//! strictly: unknown top-level keys and unknown pipeline sub-keys are
//! rejected. Plugin ids are synthetic, assigned after decoding, and never
//! serialised.

use serde::{Deserialize, Serialize};

use flb_core::{FlbResult, PropertyList, Scalar};

use crate::format::Format;
use crate::ports::ServicePort;

/// A named, configurable unit within a pipeline stage.
///
/// Serialisation is transparent over the property list; `name` and `id`
/// are derived by [`Config::assign_ids`] after every decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plugin {
    pub properties: PropertyList,
    #[serde(skip)]
    pub id: String,
    #[serde(skip)]
    pub name: String,
}

impl Plugin {
    /// Wrap a parsed property list; the id is assigned later
    pub fn from_properties(properties: PropertyList) -> Self {
        Self {
            properties,
            id: String::new(),
            name: String::new(),
        }
    }

    /// Whether the plugin carries a (case-insensitive) name property
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    fn derive_identity(&mut self, index: usize) {
        self.name = match self.properties.get("name") {
            Some(Scalar::String(s)) => s.clone(),
            Some(other) => other.to_classic_lexeme(),
            None => String::new(),
        };
        self.id = format!("{}.{}", self.name, index);
    }
}

/// The five ordered plugin sequences of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pipeline {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Plugin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parsers: Vec<Plugin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Plugin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Plugin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<Plugin>,
}

impl Pipeline {
    /// Whether every plugin sequence is empty
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
            && self.parsers.is_empty()
            && self.filters.is_empty()
            && self.outputs.is_empty()
            && self.processors.is_empty()
    }
}

/// Top-level configuration aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "PropertyList::is_empty")]
    pub env: PropertyList,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(default, skip_serializing_if = "PropertyList::is_empty")]
    pub service: PropertyList,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customs: Vec<Plugin>,
    #[serde(default, skip_serializing_if = "Pipeline::is_empty")]
    pub pipeline: Pipeline,
}

impl Config {
    /// Parse raw bytes in the given surface format
    pub fn parse(input: &[u8], format: Format) -> FlbResult<Config> {
        crate::format::parse(input, format)
    }

    /// Parse a string in the given surface format
    pub fn parse_str(input: &str, format: Format) -> FlbResult<Config> {
        crate::format::parse(input.as_bytes(), format)
    }

    /// Serialise back to the given surface format
    pub fn dump(&self, format: Format) -> FlbResult<String> {
        crate::format::dump(self, format)
    }

    /// Derive the network ports this configuration would open
    pub fn service_ports(&self) -> Vec<ServicePort> {
        crate::ports::derive(self)
    }

    /// Recompute plugin names and synthetic ids.
    ///
    /// Ids are `"{name}.{index}"` with the 0-based position within the
    /// enclosing sequence; every parse entry point runs this pass.
    pub fn assign_ids(&mut self) {
        for plugins in [
            &mut self.customs,
            &mut self.pipeline.inputs,
            &mut self.pipeline.parsers,
            &mut self.pipeline.filters,
            &mut self.pipeline.outputs,
            &mut self.pipeline.processors,
        ] {
            for (index, plugin) in plugins.iter_mut().enumerate() {
                plugin.derive_identity(index);
            }
        }
    }

    /// Find a plugin by its synthetic id across every sequence
    pub fn find_by_id(&self, id: &str) -> Option<&Plugin> {
        self.customs
            .iter()
            .chain(&self.pipeline.inputs)
            .chain(&self.pipeline.parsers)
            .chain(&self.pipeline.filters)
            .chain(&self.pipeline.outputs)
            .chain(&self.pipeline.processors)
            .find(|p| p.id == id)
    }
}

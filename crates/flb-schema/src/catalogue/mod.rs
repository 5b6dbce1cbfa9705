//! The embedded schema catalogue.
//!
//! Schema documents are JSON blobs compiled into the library, one per
//! supported agent version, parsed once and shared immutably. Loading
//! appends the LTS plugin descriptors to the inputs and processors of
//! every schema.

use once_cell::sync::Lazy;
use semver::Version;
use serde::Deserialize;
use tracing::debug;

use flb_core::{FlbError, FlbResult, SectionKind};

const SCHEMA_1_8_2: &str = include_str!("../../schemas/1.8.2.json");
const SCHEMA_1_9_2: &str = include_str!("../../schemas/1.9.2.json");
const LTS_PLUGINS: &str = include_str!("../../schemas/lts.json");

/// Agent metadata of a schema document (JSON key `fluent-bit`)
#[derive(Debug, Clone, Deserialize)]
pub struct AgentMeta {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub os: String,
}

/// One typed option of a plugin
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaOption {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The option groups of a plugin, searched in declaration order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaProperties {
    #[serde(default)]
    pub options: Vec<SchemaOption>,
    #[serde(default)]
    pub global_options: Vec<SchemaOption>,
    #[serde(default)]
    pub networking: Vec<SchemaOption>,
    #[serde(default)]
    pub network_tls: Vec<SchemaOption>,
}

/// The descriptor of one plugin
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaSection {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: SchemaProperties,
}

impl SchemaSection {
    /// Look up an option by case-insensitive name, searching options,
    /// global_options, networking and network_tls in that order
    pub fn find_option(&self, name: &str) -> Option<&SchemaOption> {
        [
            &self.properties.options,
            &self.properties.global_options,
            &self.properties.networking,
            &self.properties.network_tls,
        ]
        .into_iter()
        .flatten()
        .find(|option| option.name.eq_ignore_ascii_case(name))
    }
}

/// A parsed schema document, immutable after construction
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    #[serde(rename = "fluent-bit")]
    pub fluent_bit: AgentMeta,
    #[serde(default)]
    pub customs: Vec<SchemaSection>,
    #[serde(default)]
    pub inputs: Vec<SchemaSection>,
    #[serde(default)]
    pub filters: Vec<SchemaSection>,
    #[serde(default)]
    pub outputs: Vec<SchemaSection>,
    #[serde(default)]
    pub processors: Vec<SchemaSection>,
}

impl Schema {
    /// The plugin descriptors for a section kind.
    ///
    /// Service and parser sections are not schema-addressable and return
    /// `None`.
    pub fn find_sections(&self, kind: SectionKind) -> Option<&[SchemaSection]> {
        match kind {
            SectionKind::Custom => Some(&self.customs),
            SectionKind::Input => Some(&self.inputs),
            SectionKind::Filter => Some(&self.filters),
            SectionKind::Output => Some(&self.outputs),
            SectionKind::Processor => Some(&self.processors),
            SectionKind::Service | SectionKind::Parser => None,
        }
    }

    /// Look up one plugin descriptor by case-insensitive name
    pub fn find_section(&self, kind: SectionKind, name: &str) -> Option<&SchemaSection> {
        self.find_sections(kind)?
            .iter()
            .find(|section| section.name.eq_ignore_ascii_case(name))
    }
}

/// The LTS plugin descriptors appended to every schema at load time
#[derive(Debug, Deserialize)]
struct LtsPlugins {
    inputs: Vec<SchemaSection>,
    processors: Vec<SchemaSection>,
}

fn inject_lts_plugins(schema: &mut Schema) {
    static LTS: Lazy<LtsPlugins> = Lazy::new(|| {
        serde_json::from_str(LTS_PLUGINS).expect("embedded LTS plugin list is well-formed")
    });
    schema.inputs.extend(LTS.inputs.iter().cloned());
    schema.processors.extend(LTS.processors.iter().cloned());
}

/// Every embedded schema, LTS-injected, ordered by ascending version
static CATALOGUE: Lazy<Vec<(Version, Schema)>> = Lazy::new(|| {
    let mut entries: Vec<(Version, Schema)> = [SCHEMA_1_8_2, SCHEMA_1_9_2]
        .iter()
        .map(|document| {
            let mut schema: Schema =
                serde_json::from_str(document).expect("embedded schema is well-formed");
            inject_lts_plugins(&mut schema);
            let version = Version::parse(&schema.fluent_bit.version)
                .expect("embedded schema carries a valid version");
            (version, schema)
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
});

/// The baseline schema (newest embedded version)
pub fn default_schema() -> &'static Schema {
    let (_, schema) = CATALOGUE.last().expect("catalogue is not empty");
    schema
}

/// The versions available in the embedded catalogue, ascending
pub fn versions() -> Vec<Version> {
    CATALOGUE.iter().map(|(version, _)| version.clone()).collect()
}

/// Select the newest embedded schema whose version is less than or equal
/// to the requested one.
///
/// The argument must be a strict semantic version with no `v` prefix.
pub fn get_schema(version: &str) -> FlbResult<&'static Schema> {
    let requested = Version::parse(version)?;
    let selected = CATALOGUE
        .iter()
        .rev()
        .find(|(available, _)| *available <= requested)
        .map(|(_, schema)| schema)
        .ok_or_else(|| FlbError::SchemaNotFound(requested.clone()))?;
    debug!(
        requested = %requested,
        selected = %selected.fluent_bit.version,
        "selected schema version"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_baseline() {
        let schema = default_schema();
        assert_eq!(schema.fluent_bit.version, "1.9.2");
        assert_eq!(schema.fluent_bit.name, "fluent-bit");
    }

    #[test]
    fn test_agent_metadata() {
        let schema = default_schema();
        assert_eq!(schema.fluent_bit.schema_version, "1");
        assert_eq!(schema.fluent_bit.os, "linux");
    }

    #[test]
    fn test_versions_are_ascending() {
        let versions = versions();
        assert_eq!(versions.len(), 2);
        assert!(versions[0] < versions[1]);
    }

    #[test]
    fn test_get_schema_selects_newest_not_above() {
        assert_eq!(get_schema("1.9.2").unwrap().fluent_bit.version, "1.9.2");
        assert_eq!(get_schema("2.1.0").unwrap().fluent_bit.version, "1.9.2");
        assert_eq!(get_schema("1.9.0").unwrap().fluent_bit.version, "1.8.2");
        assert_eq!(get_schema("1.8.2").unwrap().fluent_bit.version, "1.8.2");
    }

    #[test]
    fn test_get_schema_rejects_malformed_versions() {
        let err = get_schema("v1.9.2").unwrap_err();
        assert!(err.to_string().starts_with("invalid schema version"));
        assert!(get_schema("1.9").is_err());
        assert!(get_schema("latest").is_err());
    }

    #[test]
    fn test_get_schema_unmatched_version() {
        let err = get_schema("0.9.0").unwrap_err();
        assert_eq!(err.to_string(), "no schema found for version 0.9.0");
    }

    #[test]
    fn test_lts_plugins_are_injected() {
        let schema = default_schema();
        assert!(schema.find_section(SectionKind::Input, "datagen").is_some());
        assert!(schema
            .find_section(SectionKind::Processor, "content_modifier")
            .is_some());
        // also injected into older schemas
        let old = get_schema("1.8.2").unwrap();
        assert!(old.find_section(SectionKind::Input, "sqldb").is_some());
        assert!(old.find_section(SectionKind::Input, "opentelemetry").is_none());
    }

    #[test]
    fn test_section_lookup_is_case_insensitive() {
        let schema = default_schema();
        assert!(schema.find_section(SectionKind::Input, "CPU").is_some());
        assert!(schema.find_section(SectionKind::Output, "Es").is_some());
        assert!(schema.find_section(SectionKind::Input, "nope").is_none());
    }

    #[test]
    fn test_parser_kind_is_not_addressable() {
        let schema = default_schema();
        assert!(schema.find_sections(SectionKind::Parser).is_none());
        assert!(schema.find_section(SectionKind::Parser, "json").is_none());
        assert!(schema.find_sections(SectionKind::Service).is_none());
    }

    #[test]
    fn test_option_lookup_order_and_case() {
        let schema = default_schema();
        let es = schema.find_section(SectionKind::Output, "es").unwrap();

        assert_eq!(es.find_option("Cloud_ID").unwrap().kind, "prefixed string");
        // networking and tls groups are reachable
        assert_eq!(es.find_option("net.connect_timeout").unwrap().kind, "time");
        assert_eq!(es.find_option("tls.verify").unwrap().kind, "boolean");
        assert!(es.find_option("bulk_size").is_none());
    }
}

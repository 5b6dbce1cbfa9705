//! Surface format tags and the parse/dump facade.

use std::fmt;
use std::str::FromStr;

use flb_core::{FlbError, FlbResult};

use crate::classic;
use crate::model::Config;

/// One of the three configuration surfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Classic,
    Yaml,
    Json,
}

impl FromStr for Format {
    type Err = FlbError;

    fn from_str(s: &str) -> FlbResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "ini" | "conf" | "classic" => Ok(Format::Classic),
            "yml" | "yaml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(FlbError::UnknownFormat),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Classic => f.write_str("classic"),
            Format::Yaml => f.write_str("yaml"),
            Format::Json => f.write_str("json"),
        }
    }
}

/// Parse raw bytes in the given format into a configuration
pub fn parse(input: &[u8], format: Format) -> FlbResult<Config> {
    match format {
        Format::Classic => classic::parse(input),
        Format::Yaml => {
            let mut config: Config = serde_yaml::from_slice(input)?;
            config.assign_ids();
            Ok(config)
        }
        Format::Json => {
            let mut config: Config = serde_json::from_slice(input)?;
            config.assign_ids();
            Ok(config)
        }
    }
}

/// Serialise a configuration in the given format
pub fn dump(config: &Config, format: Format) -> FlbResult<String> {
    match format {
        Format::Classic => Ok(classic::printer::print(config)),
        Format::Yaml => Ok(serde_yaml::to_string(config)?),
        Format::Json => Ok(serde_json::to_string(config)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!("".parse::<Format>().unwrap(), Format::Classic);
        assert_eq!("ini".parse::<Format>().unwrap(), Format::Classic);
        assert_eq!("conf".parse::<Format>().unwrap(), Format::Classic);
        assert_eq!("CLASSIC".parse::<Format>().unwrap(), Format::Classic);
        assert_eq!("yml".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("YAML".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
    }

    #[test]
    fn test_unknown_format_tag() {
        let err = "toml".parse::<Format>().unwrap_err();
        assert_eq!(err.to_string(), "format unknown");
    }

    #[test]
    fn test_yaml_parse_assigns_ids() {
        let yaml = "pipeline:\n  inputs:\n    - name: cpu\n    - name: mem\n";
        let config = parse(yaml.as_bytes(), Format::Yaml).unwrap();
        assert_eq!(config.pipeline.inputs[1].id, "mem.1");
    }

    #[test]
    fn test_json_parse_assigns_ids() {
        let json = r#"{"pipeline": {"inputs": [{"name": "cpu", "pid": 1}]}}"#;
        let config = parse(json.as_bytes(), Format::Json).unwrap();
        assert_eq!(config.pipeline.inputs[0].id, "cpu.0");
        assert_eq!(config.pipeline.inputs[0].properties.get_i64("pid"), Some(1));
    }

    #[test]
    fn test_classic_interop_from_yaml() {
        let yaml = concat!(
            "env:\n",
            "  HOSTNAME: web-42\n",
            "service:\n",
            "  flush: 1\n",
            "pipeline:\n",
            "  inputs:\n",
            "    - name: cpu\n",
            "      interval_sec: 5\n",
            "  filters:\n",
            "    - name: grep\n",
            "      match: '*'\n",
            "  outputs:\n",
            "    - name: stdout\n",
            "      match: '*'\n",
        );
        let config = parse(yaml.as_bytes(), Format::Yaml).unwrap();
        let printed = dump(&config, Format::Classic).unwrap();
        let reparsed = parse(printed.as_bytes(), Format::Classic).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_classic_interop_from_json() {
        let json = concat!(
            r#"{"service": {"flush": 1, "http_server": "on"},"#,
            r#" "pipeline": {"inputs": [{"name": "forward", "port": 24224}],"#,
            r#" "outputs": [{"name": "stdout", "match": "*"}]}}"#,
        );
        let config = parse(json.as_bytes(), Format::Json).unwrap();
        let printed = dump(&config, Format::Classic).unwrap();
        let reparsed = parse(printed.as_bytes(), Format::Classic).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_yaml_round_trip_keeps_env_and_includes() {
        let classic = b"@SET A=1\n@INCLUDE other.conf\n[INPUT]\n    name cpu\n";
        let config = parse(classic, Format::Classic).unwrap();

        let yaml = dump(&config, Format::Yaml).unwrap();
        let reparsed = parse(yaml.as_bytes(), Format::Yaml).unwrap();
        assert_eq!(config, reparsed);
        assert_eq!(reparsed.includes, ["other.conf"]);
        assert_eq!(reparsed.env.get_i64("A"), Some(1));
    }

    #[test]
    fn test_json_dump_preserves_property_order() {
        let classic = b"[INPUT]\n    Name tail\n    Path /var/log/syslog\n    Tag host.*\n";
        let config = parse(classic, Format::Classic).unwrap();
        let json = dump(&config, Format::Json).unwrap();
        assert_eq!(
            json,
            r#"{"pipeline":{"inputs":[{"Name":"tail","Path":"/var/log/syslog","Tag":"host.*"}]}}"#
        );
    }
}

//! The classic INI-like configuration dialect.
//!
//! Line-oriented: `#` comments, `@COMMAND` directives, `[SECTION]` headers
//! and whitespace-split key-value entries. Repeated keys within a section
//! promote to list values. Errors carry 1-based line numbers.

pub mod printer;

use std::str;

use tracing::debug;

use flb_core::{FlbError, FlbResult, PropertyList, Scalar, SectionKind};

use crate::model::{Config, Plugin};

/// Parse classic-format bytes into a configuration
pub fn parse(input: &[u8]) -> FlbResult<Config> {
    let mut config = Config::default();
    let mut current: Option<OpenSection> = None;

    for (index, raw) in input.split(|b| *b == b'\n').enumerate() {
        let number = index + 1;
        let line = str::from_utf8(raw)
            .map_err(|_| FlbError::classic(number, "invalid utf8 string"))?
            .trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(command) = line.strip_prefix('@') {
            parse_command(&mut config, command, number)?;
            continue;
        }

        if line.starts_with('[') {
            if let Some(section) = current.take() {
                section.flush(&mut config)?;
            }
            current = Some(parse_section_header(line, number)?);
            continue;
        }

        let section = current
            .as_mut()
            .ok_or_else(|| FlbError::classic(number, format!("unexpected entry {line:?}")))?;
        let (key, value) = split_entry(line).ok_or_else(|| {
            FlbError::classic(number, "expected at least two strings separated by a space")
        })?;
        section
            .properties
            .add_or_promote(key, Scalar::from_classic_lexeme(value));
    }

    if let Some(section) = current.take() {
        section.flush(&mut config)?;
    }

    config.assign_ids();
    Ok(config)
}

/// A section under construction; the raw header name is kept so unknown
/// kinds can be reported with the header's line number at flush time
struct OpenSection {
    name: String,
    line: usize,
    properties: PropertyList,
}

impl OpenSection {
    fn flush(self, config: &mut Config) -> FlbResult<()> {
        let kind: SectionKind = self
            .name
            .parse()
            .map_err(|()| self.unknown_section())
            .and_then(|kind| match kind {
                // processors have no classic surface
                SectionKind::Processor => Err(self.unknown_section()),
                kind => Ok(kind),
            })?;

        match kind {
            SectionKind::Service => {
                // repeated [SERVICE] sections merge, promoting duplicates
                for property in self.properties {
                    config.service.add_or_promote(property.key, property.value);
                }
            }
            SectionKind::Custom => config.customs.push(Plugin::from_properties(self.properties)),
            SectionKind::Input => config
                .pipeline
                .inputs
                .push(Plugin::from_properties(self.properties)),
            SectionKind::Parser => config
                .pipeline
                .parsers
                .push(Plugin::from_properties(self.properties)),
            SectionKind::Filter => config
                .pipeline
                .filters
                .push(Plugin::from_properties(self.properties)),
            SectionKind::Output => config
                .pipeline
                .outputs
                .push(Plugin::from_properties(self.properties)),
            SectionKind::Processor => unreachable!("rejected above"),
        }
        Ok(())
    }

    fn unknown_section(&self) -> FlbError {
        FlbError::classic(self.line, format!("unknown section {:?}", self.name))
    }
}

fn parse_command(config: &mut Config, command: &str, number: usize) -> FlbResult<()> {
    let (word, instruction) = split_entry(command).ok_or_else(|| {
        FlbError::classic(number, "expected at least two strings separated by a space")
    })?;

    if word.eq_ignore_ascii_case("INCLUDE") {
        config.includes.push(instruction.to_string());
    } else if word.eq_ignore_ascii_case("SET") {
        // key and value are kept verbatim; a missing '=' leaves the value
        // as the empty string
        let (key, value) = instruction
            .split_once('=')
            .unwrap_or((instruction, ""));
        config.env.add(key, Scalar::from_classic_lexeme(value));
    } else {
        debug!(command = word, line = number, "ignoring unknown classic command");
    }
    Ok(())
}

fn parse_section_header(line: &str, number: usize) -> FlbResult<OpenSection> {
    let inner = line
        .strip_suffix(']')
        .ok_or_else(|| FlbError::classic(number, "expected section to end with \"]\""))?;
    let name = inner[1..].trim();
    if name.is_empty() {
        return Err(FlbError::classic(
            number,
            "expected section name to not be empty",
        ));
    }
    Ok(OpenSection {
        name: name.to_string(),
        line: number,
        properties: PropertyList::new(),
    })
}

/// Split a trimmed line into (first word, remainder) on the first run of
/// whitespace; `None` when there are fewer than two fields
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let at = line.find(char::is_whitespace)?;
    let (word, rest) = line.split_at(at);
    let remainder = rest.trim_start();
    if remainder.is_empty() {
        return None;
    }
    Some((word, remainder))
}

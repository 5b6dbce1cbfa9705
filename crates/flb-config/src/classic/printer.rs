//! Classic-format pretty printer.
//!
//! Emits `@SET`/`@INCLUDE` directives, then sections in the fixed order
//! SERVICE, CUSTOM, INPUT, FILTER, OUTPUT, PARSER. Values are aligned per
//! section: the key cell (indent + key) is space-padded to the longest
//! cell plus one, with a minimum cell width of four. List values expand to
//! one line per element under the original key casing.

use flb_core::{Property, PropertyList, Scalar, SectionKind};

use crate::model::Config;

const INDENT: &str = "    ";
const MIN_CELL_WIDTH: usize = 4;

/// Render a configuration in the classic dialect.
///
/// Feeding the output back through the classic parser reconstructs an
/// equal configuration. Processors have no classic surface and are not
/// emitted.
pub fn print(config: &Config) -> String {
    let mut out = String::new();

    for property in &config.env {
        for lexeme in lexemes(property) {
            out.push_str(&format!("@SET {}={}\n", property.key, lexeme));
        }
    }
    for include in &config.includes {
        out.push_str(&format!("@INCLUDE {include}\n"));
    }

    if !config.service.is_empty() {
        print_section(&mut out, SectionKind::Service, &config.service);
    }
    for (kind, plugins) in [
        (SectionKind::Custom, &config.customs),
        (SectionKind::Input, &config.pipeline.inputs),
        (SectionKind::Filter, &config.pipeline.filters),
        (SectionKind::Output, &config.pipeline.outputs),
        (SectionKind::Parser, &config.pipeline.parsers),
    ] {
        for plugin in plugins {
            print_section(&mut out, kind, &plugin.properties);
        }
    }

    out
}

fn print_section(out: &mut String, kind: SectionKind, properties: &PropertyList) {
    out.push_str(&format!("[{}]\n", kind.as_str().to_uppercase()));

    let mut lines: Vec<(&str, String)> = Vec::new();
    for property in properties {
        for lexeme in lexemes(property) {
            lines.push((&property.key, lexeme));
        }
    }

    // column width follows the longest key cell within this section
    let column = lines
        .iter()
        .map(|(key, _)| INDENT.len() + key.chars().count() + 1)
        .max()
        .unwrap_or(0)
        .max(MIN_CELL_WIDTH);

    for (key, lexeme) in lines {
        let cell = INDENT.len() + key.chars().count();
        out.push_str(INDENT);
        out.push_str(key);
        for _ in cell..column {
            out.push(' ');
        }
        out.push_str(&lexeme);
        out.push('\n');
    }
}

/// Lexemes for one property: a list value expands one element per line
fn lexemes(property: &Property) -> Vec<String> {
    match &property.value {
        Scalar::List(items) => items.iter().map(Scalar::to_classic_lexeme).collect(),
        value => vec![value.to_classic_lexeme()],
    }
}

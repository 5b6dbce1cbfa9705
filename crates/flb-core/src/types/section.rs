//! Section kinds for the configuration model.

use std::fmt;
use std::str::FromStr;

/// The closed set of configuration section kinds.
///
/// Six kinds have a classic-format surface; processors only appear in the
/// structured formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Service,
    Custom,
    Input,
    Parser,
    Filter,
    Output,
    Processor,
}

impl SectionKind {
    /// Lowercase name, as used in error messages and schema lookups
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Service => "service",
            SectionKind::Custom => "custom",
            SectionKind::Input => "input",
            SectionKind::Parser => "parser",
            SectionKind::Filter => "filter",
            SectionKind::Output => "output",
            SectionKind::Processor => "processor",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "service" => Ok(SectionKind::Service),
            "custom" => Ok(SectionKind::Custom),
            "input" => Ok(SectionKind::Input),
            "parser" => Ok(SectionKind::Parser),
            "filter" => Ok(SectionKind::Filter),
            "output" => Ok(SectionKind::Output),
            "processor" => Ok(SectionKind::Processor),
            _ => Err(()),
        }
    }
}

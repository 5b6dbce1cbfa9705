//! Tagged scalar values and classic-format lexeme coercion.
//!
//! Every property value in the configuration model is a `Scalar`. The
//! classic codec exchanges scalars with their textual lexeme form; the
//! structured codecs exchange them with JSON/YAML values through the serde
//! impls at the bottom of this module.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A tagged configuration value.
///
/// `List` holds promoted repeated keys and JSON/YAML arrays; parsers only
/// ever produce lists one level deep. `Map` holds nested mappings arriving
/// from the structured formats; the classic codec prints it as compact
/// JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Scalar>),
    Map(IndexMap<String, Scalar>),
}

impl Scalar {
    /// Convert an unquoted classic right-hand lexeme into a typed scalar.
    ///
    /// Order matters: integers must be tried before floats so they never
    /// escape as floats.
    pub fn from_classic_lexeme(s: &str) -> Scalar {
        if s.eq_ignore_ascii_case("true") {
            return Scalar::Bool(true);
        }
        if s.eq_ignore_ascii_case("false") {
            return Scalar::Bool(false);
        }
        if let Ok(i) = s.parse::<i64>() {
            return Scalar::Int(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Scalar::Float(f);
        }
        if let Some(unquoted) = unquote(s) {
            return Scalar::String(unquoted);
        }
        Scalar::String(s.to_string())
    }

    /// Render this scalar as a classic right-hand lexeme.
    ///
    /// List values are expanded one-line-per-element by the printing layer
    /// and normally never reach this function; a residual list renders as
    /// compact JSON, like nested mappings.
    pub fn to_classic_lexeme(&self) -> String {
        match self {
            Scalar::Bool(true) => "true".to_string(),
            Scalar::Bool(false) => "false".to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => format_float(*f),
            Scalar::String(s) => {
                if s.is_empty() {
                    "\"\"".to_string()
                } else if s.contains('\n') {
                    quote(s)
                } else {
                    s.clone()
                }
            }
            // serde_json does not HTML-escape, matching the contract
            Scalar::Map(_) | Scalar::List(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    /// View as a string slice, if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// View as a signed 64-bit integer, if this is an integer scalar
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View as a 64-bit float, if this is a floating scalar
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// View as a boolean, if this is a boolean scalar
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Check whether this scalar is a promoted list
    pub fn is_list(&self) -> bool {
        matches!(self, Scalar::List(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_classic_lexeme())
    }
}

/// Format a float the way the classic printer expects: integral values
/// print with no fractional part; everything else prints `%.6f` with
/// trailing zeros and any trailing decimal point removed.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        return format!("{f:.0}");
    }
    let s = format!("{f:.6}");
    let s = s.trim_end_matches('0');
    s.trim_end_matches('.').to_string()
}

/// Remove surrounding double quotes and resolve escapes.
///
/// Returns `None` unless the whole lexeme is a single well-formed quoted
/// string, in which case the caller keeps the lexeme verbatim.
fn unquote(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            // a bare quote would terminate the literal early
            '"' => return None,
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                '0' => out.push('\0'),
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                '\'' => out.push('\''),
                'u' => {
                    if chars.next()? != '{' {
                        return None;
                    }
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    let code = u32::from_str_radix(&hex, 16).ok()?;
                    out.push(char::from_u32(code)?);
                }
                _ => return None,
            },
            c => out.push(c),
        }
    }
    Some(out)
}

/// Escape and surround a string with double quotes, the inverse of
/// [`unquote`].
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Scalar::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration scalar")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
        Ok(Scalar::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        if v <= i64::MAX as u64 {
            Ok(Scalar::Int(v as i64))
        } else {
            Ok(Scalar::Float(v as f64))
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Ok(Scalar::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::String(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::String(String::new()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Scalar, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Scalar::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Scalar, A::Error> {
        let mut entries = IndexMap::new();
        while let Some((key, value)) = map.next_entry::<String, Scalar>()? {
            entries.insert(key, value);
        }
        Ok(Scalar::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Scalar, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexeme_booleans() {
        assert_eq!(Scalar::from_classic_lexeme("true"), Scalar::Bool(true));
        assert_eq!(Scalar::from_classic_lexeme("TRUE"), Scalar::Bool(true));
        assert_eq!(Scalar::from_classic_lexeme("False"), Scalar::Bool(false));
    }

    #[test]
    fn test_lexeme_numbers() {
        assert_eq!(Scalar::from_classic_lexeme("42"), Scalar::Int(42));
        assert_eq!(Scalar::from_classic_lexeme("-7"), Scalar::Int(-7));
        assert_eq!(Scalar::from_classic_lexeme("10.4"), Scalar::Float(10.4));
        // integers never escape as floats
        assert_eq!(Scalar::from_classic_lexeme("5"), Scalar::Int(5));
    }

    #[test]
    fn test_lexeme_strings() {
        assert_eq!(
            Scalar::from_classic_lexeme("hostname ${HOSTNAME}"),
            Scalar::String("hostname ${HOSTNAME}".to_string())
        );
        assert_eq!(
            Scalar::from_classic_lexeme("\"a\\nb\""),
            Scalar::String("a\nb".to_string())
        );
        // a malformed quoted literal stays verbatim
        assert_eq!(
            Scalar::from_classic_lexeme("\"a\"b\""),
            Scalar::String("\"a\"b\"".to_string())
        );
    }

    #[test]
    fn test_lexeme_output_floats() {
        assert_eq!(Scalar::Float(10.0).to_classic_lexeme(), "10");
        assert_eq!(Scalar::Float(10.4).to_classic_lexeme(), "10.4");
        assert_eq!(Scalar::Float(-2.5).to_classic_lexeme(), "-2.5");
        assert_eq!(Scalar::Float(0.5).to_classic_lexeme(), "0.5");
    }

    #[test]
    fn test_lexeme_output_strings() {
        assert_eq!(Scalar::String(String::new()).to_classic_lexeme(), "\"\"");
        assert_eq!(
            Scalar::String("plain value".to_string()).to_classic_lexeme(),
            "plain value"
        );
        assert_eq!(
            Scalar::String("a\nb".to_string()).to_classic_lexeme(),
            "\"a\\nb\""
        );
    }

    #[test]
    fn test_lexeme_output_map_is_compact_json() {
        let mut entries = IndexMap::new();
        entries.insert("host".to_string(), Scalar::String("localhost".to_string()));
        entries.insert("port".to_string(), Scalar::Int(24224));
        assert_eq!(
            Scalar::Map(entries).to_classic_lexeme(),
            r#"{"host":"localhost","port":24224}"#
        );
    }

    #[test]
    fn test_lexeme_round_trip() {
        for lexeme in ["true", "42", "10.4", "plain", "\"\""] {
            let scalar = Scalar::from_classic_lexeme(lexeme);
            assert_eq!(
                Scalar::from_classic_lexeme(&scalar.to_classic_lexeme()),
                scalar,
                "lexeme {lexeme:?} did not round-trip"
            );
        }
    }

    #[test]
    fn test_json_decode_preserves_types() {
        let scalar: Scalar = serde_json::from_str("10.4").unwrap();
        assert_eq!(scalar, Scalar::Float(10.4));
        let scalar: Scalar = serde_json::from_str("10").unwrap();
        assert_eq!(scalar, Scalar::Int(10));
        let scalar: Scalar = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(scalar, Scalar::List(vec![Scalar::Int(1), Scalar::Int(2)]));
    }

    #[test]
    fn test_yaml_decode_preserves_types() {
        let scalar: Scalar = serde_yaml::from_str("on_message").unwrap();
        assert_eq!(scalar, Scalar::String("on_message".to_string()));
        let scalar: Scalar = serde_yaml::from_str("true").unwrap();
        assert_eq!(scalar, Scalar::Bool(true));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_lexeme()(lexeme in prop_oneof![
            Just("true".to_string()),
            Just("false".to_string()),
            "-?[0-9]{1,9}",
            // non-integral floats only: integral ones print as integers
            "-?[0-9]{1,4}\\.[0-9]{0,3}[1-9]",
            "[a-z][a-z0-9/${}.*_-]{0,20}"
                .prop_filter("not a float literal", |s| s.parse::<f64>().is_err()),
        ]) -> String {
            lexeme
        }
    }

    proptest! {
        /// Coercion round-trip: the printed lexeme re-parses to the same
        /// scalar
        #[test]
        fn lexeme_round_trip(lexeme in arb_lexeme()) {
            let scalar = Scalar::from_classic_lexeme(&lexeme);
            let printed = scalar.to_classic_lexeme();
            prop_assert_eq!(Scalar::from_classic_lexeme(&printed), scalar);
        }
    }
}

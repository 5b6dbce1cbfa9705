//! Ordered, case-insensitive keyed property collections.
//!
//! A `PropertyList` is not a hash map: it is a vector of pairs with linear
//! case-insensitive lookup. Insertion order is preserved for round-trip
//! printing and original key casing is kept verbatim.

use std::fmt;
use std::slice;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::Scalar;

/// A single (key, value) configuration pair
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Scalar,
}

impl Property {
    /// Create a property from a key and value
    pub fn new(key: impl Into<String>, value: Scalar) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// An ordered sequence of properties with case-insensitive lookup.
///
/// Structural equality (`PartialEq`) is positional and case-sensitive,
/// which is stricter than the lookup operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyList {
    entries: Vec<Property>,
}

impl PropertyList {
    /// Create an empty property list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of properties in the list
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the list holds no properties
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over properties in insertion order
    pub fn iter(&self) -> slice::Iter<'_, Property> {
        self.entries.iter()
    }

    /// Check for a property by case-insensitive key
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up the first property matching the key case-insensitively
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .map(|p| &p.value)
    }

    /// Look up a string-valued property
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Scalar::as_str)
    }

    /// Look up an integer-valued property, accepting integer scalars and
    /// strings holding a base-10 integer
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Scalar::Int(i) => Some(*i),
            Scalar::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Replace the value of the first case-insensitive match, or append
    /// when the key is not present
    pub fn set(&mut self, key: impl Into<String>, value: Scalar) {
        let key = key.into();
        match self
            .entries
            .iter_mut()
            .find(|p| p.key.eq_ignore_ascii_case(&key))
        {
            Some(existing) => existing.value = value,
            None => self.entries.push(Property::new(key, value)),
        }
    }

    /// Append a property unconditionally, keeping any earlier entries with
    /// the same key
    pub fn add(&mut self, key: impl Into<String>, value: Scalar) {
        self.entries.push(Property::new(key.into(), value));
    }

    /// Parser-side insertion with duplicate-key list promotion.
    ///
    /// A repeated key within one section turns the existing value into a
    /// list and appends the new element in input order; the first
    /// occurrence's key casing wins for printing.
    pub fn add_or_promote(&mut self, key: impl Into<String>, value: Scalar) {
        let key = key.into();
        match self
            .entries
            .iter_mut()
            .find(|p| p.key.eq_ignore_ascii_case(&key))
        {
            Some(existing) => match &mut existing.value {
                Scalar::List(items) => items.push(value),
                other => {
                    let first = other.clone();
                    existing.value = Scalar::List(vec![first, value]);
                }
            },
            None => self.entries.push(Property::new(key, value)),
        }
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a Property;
    type IntoIter = slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for PropertyList {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Scalar)> for PropertyList {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        let mut list = PropertyList::new();
        for (key, value) in iter {
            list.add(key, value);
        }
        list
    }
}

impl Serialize for PropertyList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for property in &self.entries {
            map.serialize_entry(&property.key, &property.value)?;
        }
        map.end()
    }
}

struct PropertyListVisitor;

impl<'de> Visitor<'de> for PropertyListVisitor {
    type Value = PropertyList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of configuration properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PropertyList, A::Error> {
        let mut list = PropertyList::new();
        // entries arrive in document order; repeated keys promote to lists
        // exactly like the classic parser
        while let Some((key, value)) = map.next_entry::<String, Scalar>()? {
            list.add_or_promote(key, value);
        }
        Ok(list)
    }
}

impl<'de> Deserialize<'de> for PropertyList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<PropertyList, D::Error> {
        deserializer.deserialize_map(PropertyListVisitor)
    }
}

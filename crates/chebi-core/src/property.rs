//! Typed property values parsed from a node's property-fact strings.
//!
//! A property fact is a line of the form
//!
//! ```text
//! http://purl.obolibrary.org/obo/chebi/formula "C6H12O6" xsd:string
//! ```
//!
//! The key is the path segment after the last `/` of the token that directly
//! precedes the opening quote; the value is the text between the first pair
//! of double quotes. Values are coerced to a number when they parse as one
//! and kept as raw text otherwise.
//!
//! When several facts share a key, the one appearing last wins.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// Coerces raw fact text to a number, falling back to the text itself.
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) => PropertyValue::Number(n),
            Err(_) => PropertyValue::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Number(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

/// One property fact split into key and raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFact<'a> {
    pub key: &'a str,
    pub raw_value: &'a str,
}

impl<'a> PropertyFact<'a> {
    /// Parses a fact string. Returns `None` when the fact has no quoted
    /// value or no `/`-qualified key in front of it.
    pub fn parse(fact: &'a str) -> Option<Self> {
        let open = fact.find('"')?;
        let rest = &fact[open + 1..];
        let close = rest.find('"')?;
        let raw_value = &rest[..close];

        let predicate = fact[..open].split_whitespace().next_back()?;
        let (_, key) = predicate.rsplit_once('/')?;
        if key.is_empty() {
            return None;
        }
        Some(PropertyFact { key, raw_value })
    }
}

/// Insertion-ordered map of property keys to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(IndexMap<String, PropertyValue>);

impl PropertyMap {
    pub fn new() -> Self {
        PropertyMap(IndexMap::new())
    }

    /// Builds a map from raw fact strings. Facts that do not parse are
    /// skipped; a later fact overrides an earlier one with the same key.
    pub fn from_facts<I, S>(facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = PropertyMap::new();
        for fact in facts {
            if let Some(parsed) = PropertyFact::parse(fact.as_ref()) {
                map.insert(parsed.key, PropertyValue::coerce(parsed.raw_value));
            }
        }
        map
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMULA: &str = r#"http://purl.obolibrary.org/obo/chebi/formula "C6H12O6" xsd:string"#;
    const MASS: &str =
        r#"http://purl.obolibrary.org/obo/chebi/monoisotopicmass "180.063" xsd:string"#;

    #[test]
    fn parses_chebi_fact() {
        let fact = PropertyFact::parse(FORMULA).unwrap();
        assert_eq!(fact.key, "formula");
        assert_eq!(fact.raw_value, "C6H12O6");
    }

    #[test]
    fn parses_descriptor_before_key() {
        let fact = PropertyFact::parse(r#"some-descriptor ex/formula "C2H6O" extra"#).unwrap();
        assert_eq!(fact.key, "formula");
        assert_eq!(fact.raw_value, "C2H6O");
    }

    #[test]
    fn fact_without_quotes_is_rejected() {
        assert!(PropertyFact::parse("http://example.org/formula C6H12O6").is_none());
        assert!(PropertyFact::parse(r#"http://example.org/formula "unterminated"#).is_none());
    }

    #[test]
    fn fact_without_slash_key_is_rejected() {
        assert!(PropertyFact::parse(r#"formula "C6H12O6""#).is_none());
    }

    #[test]
    fn numeric_values_are_coerced() {
        let map = PropertyMap::from_facts([FORMULA, MASS]);
        assert_eq!(map.get("monoisotopicmass"), Some(&PropertyValue::Number(180.063)));
        assert_eq!(
            map.get("formula"),
            Some(&PropertyValue::Text("C6H12O6".into()))
        );
    }

    #[test]
    fn signed_charge_is_numeric() {
        let map = PropertyMap::from_facts([r#"x/charge "-1" xsd:string"#, r#"x/mass "+2""#]);
        assert_eq!(map.get("charge").and_then(PropertyValue::as_number), Some(-1.0));
        assert_eq!(map.get("mass").and_then(PropertyValue::as_number), Some(2.0));
    }

    #[test]
    fn last_matching_fact_wins() {
        let map = PropertyMap::from_facts([
            r#"x/formula "C2H6O" xsd:string"#,
            r#"x/charge "0" xsd:string"#,
            r#"x/formula "C2H5O" xsd:string"#,
        ]);
        assert_eq!(map.get("formula").and_then(PropertyValue::as_text), Some("C2H5O"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn key_match_is_exact() {
        let map = PropertyMap::from_facts([MASS]);
        assert!(map.get("mass").is_none());
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&PropertyValue::Number(1.5)).unwrap();
        assert_eq!(json, "1.5");
        let json = serde_json::to_string(&PropertyValue::Text("CCO".into())).unwrap();
        assert_eq!(json, "\"CCO\"");
    }
}

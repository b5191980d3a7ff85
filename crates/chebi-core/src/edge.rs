//! Typed relations between ontology entities.
//!
//! The relation vocabulary is open: the relations the curation pipeline keeps
//! get dedicated variants, anything else is carried verbatim in
//! [`Relation::Other`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The label on a directed edge of the ontology graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relation {
    /// Subsumption: source is a kind of target.
    IsA,
    IsConjugateAcidOf,
    IsConjugateBaseOf,
    IsEnantiomerOf,
    IsTautomerOf,
    /// Any relation outside the curated vocabulary (e.g. `has_role`).
    Other(String),
}

impl Relation {
    /// The relations that survive the class-node filter by default.
    pub const CURATED: [Relation; 5] = [
        Relation::IsA,
        Relation::IsConjugateAcidOf,
        Relation::IsConjugateBaseOf,
        Relation::IsEnantiomerOf,
        Relation::IsTautomerOf,
    ];

    pub fn parse(label: &str) -> Self {
        match label {
            "is_a" => Relation::IsA,
            "is_conjugate_acid_of" => Relation::IsConjugateAcidOf,
            "is_conjugate_base_of" => Relation::IsConjugateBaseOf,
            "is_enantiomer_of" => Relation::IsEnantiomerOf,
            "is_tautomer_of" => Relation::IsTautomerOf,
            other => Relation::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Relation::IsA => "is_a",
            Relation::IsConjugateAcidOf => "is_conjugate_acid_of",
            Relation::IsConjugateBaseOf => "is_conjugate_base_of",
            Relation::IsEnantiomerOf => "is_enantiomer_of",
            Relation::IsTautomerOf => "is_tautomer_of",
            Relation::Other(label) => label,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Relation {
    fn from(label: String) -> Self {
        Relation::parse(&label)
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        match relation {
            Relation::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_labels() {
        assert_eq!(Relation::parse("is_a"), Relation::IsA);
        assert_eq!(
            Relation::parse("is_conjugate_base_of"),
            Relation::IsConjugateBaseOf
        );
        assert_eq!(Relation::parse("is_tautomer_of"), Relation::IsTautomerOf);
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let rel = Relation::parse("has_functional_parent");
        assert_eq!(rel, Relation::Other("has_functional_parent".into()));
        assert_eq!(rel.as_str(), "has_functional_parent");
    }

    #[test]
    fn curated_labels_round_trip_through_strings() {
        for rel in Relation::CURATED.iter() {
            assert_eq!(&Relation::parse(rel.as_str()), rel);
        }
    }

    #[test]
    fn serializes_as_plain_label() {
        let json = serde_json::to_string(&Relation::IsEnantiomerOf).unwrap();
        assert_eq!(json, "\"is_enantiomer_of\"");
        let back: Relation = serde_json::from_str("\"part_of\"").unwrap();
        assert_eq!(back, Relation::Other("part_of".into()));
    }
}

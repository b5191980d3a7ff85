//! The "real compound" predicate used by the class-node filter.
//!
//! A node counts as a concrete compound when it carries property facts, a
//! non-empty formula without the wildcard substituent marker, and a
//! monoisotopic mass inside the configured closed interval.

use serde::{Deserialize, Serialize};

use crate::node::CompoundNode;

pub const FORMULA_KEY: &str = "formula";
pub const MASS_KEY: &str = "monoisotopicmass";

/// Bounds for the real-compound predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundFilter {
    /// Lower mass bound, inclusive.
    pub min_mass: f64,
    /// Upper mass bound, inclusive.
    pub max_mass: f64,
    /// Marker for an unspecified substituent. Any formula containing it
    /// denotes a compound class.
    pub wildcard: char,
}

impl Default for CompoundFilter {
    fn default() -> Self {
        CompoundFilter {
            min_mass: 50.0,
            max_mass: 1500.0,
            wildcard: 'R',
        }
    }
}

impl CompoundFilter {
    pub fn is_real_compound(&self, node: &CompoundNode) -> bool {
        if !node.has_properties() {
            return false;
        }

        // A formula that coerced to a number is not a formula.
        let formula = match node.property(FORMULA_KEY).and_then(|v| v.as_text()) {
            Some(f) => f,
            None => return false,
        };
        if formula.is_empty() || formula.contains(self.wildcard) {
            return false;
        }

        match node.property(MASS_KEY).and_then(|v| v.as_number()) {
            Some(mass) => mass >= self.min_mass && mass <= self.max_mass,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(formula: Option<&str>, mass: Option<&str>) -> CompoundNode {
        let mut facts = vec![r#"http://purl.obolibrary.org/obo/chebi/charge "0" xsd:string"#.to_string()];
        if let Some(f) = formula {
            facts.push(format!(
                r#"http://purl.obolibrary.org/obo/chebi/formula "{}" xsd:string"#,
                f
            ));
        }
        if let Some(m) = mass {
            facts.push(format!(
                r#"http://purl.obolibrary.org/obo/chebi/monoisotopicmass "{}" xsd:string"#,
                m
            ));
        }
        CompoundNode::with_facts("CHEBI:1", "x", Some(facts))
    }

    #[test]
    fn glucose_is_real() {
        let filter = CompoundFilter::default();
        assert!(filter.is_real_compound(&compound(Some("C6H12O6"), Some("180.16"))));
    }

    #[test]
    fn wildcard_formula_is_a_class() {
        let filter = CompoundFilter::default();
        assert!(!filter.is_real_compound(&compound(Some("R-CH3"), Some("180.16"))));
    }

    #[test]
    fn mass_out_of_range() {
        let filter = CompoundFilter::default();
        assert!(!filter.is_real_compound(&compound(Some("C6H12O6"), Some("2000"))));
        assert!(!filter.is_real_compound(&compound(Some("H2"), Some("2.016"))));
    }

    #[test]
    fn mass_bounds_are_inclusive() {
        let filter = CompoundFilter::default();
        assert!(filter.is_real_compound(&compound(Some("X"), Some("50"))));
        assert!(filter.is_real_compound(&compound(Some("X"), Some("1500"))));
    }

    #[test]
    fn missing_or_empty_values() {
        let filter = CompoundFilter::default();
        assert!(!filter.is_real_compound(&compound(None, Some("180.16"))));
        assert!(!filter.is_real_compound(&compound(Some(""), Some("180.16"))));
        assert!(!filter.is_real_compound(&compound(Some("C6H12O6"), None)));
        assert!(!filter.is_real_compound(&compound(Some("C6H12O6"), Some("heavy"))));
    }

    #[test]
    fn node_without_facts() {
        let filter = CompoundFilter::default();
        assert!(!filter.is_real_compound(&CompoundNode::new("CHEBI:2", "class")));
    }
}

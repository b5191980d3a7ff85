//! Canonical representative selection for equivalence groups.
//!
//! Among the candidates of a group the representative is the row that
//! minimizes, in order: absolute charge, whether the name is *not* purely
//! alphabetic (spaces ignored), name length in characters, and finally the
//! id, so the choice never depends on input order.
//!
//! Rows without a numeric charge do not take part in the selection.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::id::EntityId;
use crate::table::{AttributeRow, AttributeTable};

pub const CHARGE_KEY: &str = "charge";

/// The chosen member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Representative {
    pub id: EntityId,
    pub name: String,
}

/// `true` if the name, spaces removed, is non-empty and entirely alphabetic.
pub fn is_simple_name(name: &str) -> bool {
    let mut chars = name.chars().filter(|c| *c != ' ').peekable();
    chars.peek().is_some() && chars.all(char::is_alphabetic)
}

struct Candidate<'a> {
    row: &'a AttributeRow,
    abs_charge: f64,
    simple_name: bool,
    name_length: usize,
}

impl<'a> Candidate<'a> {
    fn from_row(row: &'a AttributeRow) -> Option<Self> {
        let charge = row.get(CHARGE_KEY)?.as_number()?;
        if charge.is_nan() {
            return None;
        }
        Some(Candidate {
            row,
            abs_charge: charge.abs(),
            simple_name: is_simple_name(&row.name),
            name_length: row.name.chars().count(),
        })
    }

    fn rank(&self, other: &Self) -> Ordering {
        self.abs_charge
            .total_cmp(&other.abs_charge)
            .then(other.simple_name.cmp(&self.simple_name))
            .then(self.name_length.cmp(&other.name_length))
            .then_with(|| self.row.id.cmp(&other.row.id))
    }
}

/// Picks the canonical member of `ids` from the attribute table.
///
/// Returns `None` when no id is present in the table with a numeric charge.
pub fn resolve_representative<S: AsRef<str>>(
    table: &AttributeTable,
    ids: &[S],
) -> Option<Representative> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| id.as_ref())
        .filter(|id| seen.insert(*id))
        .filter_map(|id| table.get(id))
        .filter_map(Candidate::from_row)
        .min_by(|a, b| a.rank(b))
        .map(|c| Representative {
            id: c.row.id.clone(),
            name: c.row.name.clone(),
        })
}

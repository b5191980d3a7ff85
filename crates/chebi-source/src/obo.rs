//! Reader for OBO 1.2 flat files.
//!
//! Only `[Term]` stanzas are read; header lines and other stanza types
//! (`[Typedef]`, `[Instance]`) are skipped. Within a term the reader keeps
//! `id`, `name`, every `property_value`, `is_a` and `relationship` lines.
//! Terms tagged `is_obsolete: true` are dropped along with their relations.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chebi_core::{EntityId, Relation};
use tracing::debug;

use crate::error::SourceError;
use crate::traits::{OntologySource, SourceRelation, SourceTerm};

/// A parsed OBO document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OboDocument {
    terms: Vec<SourceTerm>,
    relations: Vec<SourceRelation>,
}

/// Term stanza being accumulated.
#[derive(Debug, Default)]
struct PendingTerm {
    start_line: usize,
    id: Option<String>,
    name: Option<String>,
    facts: Vec<String>,
    links: Vec<(Relation, String)>,
    obsolete: bool,
}

/// Drops a trailing `! comment` and `{modifier}` block from a value.
fn strip_trailing(value: &str) -> &str {
    let value = match value.find(" !") {
        Some(pos) => &value[..pos],
        None => value,
    };
    let value = match value.find(" {") {
        Some(pos) => &value[..pos],
        None => value,
    };
    value.trim()
}

impl OboDocument {
    pub fn parse(text: &str) -> Result<Self, SourceError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, SourceError> {
        let mut doc = OboDocument::default();
        let mut current: Option<PendingTerm> = None;
        let mut skipped_obsolete = 0usize;

        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = n + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('!') {
                continue;
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                if let Some(term) = current.take() {
                    skipped_obsolete += doc.finish(term)? as usize;
                }
                if trimmed == "[Term]" {
                    current = Some(PendingTerm {
                        start_line: line_no,
                        ..PendingTerm::default()
                    });
                }
                continue;
            }

            // Header and non-term stanza lines.
            let term = match current.as_mut() {
                Some(term) => term,
                None => continue,
            };

            let (tag, value) = trimmed.split_once(':').ok_or_else(|| SourceError::Parse {
                line: line_no,
                reason: format!("expected `tag: value`, got `{}`", trimmed),
            })?;
            let value = value.trim();

            match tag.trim() {
                "id" => term.id = Some(value.to_string()),
                "name" => term.name = Some(value.to_string()),
                "property_value" => term.facts.push(value.to_string()),
                "is_obsolete" => term.obsolete = value == "true",
                "is_a" => {
                    let target = strip_trailing(value);
                    if target.is_empty() {
                        return Err(SourceError::Parse {
                            line: line_no,
                            reason: "is_a without a target".into(),
                        });
                    }
                    term.links.push((Relation::IsA, target.to_string()));
                }
                "relationship" => {
                    let mut parts = strip_trailing(value).split_whitespace();
                    match (parts.next(), parts.next()) {
                        (Some(kind), Some(target)) => {
                            term.links.push((Relation::parse(kind), target.to_string()));
                        }
                        _ => {
                            return Err(SourceError::Parse {
                                line: line_no,
                                reason: format!("malformed relationship `{}`", value),
                            })
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(term) = current.take() {
            skipped_obsolete += doc.finish(term)? as usize;
        }

        debug!(
            "parsed OBO: {} terms, {} relations, {} obsolete terms skipped",
            doc.terms.len(),
            doc.relations.len(),
            skipped_obsolete
        );
        Ok(doc)
    }

    /// Moves a completed stanza into the document. Returns `true` if the
    /// term was obsolete and therefore dropped.
    fn finish(&mut self, term: PendingTerm) -> Result<bool, SourceError> {
        let id = term.id.ok_or_else(|| SourceError::Parse {
            line: term.start_line,
            reason: "term stanza without an id".into(),
        })?;
        if term.obsolete {
            return Ok(true);
        }

        let id = EntityId::new(id);
        for (relation, target) in term.links {
            self.relations.push(SourceRelation {
                from: id.clone(),
                to: EntityId::new(target),
                relation,
            });
        }
        self.terms.push(SourceTerm {
            id,
            name: term.name.unwrap_or_default(),
            property_facts: if term.facts.is_empty() {
                None
            } else {
                Some(term.facts)
            },
        });
        Ok(false)
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

impl OntologySource for OboDocument {
    fn terms(&self) -> Box<dyn Iterator<Item = SourceTerm> + '_> {
        Box::new(self.terms.iter().cloned())
    }

    fn relations(&self) -> Box<dyn Iterator<Item = SourceRelation> + '_> {
        Box::new(self.relations.iter().cloned())
    }
}

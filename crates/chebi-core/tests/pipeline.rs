//! End-to-end curation over a small ChEBI-shaped fixture: prune, tabulate,
//! then resolve a protonation-state group to its representative.

use chebi_core::{
    build_attribute_table, get_group, resolve_representative, CompoundNode, OntologyGraph,
    PruningEngine, Relation, Traversal, DEFAULT_KEYS,
};

fn facts(formula: &str, mass: &str, charge: &str) -> Option<Vec<String>> {
    Some(vec![
        format!(r#"http://purl.obolibrary.org/obo/chebi/formula "{}" xsd:string"#, formula),
        format!(r#"http://purl.obolibrary.org/obo/chebi/monoisotopicmass "{}" xsd:string"#, mass),
        format!(r#"http://purl.obolibrary.org/obo/chebi/charge "{}" xsd:string"#, charge),
    ])
}

fn fixture() -> OntologyGraph {
    let nodes = vec![
        CompoundNode::new("CHEBI:24431", "chemical entity"),
        CompoundNode::new("CHEBI:76107", "deuterated compound"),
        CompoundNode::new("CHEBI:25676", "oligopeptide"),
        CompoundNode::new("CHEBI:46761", "dipeptide"),
        CompoundNode::with_facts("CHEBI:30751", "formic acid", facts("CH2O2", "46.00548", "0")),
        CompoundNode::with_facts("CHEBI:16199", "urea", facts("CH4N2O", "60.03236", "0")),
        CompoundNode::with_facts("CHEBI:30769", "citric acid", facts("C6H8O7", "192.02700", "0")),
        CompoundNode::with_facts("CHEBI:35804", "citrate(1-)", facts("C6H7O7", "191.01973", "-1")),
        CompoundNode::with_facts("CHEBI:16947", "citrate(3-)", facts("C6H5O7", "189.00517", "-3")),
        CompoundNode::with_facts("CHEBI:1", "urea-d4", facts("CD4N2O", "64.05747", "0")),
        CompoundNode::with_facts("CHEBI:2", "Ala-Gly", facts("C5H10N2O3", "146.06914", "0")),
        CompoundNode::with_facts("CHEBI:3", "alkyl alcohol", facts("ROH", "100", "0")),
    ];
    let mut graph = OntologyGraph::from_parts(nodes, Vec::new()).unwrap();
    let edges = [
        ("CHEBI:1", "CHEBI:76107", "is_a"),
        ("CHEBI:1", "CHEBI:16199", "has_functional_parent"),
        ("CHEBI:2", "CHEBI:46761", "is_a"),
        ("CHEBI:46761", "CHEBI:25676", "is_a"),
        ("CHEBI:30769", "CHEBI:24431", "is_a"),
        ("CHEBI:30769", "CHEBI:35804", "is_conjugate_acid_of"),
        ("CHEBI:35804", "CHEBI:30769", "is_conjugate_base_of"),
        ("CHEBI:35804", "CHEBI:16947", "is_conjugate_acid_of"),
        ("CHEBI:16947", "CHEBI:35804", "is_conjugate_base_of"),
        ("CHEBI:3", "CHEBI:24431", "is_a"),
        ("CHEBI:16199", "CHEBI:30751", "has_role"),
    ];
    for (from, to, label) in edges {
        graph.add_edge(from, to, Relation::parse(label)).unwrap();
    }
    graph
}

#[test]
fn prepare_curates_fixture() {
    let mut graph = fixture();
    let report = PruningEngine::default().prepare(&mut graph);

    // anchors and their members are gone
    for gone in ["CHEBI:76107", "CHEBI:1", "CHEBI:25676", "CHEBI:46761", "CHEBI:2"] {
        assert!(!graph.has_node(gone), "{} should be pruned", gone);
    }
    // classes, wildcard formulas and light molecules are gone
    for gone in ["CHEBI:24431", "CHEBI:3", "CHEBI:30751"] {
        assert!(!graph.has_node(gone), "{} should be pruned", gone);
    }
    // urea survives: a depth-1 walk from the deuterated anchor does not reach it
    assert!(graph.has_node("CHEBI:16199"));
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.edges().all(|(_, _, r)| Relation::CURATED.contains(r)));

    assert_eq!(report.steps[0].nodes_removed, 2);
    assert_eq!(report.steps[1].nodes_removed, 3);
    assert_eq!(report.steps[2].skipped_anchors.len(), 1);
}

#[test]
fn conjugate_group_resolves_to_neutral_acid() {
    let mut graph = fixture();
    PruningEngine::default().prepare(&mut graph);
    let table = build_attribute_table(&graph, &DEFAULT_KEYS).unwrap();
    assert_eq!(table.len(), graph.node_count());

    let group = get_group(&graph, "CHEBI:35804", 1, Traversal::Both).unwrap();
    assert_eq!(group.len(), 3);

    let rep = resolve_representative(&table, &group).unwrap();
    assert_eq!(rep.id.as_str(), "CHEBI:30769");
    assert_eq!(rep.name, "citric acid");
}

//! Graph building, editing and persistence-shape tests

use super::*;
use crate::claim::ClaimId;
use crate::table::{FeatureRow, FlatTable};
use serde_json::json;

fn feature(term: &str, claim: usize) -> FeatureRow {
    FeatureRow::feature(term, ClaimId::new(claim))
}

fn edge_list(graph: &ConceptGraph) -> Vec<(String, String, String)> {
    graph.edges().map(|e| (e.source, e.target, e.label)).collect()
}

fn triple(source: &str, target: &str, label: &str) -> (String, String, String) {
    (source.to_string(), target.to_string(), label.to_string())
}

/// `a pump` -with-> `a rotor` -on-> `a shaft`, all in claim 1
fn chain_table() -> FlatTable {
    FlatTable::from_rows([
        feature("a pump", 1),
        FeatureRow::relation("with"),
        feature("a rotor", 1),
        FeatureRow::relation("on"),
        feature("a shaft", 1),
    ])
}

mod building {
    use super::*;

    #[test]
    fn relation_row_labels_edge_between_neighbours() {
        let graph = build_graph(&chain_table(), &Palette::default());

        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec!["a pump", "a rotor", "a shaft"]);
        assert_eq!(
            edge_list(&graph),
            vec![triple("a pump", "a rotor", "with"), triple("a rotor", "a shaft", "on")]
        );
    }

    #[test]
    fn reference_tag_on_target_row_blocks_edge() {
        let mut table = chain_table();
        table.set_reference(2, "a pump").unwrap();
        let graph = build_graph(&table, &Palette::default());
        assert_eq!(edge_list(&graph), vec![triple("a rotor", "a shaft", "on")]);
    }

    #[test]
    fn back_reference_resolves_to_first_matching_term() {
        let table = FlatTable::from_rows([
            feature("a pump", 1),
            FeatureRow::reference("a pump"),
            FeatureRow::relation("via"),
            feature("a shaft", 2),
        ]);
        let graph = build_graph(&table, &Palette::default());

        assert_eq!(edge_list(&graph), vec![triple("a pump", "a shaft", "via")]);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn unresolved_back_reference_is_skipped() {
        let table = FlatTable::from_rows([
            feature("a pump", 1),
            FeatureRow::reference("a motor"),
            FeatureRow::relation("via"),
            feature("a shaft", 1),
        ]);
        let graph = build_graph(&table, &Palette::default());

        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains_node("a motor"));
    }

    #[test]
    fn nodes_take_color_of_first_claim() {
        let table = FlatTable::from_rows([
            feature("a pump", 2),
            feature("a rotor", 1),
            feature("a blade", 2),
            feature("a rotor", 3),
            feature("a hub", 3),
        ]);
        let graph = build_graph(&table, &Palette::default());

        let colors: Vec<&str> = graph.nodes().map(|n| n.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "orange", "red", "lime"]);
        assert!(graph.nodes().all(|n| n.subset == 0));
    }

    #[test]
    fn blank_terms_are_not_nodes() {
        let table = FlatTable::from_rows([feature("  ", 1), feature("a pump", 1)]);
        let graph = build_graph(&table, &Palette::default());
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec!["a pump"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn short_and_empty_tables() {
        assert!(build_graph(&FlatTable::new(), &Palette::default()).is_empty());

        let two = FlatTable::from_rows([feature("a pump", 1), feature("a rotor", 1)]);
        let graph = build_graph(&two, &Palette::default());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn ragged_table_is_padded() {
        let table: FlatTable = serde_json::from_value(json!({
            "a_list": ["a pump", "", "a rotor"],
            "prep_list": ["", "in"],
            "Cl_nr": ["Cl_1"]
        }))
        .unwrap();
        let graph = build_graph(&table, &Palette::default());
        assert_eq!(edge_list(&graph), vec![triple("a pump", "a rotor", "in")]);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let a = build_graph(&chain_table(), &Palette::default());
        let b = build_graph(&chain_table(), &Palette::default());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

mod editing {
    use super::*;

    #[test]
    fn added_nodes_are_yellow_and_unique() {
        let mut graph = build_graph(&chain_table(), &Palette::default());
        assert!(graph.add_node("a seal"));
        assert!(!graph.add_node("a seal"));
        assert!(!graph.add_node("a pump"));
        assert_eq!(graph.node("a seal").unwrap().color, INTERACTIVE_NODE_COLOR);
        assert_eq!(graph.node("a pump").unwrap().color, "red");
    }

    #[test]
    fn removing_node_drops_incident_edges() {
        let mut graph = build_graph(&chain_table(), &Palette::default());
        let removed = graph.remove_node("a rotor").unwrap();

        assert_eq!(removed.id, "a rotor");
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.out_degree("a pump"), 0);
        assert_eq!(graph.in_degree("a shaft"), 0);
        assert_eq!(
            graph.remove_node("a rotor"),
            Err(GraphError::NodeNotFound("a rotor".into()))
        );
    }

    #[test]
    fn edge_needs_both_endpoints() {
        let mut graph = build_graph(&chain_table(), &Palette::default());
        assert_eq!(
            graph.add_edge("a pump", "a seal", "in"),
            Err(GraphError::NodeNotFound("a seal".into()))
        );
        assert!(!graph.contains_node("a seal"));
    }

    #[test]
    fn re_adding_edge_overwrites_label_in_place() {
        let mut graph = build_graph(&chain_table(), &Palette::default());
        graph.add_edge("a pump", "a shaft", "around").unwrap();
        graph.add_edge("a pump", "a rotor", "beside").unwrap();

        assert_eq!(
            edge_list(&graph),
            vec![
                triple("a pump", "a rotor", "beside"),
                triple("a pump", "a shaft", "around"),
                triple("a rotor", "a shaft", "on"),
            ]
        );
    }

    #[test]
    fn removing_missing_edge_fails() {
        let mut graph = build_graph(&chain_table(), &Palette::default());
        let removed = graph.remove_edge("a pump", "a rotor").unwrap();
        assert_eq!(removed.label, "with");
        assert_eq!(
            graph.remove_edge("a pump", "a rotor"),
            Err(GraphError::EdgeNotFound {
                from: "a pump".into(),
                to: "a rotor".into()
            })
        );
        assert_eq!(graph.in_degree("a rotor"), 0);
    }

    #[test]
    fn re_added_node_moves_to_end() {
        let mut graph = build_graph(&chain_table(), &Palette::default());
        graph.remove_node("a pump").unwrap();
        graph.add_node("a pump");
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec!["a rotor", "a shaft", "a pump"]);
    }
}

mod persistence {
    use super::*;

    #[test]
    fn serializes_to_network_shape() {
        let graph = build_graph(&chain_table(), &Palette::default());
        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(
            value,
            json!({
                "nodes": [
                    {"id": "a pump", "color": "red"},
                    {"id": "a rotor", "color": "red"},
                    {"id": "a shaft", "color": "red"}
                ],
                "edges": [
                    {"source": "a pump", "target": "a rotor", "label": "with"},
                    {"source": "a rotor", "target": "a shaft", "label": "on"}
                ]
            })
        );
    }

    #[test]
    fn restores_with_defaults() {
        let graph: ConceptGraph = serde_json::from_value(json!({
            "nodes": [{"id": "a pump"}],
            "edges": [{"source": "a pump", "target": "a shaft"}]
        }))
        .unwrap();

        assert_eq!(graph.node("a pump").unwrap().color, DEFAULT_NODE_COLOR);
        assert_eq!(graph.node("a shaft").unwrap().color, DEFAULT_NODE_COLOR);
        assert_eq!(graph.edge_label("a pump", "a shaft"), Some(""));
    }

    #[test]
    fn round_trips_edits() {
        let mut graph = build_graph(&chain_table(), &Palette::default());
        graph.add_node("a seal");
        graph.add_edge("a seal", "a pump", "around").unwrap();

        let restored = ConceptGraph::from_network(&graph.to_network());
        assert_eq!(restored, graph);
    }
}

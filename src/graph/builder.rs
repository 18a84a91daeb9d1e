//! Positional edge inference over the flattened feature table

use super::concept::ConceptGraph;
use super::node::ConceptNode;
use super::palette::Palette;
use crate::table::FlatTable;
use tracing::{debug, info};

fn present(cell: &str) -> bool {
    !cell.trim().is_empty()
}

/// Build the concept graph from the (possibly hand-edited) flat table.
///
/// Every non-blank term becomes a node colored after the first claim it
/// appears in. Edges are inferred from sliding windows of three rows
/// `(i, i+1, i+2)`, labelled with `prep_list[i+1]`:
///
/// - if `a_list[i]` is set, `the_list[i+2]` is blank and `a_list[i+2]` is
///   set, draw `a_list[i] -> a_list[i+2]`;
/// - otherwise, if `a_list[i]` is blank, `the_list[i]` is set and
///   `a_list[i+2]` is set, resolve `the_list[i]` to the first equal term of
///   `a_list` and draw `resolved -> a_list[i+2]`. Unresolved references
///   produce no edge.
pub fn build_graph(table: &FlatTable, palette: &Palette) -> ConceptGraph {
    let mut table = table.clone();
    table.normalize();
    let FlatTable {
        a_list,
        prep_list,
        the_list,
        cl_nr,
    } = &table;

    let mut graph = ConceptGraph::new();
    let mut colors = palette.assigner();
    for (term, claim) in a_list.iter().zip(cl_nr) {
        if present(term) && !graph.contains_node(term) {
            graph.insert_node(ConceptNode::new(term.as_str(), colors.color_for(claim)));
        }
    }

    for i in 0..a_list.len().saturating_sub(2) {
        let label = prep_list[i + 1].as_str();
        let target = a_list[i + 2].as_str();

        let source = if present(&a_list[i]) {
            (!present(&the_list[i + 2]) && present(target)).then(|| a_list[i].as_str())
        } else if present(&the_list[i]) && present(target) {
            let reference = the_list[i].as_str();
            let resolved = a_list.iter().find(|term| term.as_str() == reference);
            if resolved.is_none() {
                debug!(row = i, reference, "back-reference matches no feature; skipped");
            }
            resolved.map(String::as_str)
        } else {
            None
        };

        if let Some(source) = source {
            graph.connect(source, target, label);
        }
    }

    info!(
        rows = a_list.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built concept graph"
    );
    graph
}

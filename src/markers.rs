//! Marker generation: textual path combinations from head nodes

use crate::graph::{ConceptGraph, NetworkData};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Prefix of every marker string unless configured otherwise
pub const DEFAULT_MARKER_PREFIX: &str = "10UG";

const SECTION_SEPARATOR: &str = "---   ---   ---   --- ";

/// Persisted `"Markers"` record field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSummary {
    /// Every node term in graph order
    #[serde(rename = "Combinations", default)]
    pub combinations: Vec<String>,
    /// Nodes without incoming edges, in graph order
    #[serde(rename = "Heads", default)]
    pub heads: Vec<String>,
    /// Formatted markers per head; heads without any path are absent
    #[serde(rename = "Branches", default)]
    pub branches: IndexMap<String, Vec<String>>,
}

/// Nodes with in-degree zero, in graph order
pub fn head_nodes(graph: &ConceptGraph) -> Vec<String> {
    graph
        .node_ids()
        .filter(|id| graph.in_degree(id) == 0)
        .map(str::to_string)
        .collect()
}

/// Every simple path of two or more nodes starting at `start`.
///
/// Depth-first over successors in insertion order; a path is recorded
/// once all of its extensions have been explored, so longer paths come
/// before their prefixes. A node already on the path is never re-entered,
/// which keeps cyclic graphs finite.
pub fn find_branches(graph: &ConceptGraph, start: &str) -> Vec<Vec<String>> {
    let mut branches = Vec::new();
    let mut path = vec![start.to_string()];
    walk(graph, &mut path, &mut branches);
    branches
}

fn walk(graph: &ConceptGraph, path: &mut Vec<String>, branches: &mut Vec<Vec<String>>) {
    let Some(last) = path.last().cloned() else {
        return;
    };
    for next in graph.successors(&last) {
        if path.iter().any(|visited| visited == next) {
            continue;
        }
        path.push(next.to_string());
        walk(graph, path, branches);
        path.pop();
    }
    if path.len() > 1 {
        branches.push(path.clone());
    }
}

/// `"<prefix> (t1, t2, …, tK)"`
pub fn format_marker(prefix: &str, branch: &[String]) -> String {
    format!("{prefix} ({})", branch.join(", "))
}

impl MarkerSummary {
    /// Compute combinations, heads and branch markers for a graph.
    pub fn generate(graph: &ConceptGraph, prefix: &str) -> Self {
        let combinations: Vec<String> = graph.node_ids().map(str::to_string).collect();
        let heads = head_nodes(graph);

        if heads.is_empty() && !graph.is_empty() {
            debug!(nodes = graph.node_count(), "graph has no head node; no branches generated");
        }

        let branches: IndexMap<String, Vec<String>> = heads
            .iter()
            .filter_map(|head| {
                let markers: Vec<String> = find_branches(graph, head)
                    .iter()
                    .map(|branch| format_marker(prefix, branch))
                    .collect();
                (!markers.is_empty()).then(|| (head.clone(), markers))
            })
            .collect();

        info!(
            nodes = combinations.len(),
            heads = heads.len(),
            markers = branches.values().map(Vec::len).sum::<usize>(),
            "generated markers"
        );

        Self {
            combinations,
            heads,
            branches,
        }
    }

    /// Markers for a saved network.
    ///
    /// Combinations list only the saved nodes; an edge endpoint missing
    /// from the node list still takes part in heads and branches.
    pub fn from_network(network: &NetworkData, prefix: &str) -> Self {
        let graph = ConceptGraph::from_network(network);
        Self {
            combinations: network.nodes.iter().map(|node| node.id.clone()).collect(),
            ..Self::generate(&graph, prefix)
        }
    }

    /// Total number of branch markers
    pub fn marker_count(&self) -> usize {
        self.branches.values().map(Vec::len).sum()
    }

    /// Render as the editable text block: one section per field, each
    /// followed by a separator line.
    pub fn to_display_text(&self) -> String {
        let mut text = String::new();
        for (title, entries) in [("Combinations", &self.combinations), ("Heads", &self.heads)] {
            text.push_str(&format!("{title}\n\n"));
            text.push_str(&entries.join("\n"));
            text.push('\n');
            push_separator(&mut text);
        }

        text.push_str("Branches\n\n");
        for (head, markers) in &self.branches {
            text.push_str(&format!("{head}:\n"));
            text.push_str(&markers.join("\n"));
            text.push('\n');
        }
        push_separator(&mut text);

        text.trim().to_string()
    }
}

fn push_separator(text: &mut String) {
    text.push('\n');
    text.push_str(SECTION_SEPARATOR);
    text.push_str("\n\n");
}

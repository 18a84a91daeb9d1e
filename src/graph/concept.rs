//! ConceptGraph: the directed feature graph of one case

use super::edge::ConceptEdge;
use super::node::ConceptNode;
use super::palette::{DEFAULT_NODE_COLOR, INTERACTIVE_NODE_COLOR};
use super::GraphError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Persisted graph shape, stored as `"Network"` in the case record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub nodes: Vec<NetworkNode>,
    #[serde(default)]
    pub edges: Vec<ConceptEdge>,
}

/// A persisted node; a missing color reads as the default node color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_NODE_COLOR.to_string()
}

/// Directed graph keyed by feature term.
///
/// Nodes iterate in insertion order. Edges iterate by source node order,
/// then by insertion order among the source's outgoing edges. A removed
/// node or edge that is added again goes to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NetworkData", into = "NetworkData")]
pub struct ConceptGraph {
    nodes: IndexMap<String, ConceptNode>,
    /// source -> (target -> label)
    outgoing: IndexMap<String, IndexMap<String, String>>,
    /// target -> sources
    incoming: IndexMap<String, IndexSet<String>>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // === Interactive mutation ===

    /// Add a node with the interactive color. Returns false if it already exists.
    pub fn add_node(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return false;
        }
        self.insert_node(ConceptNode::new(name, INTERACTIVE_NODE_COLOR));
        true
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, name: &str) -> Result<ConceptNode, GraphError> {
        let node = self
            .nodes
            .shift_remove(name)
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))?;

        if let Some(targets) = self.outgoing.shift_remove(name) {
            for target in targets.keys() {
                if let Some(sources) = self.incoming.get_mut(target) {
                    sources.shift_remove(name);
                }
            }
        }
        if let Some(sources) = self.incoming.shift_remove(name) {
            for source in &sources {
                if let Some(targets) = self.outgoing.get_mut(source) {
                    targets.shift_remove(name);
                }
            }
        }
        Ok(node)
    }

    /// Add an edge, or relabel it if it exists. Both endpoints must exist.
    pub fn add_edge(&mut self, from: &str, to: &str, label: impl Into<String>) -> Result<(), GraphError> {
        for endpoint in [from, to] {
            if !self.nodes.contains_key(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.to_string()));
            }
        }
        self.connect(from, to, label);
        Ok(())
    }

    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<ConceptEdge, GraphError> {
        let label = self
            .outgoing
            .get_mut(from)
            .and_then(|targets| targets.shift_remove(to))
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        if let Some(sources) = self.incoming.get_mut(to) {
            sources.shift_remove(from);
        }
        Ok(ConceptEdge::new(from, to, label))
    }

    // === Construction ===

    /// Insert a node unless a node with the same term exists
    pub(crate) fn insert_node(&mut self, node: ConceptNode) {
        if self.nodes.contains_key(&node.id) {
            return;
        }
        self.outgoing.insert(node.id.clone(), IndexMap::new());
        self.incoming.insert(node.id.clone(), IndexSet::new());
        self.nodes.insert(node.id.clone(), node);
    }

    /// Insert or relabel an edge, creating missing endpoints with the
    /// default node color.
    pub(crate) fn connect(&mut self, from: &str, to: &str, label: impl Into<String>) {
        for endpoint in [from, to] {
            self.insert_node(ConceptNode::new(endpoint, DEFAULT_NODE_COLOR));
        }
        self.outgoing
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), label.into());
        self.incoming
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
    }

    // === Queries ===

    pub fn node(&self, name: &str) -> Option<&ConceptNode> {
        self.nodes.get(name)
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ConceptNode> {
        self.nodes.values()
    }

    /// Node terms in graph order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Label of the edge `from -> to`, if it exists
    pub fn edge_label(&self, from: &str, to: &str) -> Option<&str> {
        self.outgoing.get(from)?.get(to).map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = ConceptEdge> + '_ {
        self.nodes.keys().flat_map(move |source| {
            self.outgoing
                .get(source)
                .into_iter()
                .flatten()
                .map(move |(target, label)| ConceptEdge::new(source.as_str(), target.as_str(), label.as_str()))
        })
    }

    /// Targets of `name`'s outgoing edges, in insertion order
    pub fn successors(&self, name: &str) -> impl Iterator<Item = &str> {
        self.outgoing
            .get(name)
            .into_iter()
            .flat_map(|targets| targets.keys().map(String::as_str))
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.incoming.get(name).map_or(0, IndexSet::len)
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.outgoing.get(name).map_or(0, IndexMap::len)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Persistence shape ===

    pub fn to_network(&self) -> NetworkData {
        NetworkData {
            nodes: self
                .nodes
                .values()
                .map(|n| NetworkNode {
                    id: n.id.clone(),
                    color: n.color.clone(),
                })
                .collect(),
            edges: self.edges().collect(),
        }
    }

    /// Restore a persisted graph. Edge endpoints missing from the node
    /// list are created with the default node color.
    pub fn from_network(network: &NetworkData) -> Self {
        let mut graph = Self::new();
        for node in &network.nodes {
            graph.insert_node(ConceptNode::new(node.id.as_str(), node.color.as_str()));
        }
        for edge in &network.edges {
            graph.connect(&edge.source, &edge.target, edge.label.as_str());
        }
        graph
    }
}

impl From<NetworkData> for ConceptGraph {
    fn from(network: NetworkData) -> Self {
        Self::from_network(&network)
    }
}

impl From<ConceptGraph> for NetworkData {
    fn from(graph: ConceptGraph) -> Self {
        graph.to_network()
    }
}

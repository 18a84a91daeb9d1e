//! Concept graph: nodes are feature terms, edges are inferred relations

mod builder;
mod concept;
mod edge;
mod node;
mod palette;

#[cfg(test)]
mod tests;

pub use builder::build_graph;
pub use concept::{ConceptGraph, NetworkData, NetworkNode};
pub use edge::ConceptEdge;
pub use node::ConceptNode;
pub use palette::{
    ClaimColors, LegendEntry, Palette, DEFAULT_NODE_COLOR, DEFAULT_PALETTE, INTERACTIVE_NODE_COLOR,
};

use thiserror::Error;

/// Failed lookups during interactive graph editing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },
}

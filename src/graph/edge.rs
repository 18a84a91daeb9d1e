//! Directed, labelled edges between concept nodes

use serde::{Deserialize, Serialize};

/// A directed edge; at most one exists per ordered node pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEdge {
    pub source: String,
    pub target: String,
    /// Relation label, usually a preposition ("on", "via"); may be empty
    #[serde(default)]
    pub label: String,
}

impl ConceptEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}

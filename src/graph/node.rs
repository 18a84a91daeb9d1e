//! Node representation in the concept graph

use serde::{Deserialize, Serialize};

/// A feature term in the concept graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptNode {
    /// The feature term; unique within a graph
    pub id: String,
    /// Color of the originating claim
    pub color: String,
    /// Layer index for layered layouts; always 0 for built graphs
    #[serde(skip)]
    pub subset: u32,
}

impl ConceptNode {
    pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            subset: 0,
        }
    }
}

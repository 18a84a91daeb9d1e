//! claimgraph: patent claim analysis from feature extraction to markers
//!
//! A claim set passes through four stages, each reading the record field
//! written by the previous one:
//!
//! 1. **Extraction**: claim sentences are cleaned and split into
//!    noun-phrase features (`extract`).
//! 2. **Feature table**: features are arranged per claim, reviewed and
//!    flattened into tagged rows (`table`).
//! 3. **Concept graph**: edges between features are inferred from row
//!    positions and relation tags, then edited by hand (`graph`).
//! 4. **Markers**: every path from a head node becomes a marker string
//!    (`markers`).
//!
//! Cases tie the stages together and are persisted through a `CaseStore`.
//!
//! # Example
//!
//! ```
//! use claimgraph::{build_graph, ChunkExtractor, FeatureTable, MarkerSummary, Palette};
//!
//! let claim = "A pump comprising a rotor arranged in a housing.";
//! let features = ChunkExtractor::shared().extract(claim);
//!
//! let mut by_claim = indexmap::IndexMap::new();
//! by_claim.insert(claimgraph::ClaimId::new(1), features);
//! let table = FeatureTable::from_claim_features(&by_claim);
//!
//! let graph = build_graph(&table.flatten(), &Palette::default());
//! let markers = MarkerSummary::generate(&graph, "10UG");
//! assert_eq!(markers.combinations.len(), graph.node_count());
//! ```

pub mod case;
pub mod claim;
pub mod config;
mod error;
pub mod extract;
pub mod graph;
pub mod markers;
pub mod report;
pub mod storage;
pub mod table;

pub use case::{CaseName, CaseRecord, CaseSession, RowTag, Workbench};
pub use claim::ClaimId;
pub use config::{Config, ConfigError, StoreKind};
pub use error::{ClaimGraphError, ClaimGraphResult};
pub use extract::{extract_claims, ChunkExtractor, ExtractedClaims, Highlighter, NounPhraseParser};
pub use graph::{build_graph, ConceptEdge, ConceptGraph, ConceptNode, GraphError, NetworkData, Palette};
pub use markers::MarkerSummary;
pub use storage::{CaseStore, JsonFileStore, OpenStore, SqliteStore, StorageError, StorageResult};
pub use table::{FeatureRow, FeatureTable, FlatTable, TableError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

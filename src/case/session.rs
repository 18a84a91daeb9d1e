//! One case being worked on: the record plus the in-memory working graph

use super::name::CaseName;
use super::record::{fields, general_field, CaseRecord};
use crate::claim::ClaimId;
use crate::error::{ClaimGraphError, ClaimGraphResult};
use crate::extract::{extract_claims, ChunkExtractor, ExtractedClaims, Highlighter, NounPhraseParser};
use crate::graph::{build_graph, ConceptEdge, ConceptGraph, ConceptNode, LegendEntry, Palette};
use crate::markers::MarkerSummary;
use crate::table::{FeatureRow, FeatureTable, FlatTable};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info};

/// Which tag column of a flat-table row to edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTag {
    /// Edge label carried by the row (`prep_list`)
    Relation(String),
    /// Earlier term the row refers back to (`the_list`)
    Reference(String),
}

/// A case opened for editing.
///
/// Each stage reads the record field written by the previous one and
/// writes its own. The concept graph is edited in memory and only reaches
/// the record through [`CaseSession::save_network`].
#[derive(Debug, Clone)]
pub struct CaseSession {
    name: CaseName,
    record: CaseRecord,
    graph: Option<ConceptGraph>,
}

impl CaseSession {
    pub fn new(name: CaseName, record: CaseRecord) -> Self {
        Self {
            name,
            record,
            graph: None,
        }
    }

    pub fn name(&self) -> &CaseName {
        &self.name
    }

    pub fn record(&self) -> &CaseRecord {
        &self.record
    }

    pub fn into_record(self) -> CaseRecord {
        self.record
    }

    // === General information ===

    /// Set one of the free-text fields and stamp the record date
    pub fn set_general(&mut self, field: &str, value: impl Into<String>, today: NaiveDate) -> ClaimGraphResult<()> {
        let key = general_field(field).ok_or_else(|| ClaimGraphError::UnknownField(field.to_string()))?;
        self.record.set_text(key, value);
        self.record.stamp_date(today);
        Ok(())
    }

    // === Feature extraction ===

    /// Run extraction over a pasted claim set and store its results.
    ///
    /// Writes the cleaned claims, the raw features, the filtered feature
    /// table and its flattening. Blank input changes nothing.
    pub fn extract<P: NounPhraseParser>(
        &mut self,
        claims_text: &str,
        extractor: &ChunkExtractor<P>,
        highlighter: &Highlighter,
    ) -> ClaimGraphResult<(ExtractedClaims, FeatureTable)> {
        let extracted = extract_claims(claims_text, extractor, highlighter);
        if extracted.is_empty() {
            debug!(case = %self.name, "no claims to extract");
            return Ok((extracted, FeatureTable::default()));
        }

        let raw = extracted.features_by_id();
        let table = FeatureTable::from_claim_features(&raw);
        self.record.set_user_claims(&extracted.claims_by_id())?;
        self.record.set_feature_table(&raw)?;
        self.save_feature_table(&table)?;

        info!(case = %self.name, claims = extracted.claim_count(), "stored extracted features");
        Ok((extracted, table))
    }

    /// The reviewed feature table, as last saved
    pub fn feature_table(&self) -> ClaimGraphResult<FeatureTable> {
        let edited = self
            .record
            .edited_feature_table()?
            .ok_or(ClaimGraphError::MissingStage(fields::EDITED_FEATURE_TABLE))?;
        Ok(FeatureTable::from_columns(edited))
    }

    /// Store a reviewed feature table and re-flatten it.
    ///
    /// Flattening starts every row with empty tags, so earlier relation
    /// and reference edits are discarded.
    pub fn save_feature_table(&mut self, table: &FeatureTable) -> ClaimGraphResult<()> {
        self.record.set_edited_feature_table(&table.edited_features())?;
        self.record.set_flat_table(&table.flatten())?;
        Ok(())
    }

    /// Set or clear one feature cell, then re-flatten
    pub fn set_feature_cell(&mut self, claim: &ClaimId, row: usize, term: Option<String>) -> ClaimGraphResult<()> {
        let mut table = self.feature_table()?;
        table.set_cell(claim, row, term)?;
        self.save_feature_table(&table)
    }

    /// Append a feature row holding `cells`, then re-flatten.
    ///
    /// Returns the new row's index. A row left without any term is not
    /// kept once the table is saved.
    pub fn add_feature_row(&mut self, cells: &[(ClaimId, String)]) -> ClaimGraphResult<usize> {
        let mut table = self.feature_table()?;
        table.add_row();
        let row = table.row_count() - 1;
        for (claim, term) in cells {
            table.set_cell(claim, row, Some(term.clone()))?;
        }
        self.save_feature_table(&table)?;
        Ok(row)
    }

    pub fn remove_feature_row(&mut self, row: usize) -> ClaimGraphResult<()> {
        let mut table = self.feature_table()?;
        table.remove_row(row)?;
        self.save_feature_table(&table)
    }

    // === Flat table ===

    pub fn flat_table(&self) -> ClaimGraphResult<FlatTable> {
        self.record
            .flat_table()?
            .ok_or(ClaimGraphError::MissingStage(fields::CONCATENATED_DATAFRAME))
    }

    pub fn save_flat_table(&mut self, table: &FlatTable) -> ClaimGraphResult<()> {
        self.record.set_flat_table(table)?;
        Ok(())
    }

    /// Set the relation label or back-reference of one flat-table row
    pub fn tag_row(&mut self, row: usize, tag: RowTag) -> ClaimGraphResult<()> {
        let mut table = self.flat_table()?;
        match tag {
            RowTag::Relation(label) => table.set_relation(row, label)?,
            RowTag::Reference(term) => table.set_reference(row, term)?,
        }
        self.save_flat_table(&table)
    }

    /// Insert a flat-table row before `row`.
    ///
    /// A row with an empty term and a reference is how a back-reference
    /// edge is expressed: the referenced feature is linked to the term two
    /// rows below.
    pub fn insert_row(&mut self, row: usize, entry: FeatureRow) -> ClaimGraphResult<()> {
        let mut table = self.flat_table()?;
        table.insert(row, entry)?;
        debug!(case = %self.name, row, "inserted flat-table row");
        self.save_flat_table(&table)
    }

    pub fn remove_row(&mut self, row: usize) -> ClaimGraphResult<FeatureRow> {
        let mut table = self.flat_table()?;
        let removed = table.remove(row)?;
        self.save_flat_table(&table)?;
        Ok(removed)
    }

    // === Concept graph ===

    /// Rebuild the working graph from the flat table, discarding edits
    pub fn build_graph(&mut self, palette: &Palette) -> ClaimGraphResult<&ConceptGraph> {
        let table = self.flat_table()?;
        Ok(&*self.graph.insert(build_graph(&table, palette)))
    }

    /// The working graph: the one in memory, else the saved network, else
    /// a fresh build from the flat table.
    pub fn graph(&mut self, palette: &Palette) -> ClaimGraphResult<&mut ConceptGraph> {
        if self.graph.is_none() {
            let graph = match self.record.network()? {
                Some(saved) => saved,
                None => build_graph(&self.flat_table()?, palette),
            };
            self.graph = Some(graph);
        }
        self.graph
            .as_mut()
            .ok_or(ClaimGraphError::MissingStage(fields::NETWORK))
    }

    pub fn add_node(&mut self, name: &str, palette: &Palette) -> ClaimGraphResult<bool> {
        Ok(self.graph(palette)?.add_node(name))
    }

    pub fn remove_node(&mut self, name: &str, palette: &Palette) -> ClaimGraphResult<ConceptNode> {
        Ok(self.graph(palette)?.remove_node(name)?)
    }

    pub fn add_edge(&mut self, from: &str, to: &str, label: &str, palette: &Palette) -> ClaimGraphResult<()> {
        Ok(self.graph(palette)?.add_edge(from, to, label)?)
    }

    pub fn remove_edge(&mut self, from: &str, to: &str, palette: &Palette) -> ClaimGraphResult<ConceptEdge> {
        Ok(self.graph(palette)?.remove_edge(from, to)?)
    }

    /// Persist the working graph into `"Network"`
    pub fn save_network(&mut self) -> ClaimGraphResult<()> {
        let graph = self
            .graph
            .as_ref()
            .ok_or(ClaimGraphError::MissingStage(fields::NETWORK))?;
        self.record.set_network(graph)?;
        info!(case = %self.name, nodes = graph.node_count(), edges = graph.edge_count(), "saved network");
        Ok(())
    }

    /// Claim color legend, one entry per distinct claim in the flat table
    pub fn legend(&self, palette: &Palette) -> ClaimGraphResult<Vec<LegendEntry>> {
        let table = self.flat_table()?;
        let claims: HashSet<&str> = table
            .cl_nr
            .iter()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
            .collect();
        Ok(palette.legend(claims.len()))
    }

    // === Markers ===

    /// Generate markers from the saved network and store them
    pub fn generate_markers(&mut self, prefix: &str) -> ClaimGraphResult<MarkerSummary> {
        let network = self
            .record
            .network_data()?
            .ok_or(ClaimGraphError::MissingStage(fields::NETWORK))?;
        let markers = MarkerSummary::from_network(&network, prefix);
        self.record.set_markers(&markers)?;
        Ok(markers)
    }
}

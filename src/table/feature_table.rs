//! Rectangular per-claim feature table

use super::flat::FlatTable;
use super::TableError;
use crate::claim::ClaimId;
use indexmap::IndexMap;
use std::fmt;
use tracing::debug;

/// Prefixes marking a term as a back-reference rather than a new feature
pub const BACK_REFERENCE_PREFIXES: [&str; 2] = ["the ", "said "];

/// Whether `term` starts (case-insensitively) with "the " or "said "
pub fn is_back_reference(term: &str) -> bool {
    let lowered = term.to_lowercase();
    BACK_REFERENCE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// One claim column; `None` cells are padding or cleared cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureColumn {
    pub claim: ClaimId,
    pub cells: Vec<Option<String>>,
}

impl FeatureColumn {
    /// Non-empty cells, top to bottom
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().filter_map(|c| c.as_deref())
    }
}

/// Feature table with one column per claim, padded to equal height.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureTable {
    columns: Vec<FeatureColumn>,
    rows: usize,
}

impl FeatureTable {
    /// Build the table for claims `1..=claim_count` from extracted features.
    ///
    /// `features` is keyed by 1-based claim number. Back-reference terms are
    /// filtered out; claims without an entry get an empty column.
    pub fn build(features: &IndexMap<usize, Vec<String>>, claim_count: usize) -> Self {
        let columns = (1..=claim_count).map(|number| {
            let terms = features.get(&number).map(Vec::as_slice).unwrap_or(&[]);
            let kept = terms
                .iter()
                .filter(|term| !is_back_reference(term))
                .cloned()
                .collect::<Vec<_>>();
            (ClaimId::new(number), kept)
        });
        let table = Self::from_columns(columns);
        debug!(claims = claim_count, rows = table.rows, "built feature table");
        table
    }

    /// Build from extracted features keyed by claim label, in map order
    pub fn from_claim_features(features: &IndexMap<ClaimId, Vec<String>>) -> Self {
        let by_number: IndexMap<usize, Vec<String>> = features
            .values()
            .enumerate()
            .map(|(i, terms)| (i + 1, terms.clone()))
            .collect();
        Self::build(&by_number, features.len())
    }

    /// Build from already reviewed columns without filtering.
    ///
    /// Used when re-entering the stage from a saved `"Edited Feature Table"`.
    pub fn from_columns<I, T>(columns: I) -> Self
    where
        I: IntoIterator<Item = (ClaimId, T)>,
        T: IntoIterator<Item = String>,
    {
        let mut columns: Vec<FeatureColumn> = columns
            .into_iter()
            .map(|(claim, terms)| FeatureColumn {
                claim,
                cells: terms
                    .into_iter()
                    .map(|t| Some(t).filter(|t| !t.trim().is_empty()))
                    .collect(),
            })
            .collect();
        let rows = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(rows, None);
        }
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn claim_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.terms().next().is_none())
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column(&self, claim: &ClaimId) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| &c.claim == claim)
    }

    pub fn cell(&self, claim: &ClaimId, row: usize) -> Option<&str> {
        self.column(claim)?.cells.get(row)?.as_deref()
    }

    /// Set or clear one cell. Writing past the last row grows the table.
    pub fn set_cell(
        &mut self,
        claim: &ClaimId,
        row: usize,
        value: Option<String>,
    ) -> Result<(), TableError> {
        let idx = self
            .columns
            .iter()
            .position(|c| &c.claim == claim)
            .ok_or_else(|| TableError::ColumnNotFound(claim.clone()))?;
        if row >= self.rows {
            self.rows = row + 1;
            for column in &mut self.columns {
                column.cells.resize(self.rows, None);
            }
        }
        self.columns[idx].cells[row] = value.filter(|v| !v.trim().is_empty());
        Ok(())
    }

    /// Append an empty row
    pub fn add_row(&mut self) {
        self.rows += 1;
        for column in &mut self.columns {
            column.cells.push(None);
        }
    }

    pub fn remove_row(&mut self, row: usize) -> Result<(), TableError> {
        if row >= self.rows {
            return Err(TableError::RowOutOfRange(row));
        }
        self.rows -= 1;
        for column in &mut self.columns {
            column.cells.remove(row);
        }
        Ok(())
    }

    /// Non-empty cells per claim, as persisted in `"Edited Feature Table"`
    pub fn edited_features(&self) -> IndexMap<ClaimId, Vec<String>> {
        self.columns
            .iter()
            .map(|c| (c.claim.clone(), c.terms().map(str::to_string).collect()))
            .collect()
    }

    /// Flatten column-major into the graph builder's input.
    ///
    /// Columns are visited left to right and each column's non-empty
    /// cells top to bottom. Relation and reference tags start empty.
    pub fn flatten(&self) -> FlatTable {
        let mut flat = FlatTable::new();
        for column in &self.columns {
            for term in column.terms() {
                flat.push_feature(term, &column.claim);
            }
        }
        debug!(rows = flat.len(), "flattened feature table");
        flat
    }
}

impl fmt::Display for FeatureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = (1..=self.rows).map(|i| format!("Feature {i}")).collect();
        let label_width = labels.iter().map(String::len).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                c.terms()
                    .map(|t| t.chars().count())
                    .chain(std::iter::once(c.claim.as_str().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (column, width) in self.columns.iter().zip(widths.iter().copied()) {
            write!(f, " | {:width$}", column.claim.as_str())?;
        }
        writeln!(f)?;

        for (row, label) in labels.iter().enumerate() {
            write!(f, "{label:label_width$}")?;
            for (column, width) in self.columns.iter().zip(widths.iter().copied()) {
                let cell = column.cells[row].as_deref().unwrap_or("");
                write!(f, " | {cell:width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

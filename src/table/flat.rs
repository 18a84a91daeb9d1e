//! Flattened feature rows: the persisted input of the graph builder

use super::TableError;
use crate::claim::ClaimId;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the flattened feature table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub index: usize,
    /// Feature term (`a_list`)
    pub term: String,
    /// Edge label supplied by the user (`prep_list`)
    pub relation_tag: String,
    /// Back-reference to an earlier term (`the_list`)
    pub reference_tag: String,
    /// Originating claim (`Cl_nr`)
    pub claim_id: ClaimId,
}

impl FeatureRow {
    /// A plain feature row with empty tags
    pub fn feature(term: impl Into<String>, claim_id: ClaimId) -> Self {
        Self {
            index: 0,
            term: term.into(),
            relation_tag: String::new(),
            reference_tag: String::new(),
            claim_id,
        }
    }

    /// A row carrying only a relation label
    pub fn relation(label: impl Into<String>) -> Self {
        Self {
            relation_tag: label.into(),
            ..Self::feature("", ClaimId::from(""))
        }
    }

    /// A row referring back to an earlier term
    pub fn reference(term: impl Into<String>) -> Self {
        Self {
            reference_tag: term.into(),
            ..Self::feature("", ClaimId::from(""))
        }
    }

    pub fn with_relation(mut self, label: impl Into<String>) -> Self {
        self.relation_tag = label.into();
        self
    }

    pub fn with_claim(mut self, claim_id: ClaimId) -> Self {
        self.claim_id = claim_id;
        self
    }
}

/// Null cells in a hand-edited record read as empty strings
fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells: Vec<Option<String>> = Vec::deserialize(deserializer)?;
    Ok(cells.into_iter().map(Option::unwrap_or_default).collect())
}

/// Four parallel sequences, persisted as `"Concatenated DataFrame"`.
///
/// The sequences are expected to have equal length but a hand-edited
/// record may break that; [`FlatTable::rows`] pads the short ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTable {
    #[serde(default, deserialize_with = "nullable_strings")]
    pub a_list: Vec<String>,
    #[serde(default, deserialize_with = "nullable_strings")]
    pub prep_list: Vec<String>,
    #[serde(default, deserialize_with = "nullable_strings")]
    pub the_list: Vec<String>,
    #[serde(rename = "Cl_nr", default, deserialize_with = "nullable_strings")]
    pub cl_nr: Vec<String>,
}

impl FlatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows; the rows' `index` fields are ignored.
    pub fn from_rows(rows: impl IntoIterator<Item = FeatureRow>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push(row);
        }
        table
    }

    /// Length of the longest sequence
    pub fn len(&self) -> usize {
        self.a_list
            .len()
            .max(self.prep_list.len())
            .max(self.the_list.len())
            .max(self.cl_nr.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every sequence is empty or blank
    pub fn is_blank(&self) -> bool {
        [&self.a_list, &self.prep_list, &self.the_list, &self.cl_nr]
            .iter()
            .all(|column| column.iter().all(|cell| cell.trim().is_empty()))
    }

    /// Pad every sequence with empty strings to the longest one
    pub fn normalize(&mut self) {
        let len = self.len();
        for column in [&mut self.a_list, &mut self.prep_list, &mut self.the_list, &mut self.cl_nr] {
            column.resize(len, String::new());
        }
    }

    /// Append a feature term for a claim with empty tags
    pub fn push_feature(&mut self, term: impl Into<String>, claim_id: &ClaimId) {
        self.push(FeatureRow::feature(term, claim_id.clone()));
    }

    pub fn push(&mut self, row: FeatureRow) {
        self.normalize();
        self.a_list.push(row.term);
        self.prep_list.push(row.relation_tag);
        self.the_list.push(row.reference_tag);
        self.cl_nr.push(row.claim_id.as_str().to_string());
    }

    /// Insert a row before `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, row: FeatureRow) -> Result<(), TableError> {
        self.normalize();
        if index > self.len() {
            return Err(TableError::RowOutOfRange(index));
        }
        self.a_list.insert(index, row.term);
        self.prep_list.insert(index, row.relation_tag);
        self.the_list.insert(index, row.reference_tag);
        self.cl_nr.insert(index, row.claim_id.as_str().to_string());
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<FeatureRow, TableError> {
        self.normalize();
        if index >= self.len() {
            return Err(TableError::RowOutOfRange(index));
        }
        Ok(FeatureRow {
            index,
            term: self.a_list.remove(index),
            relation_tag: self.prep_list.remove(index),
            reference_tag: self.the_list.remove(index),
            claim_id: ClaimId::from(self.cl_nr.remove(index)),
        })
    }

    /// Set the relation label (`prep_list`) of a row
    pub fn set_relation(&mut self, index: usize, label: impl Into<String>) -> Result<(), TableError> {
        self.normalize();
        let cell = self
            .prep_list
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange(index))?;
        *cell = label.into();
        Ok(())
    }

    /// Set the back-reference term (`the_list`) of a row
    pub fn set_reference(&mut self, index: usize, term: impl Into<String>) -> Result<(), TableError> {
        self.normalize();
        let cell = self
            .the_list
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange(index))?;
        *cell = term.into();
        Ok(())
    }

    /// All rows, padded to equal length
    pub fn rows(&self) -> Vec<FeatureRow> {
        let cell = |column: &[String], i: usize| column.get(i).cloned().unwrap_or_default();
        (0..self.len())
            .map(|i| FeatureRow {
                index: i,
                term: cell(&self.a_list[..], i),
                relation_tag: cell(&self.prep_list[..], i),
                reference_tag: cell(&self.the_list[..], i),
                claim_id: ClaimId::from(cell(&self.cl_nr[..], i)),
            })
            .collect()
    }
}

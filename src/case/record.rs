//! The persisted per-case record

use crate::claim::ClaimId;
use crate::graph::{ConceptGraph, NetworkData};
use crate::markers::MarkerSummary;
use crate::table::FlatTable;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record keys, as written by every earlier version of the tool
pub mod fields {
    pub const USER_ENTERED_CLAIMS: &str = "User Entered Claims";
    pub const FEATURE_TABLE: &str = "Feature Table";
    pub const EDITED_FEATURE_TABLE: &str = "Edited Feature Table";
    pub const CONCATENATED_DATAFRAME: &str = "Concatenated DataFrame";
    pub const NETWORK: &str = "Network";
    pub const MARKERS: &str = "Markers";

    pub const INDEPENDENT_CLAIMS: &str = "Independent Claims";
    pub const PTBS: &str = "Ptbs";
    pub const TECHNICAL_EFFECT: &str = "Technical Effect";
    pub const SOLUTION: &str = "Solution";
    pub const KEYWORDS: &str = "Keywords";
    pub const CLASSES: &str = "Classes";
    pub const UNITY: &str = "Unity";
    pub const REMARKS: &str = "Remarks";
    pub const PRIOR_ART: &str = "Prior Art";
    pub const NR_CLAIMS: &str = "Nr. Claims";
    pub const DATE: &str = "Date";
    pub const APPL_IMAGE: &str = "Appl. Image";
}

/// Free-text fields a user may set directly
pub const GENERAL_FIELDS: [&str; 10] = [
    fields::INDEPENDENT_CLAIMS,
    fields::PTBS,
    fields::TECHNICAL_EFFECT,
    fields::SOLUTION,
    fields::KEYWORDS,
    fields::CLASSES,
    fields::UNITY,
    fields::REMARKS,
    fields::PRIOR_ART,
    fields::NR_CLAIMS,
];

/// `dd-mm-YYYY`
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Look up a general field ignoring case, returning its canonical key
pub fn general_field(name: &str) -> Option<&'static str> {
    GENERAL_FIELDS
        .iter()
        .copied()
        .find(|field| field.eq_ignore_ascii_case(name.trim()))
}

/// A case record: a JSON object whose known fields have typed accessors.
///
/// Keys this crate does not know about are kept as they are, in their
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord(Map<String, Value>);

/// Claim label → value, as stored for the claim and feature fields
pub type ClaimMap<T> = IndexMap<ClaimId, T>;

impl CaseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// A string field; non-string values read as absent
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }

    /// A string field rendered for display; missing reads as empty and
    /// non-string values as their JSON text.
    pub fn display_text(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Value::String(value.into()));
    }

    /// Decode a field. `null`, `{}` and `[]` read as absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some),
        }
    }

    pub fn set_as<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), serde_json::Error> {
        self.0.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    // === Pipeline fields ===

    pub fn user_claims(&self) -> Result<Option<ClaimMap<String>>, serde_json::Error> {
        self.get_as(fields::USER_ENTERED_CLAIMS)
    }

    pub fn set_user_claims(&mut self, claims: &ClaimMap<String>) -> Result<(), serde_json::Error> {
        self.set_as(fields::USER_ENTERED_CLAIMS, claims)
    }

    pub fn feature_table(&self) -> Result<Option<ClaimMap<Vec<String>>>, serde_json::Error> {
        self.get_as(fields::FEATURE_TABLE)
    }

    pub fn set_feature_table(&mut self, features: &ClaimMap<Vec<String>>) -> Result<(), serde_json::Error> {
        self.set_as(fields::FEATURE_TABLE, features)
    }

    pub fn edited_feature_table(&self) -> Result<Option<ClaimMap<Vec<String>>>, serde_json::Error> {
        self.get_as(fields::EDITED_FEATURE_TABLE)
    }

    pub fn set_edited_feature_table(&mut self, features: &ClaimMap<Vec<String>>) -> Result<(), serde_json::Error> {
        self.set_as(fields::EDITED_FEATURE_TABLE, features)
    }

    /// The flattened table; a table whose cells are all blank reads as absent
    pub fn flat_table(&self) -> Result<Option<FlatTable>, serde_json::Error> {
        Ok(self
            .get_as::<FlatTable>(fields::CONCATENATED_DATAFRAME)?
            .filter(|table| !table.is_blank()))
    }

    pub fn set_flat_table(&mut self, table: &FlatTable) -> Result<(), serde_json::Error> {
        self.set_as(fields::CONCATENATED_DATAFRAME, table)
    }

    pub fn network(&self) -> Result<Option<ConceptGraph>, serde_json::Error> {
        self.get_as(fields::NETWORK)
    }

    /// The saved network as stored, without rebuilding a graph
    pub fn network_data(&self) -> Result<Option<NetworkData>, serde_json::Error> {
        self.get_as(fields::NETWORK)
    }

    pub fn set_network(&mut self, graph: &ConceptGraph) -> Result<(), serde_json::Error> {
        self.set_as(fields::NETWORK, graph)
    }

    pub fn markers(&self) -> Result<Option<MarkerSummary>, serde_json::Error> {
        self.get_as(fields::MARKERS)
    }

    pub fn set_markers(&mut self, markers: &MarkerSummary) -> Result<(), serde_json::Error> {
        self.set_as(fields::MARKERS, markers)
    }

    // === General fields ===

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.text(fields::DATE)?, DATE_FORMAT).ok()
    }

    /// Set `"Date"` to `today`, formatted `dd-mm-YYYY`
    pub fn stamp_date(&mut self, today: NaiveDate) {
        self.set_text(fields::DATE, today.format(DATE_FORMAT).to_string());
    }

    pub fn appl_image(&self) -> Option<&str> {
        self.text(fields::APPL_IMAGE).filter(|s| !s.is_empty())
    }

    pub fn set_appl_image(&mut self, reference: impl Into<String>) {
        self.set_text(fields::APPL_IMAGE, reference);
    }

    /// Marker combinations, empty if no markers were generated
    pub fn combinations(&self) -> Vec<String> {
        self.markers()
            .ok()
            .flatten()
            .map(|m| m.combinations)
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for CaseRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CaseRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn unknown_keys_survive_updates() {
        let mut rec = record(json!({"Custom": {"x": 1}, "Ptbs": "old"}));
        rec.set_text(fields::PTBS, "new");
        rec.set_markers(&MarkerSummary::default()).unwrap();

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["Custom"], json!({"x": 1}));
        let keys: Vec<&String> = rec.as_map().keys().collect();
        assert_eq!(keys, vec!["Custom", "Ptbs", "Markers"]);
    }

    #[test]
    fn empty_fields_read_as_absent() {
        let rec = record(json!({
            "Network": {},
            "Markers": null,
            "Concatenated DataFrame": {"a_list": [], "prep_list": [], "the_list": [], "Cl_nr": []}
        }));
        assert!(rec.network().unwrap().is_none());
        assert!(rec.markers().unwrap().is_none());
        assert!(rec.flat_table().unwrap().is_none());
        assert!(rec.user_claims().unwrap().is_none());
    }

    #[test]
    fn malformed_field_is_an_error() {
        let rec = record(json!({"User Entered Claims": ["not", "a", "map"]}));
        assert!(rec.user_claims().is_err());
    }

    #[test]
    fn claim_maps_keep_order() {
        let rec = record(json!({"Edited Feature Table": {"Cl_2": ["a lid"], "Cl_1": []}}));
        let table = rec.edited_feature_table().unwrap().unwrap();
        let keys: Vec<&str> = table.keys().map(ClaimId::as_str).collect();
        assert_eq!(keys, vec!["Cl_2", "Cl_1"]);
    }

    #[test]
    fn date_uses_day_month_year() {
        let mut rec = CaseRecord::new();
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        rec.stamp_date(day);
        assert_eq!(rec.text(fields::DATE), Some("07-03-2024"));
        assert_eq!(rec.date(), Some(day));
    }

    #[test]
    fn general_fields_match_case_insensitively() {
        assert_eq!(general_field("prior art"), Some(fields::PRIOR_ART));
        assert_eq!(general_field("nr. claims"), Some(fields::NR_CLAIMS));
        assert_eq!(general_field("Network"), None);
    }

    #[test]
    fn display_text_renders_any_value() {
        let rec = record(json!({"Nr. Claims": 12, "Ptbs": "x", "Unity": null}));
        assert_eq!(rec.display_text(fields::NR_CLAIMS), "12");
        assert_eq!(rec.display_text(fields::PTBS), "x");
        assert_eq!(rec.display_text(fields::UNITY), "");
        assert_eq!(rec.display_text(fields::REMARKS), "");
    }
}

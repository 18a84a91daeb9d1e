//! Shared fixtures for the integration tests

#![allow(dead_code)]

use claimgraph::{CaseName, CaseRecord, FlatTable, Workbench};
use serde_json::json;

/// A two-claim set with reference signs and a dependent claim
pub const CLAIMS: &str = "\
1. A pump (1) comprising a rotor (2) and a housing (3).
2. The pump according to claim 1, wherein the rotor carries a blade ring.
";

/// Flat table of a tagged claim: pump -with-> rotor -in-> housing, then a
/// back-reference row linking the housing to a seal of claim 2.
pub fn tagged_table() -> FlatTable {
    serde_json::from_value(json!({
        "a_list":    ["a pump", "",     "a rotor", "",   "a housing", "",          "",   "a seal"],
        "prep_list": ["",       "with", "",        "in", "",          "",          "on", ""],
        "the_list":  ["",       "",     "",        "",   "",          "a housing", "",   ""],
        "Cl_nr":     ["Cl_1",   "",     "Cl_1",    "",   "Cl_1",      "",          "",   "Cl_2"]
    }))
    .expect("fixture table is valid")
}

/// A record whose only pipeline field is the flat table
pub fn record_with_table(table: &FlatTable) -> CaseRecord {
    let mut record = CaseRecord::new();
    record.set_flat_table(table).expect("flat table serializes");
    record
}

/// An in-memory workbench holding one case with `record`
pub fn bench_with(record: CaseRecord) -> (Workbench, CaseName) {
    let bench = Workbench::new();
    let name = bench.create_case("test case", false).expect("case is created");
    bench.put(&name, record).expect("record is stored");
    (bench, name)
}

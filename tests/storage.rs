//! Workbench persistence through both case stores

mod common;

use claimgraph::case::fields;
use claimgraph::{
    CaseName, CaseStore, ClaimGraphError, JsonFileStore, OpenStore, Palette, SqliteStore, StorageError,
    Workbench,
};
use std::sync::Arc;
use tempfile::TempDir;

fn json_store(dir: &TempDir) -> Arc<dyn CaseStore> {
    Arc::new(JsonFileStore::new(dir.path().join("cases")).unwrap())
}

fn sqlite_store(dir: &TempDir) -> Arc<dyn CaseStore> {
    Arc::new(SqliteStore::open(dir.path().join("claimgraph.db")).unwrap())
}

/// Build a graph in one workbench, then read it back through a fresh one
fn assert_case_survives_restart(open: fn(&TempDir) -> Arc<dyn CaseStore>) {
    let dir = tempfile::tempdir().unwrap();
    let palette = Palette::default();
    let name = {
        let bench = Workbench::with_store(open(&dir));
        let name = bench.create_case("Pump case", false).unwrap();
        bench.put(&name, common::record_with_table(&common::tagged_table())).unwrap();

        let mut session = bench.open(&name).unwrap();
        session.build_graph(&palette).unwrap();
        session.save_network().unwrap();
        session.generate_markers("10UG").unwrap();
        bench.commit(&session).unwrap();
        name
    };

    let bench = Workbench::with_store(open(&dir));
    assert!(bench.is_persistent());
    assert_eq!(bench.list_cases().unwrap(), vec![name.clone()]);

    let record = bench.get_case(&name).unwrap();
    let graph = record.network().unwrap().unwrap();
    assert_eq!(graph.edge_label("a pump", "a rotor"), Some("with"));
    assert_eq!(record.markers().unwrap().unwrap().marker_count(), 3);
    assert_eq!(record.flat_table().unwrap(), Some(common::tagged_table()));
}

fn assert_image_round_trip(open: fn(&TempDir) -> Arc<dyn CaseStore>) {
    let dir = tempfile::tempdir().unwrap();
    let bench = Workbench::with_store(open(&dir));
    let name = bench.create_case("imaged", false).unwrap();

    let reference = bench.save_image(&name, b"\x89PNG\r\n").unwrap();
    assert!(reference.ends_with("appl_image_imaged.png"));
    assert_eq!(bench.get_case(&name).unwrap().appl_image(), Some(reference.as_str()));

    let fresh = Workbench::with_store(open(&dir));
    assert_eq!(fresh.load_image(&name).unwrap(), Some(b"\x89PNG\r\n".to_vec()));
}

fn assert_delete_removes_everywhere(open: fn(&TempDir) -> Arc<dyn CaseStore>) {
    let dir = tempfile::tempdir().unwrap();
    let bench = Workbench::with_store(open(&dir));
    let keep = bench.create_case("keep", false).unwrap();
    let gone = bench.create_case("drop", false).unwrap();
    bench.save_image(&gone, b"png").unwrap();

    assert!(bench.remove_case(&gone).unwrap());
    assert!(!bench.remove_case(&gone).unwrap());
    assert!(matches!(
        bench.get_case(&gone),
        Err(ClaimGraphError::Storage(StorageError::CaseNotFound(_)))
    ));

    let fresh = Workbench::with_store(open(&dir));
    assert_eq!(fresh.list_cases().unwrap(), vec![keep]);
    assert_eq!(fresh.load_image(&gone).unwrap(), None);
}

#[test]
fn json_store_case_survives_restart() {
    assert_case_survives_restart(json_store);
}

#[test]
fn sqlite_store_case_survives_restart() {
    assert_case_survives_restart(sqlite_store);
}

#[test]
fn json_store_image_round_trip() {
    assert_image_round_trip(json_store);
}

#[test]
fn sqlite_store_image_round_trip() {
    assert_image_round_trip(sqlite_store);
}

#[test]
fn json_store_delete() {
    assert_delete_removes_everywhere(json_store);
}

#[test]
fn sqlite_store_delete() {
    assert_delete_removes_everywhere(sqlite_store);
}

#[test]
fn load_all_fills_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let store = json_store(&dir);
    for raw in ["b case", "a case"] {
        store
            .save_case(&CaseName::sanitize(raw, false), &common::record_with_table(&common::tagged_table()))
            .unwrap();
    }

    let bench = Workbench::with_store(store);
    assert_eq!(bench.load_all().unwrap(), 2);
    let names: Vec<String> = bench.list_cases().unwrap().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["a_case", "b_case"]);
}

#[test]
fn creating_an_existing_case_keeps_its_record() {
    let dir = tempfile::tempdir().unwrap();
    let bench = Workbench::with_store(sqlite_store(&dir));
    let name = bench.create_case("EP 42", false).unwrap();
    bench.put(&name, common::record_with_table(&common::tagged_table())).unwrap();

    let again = bench.create_case("EP 42", false).unwrap();
    assert_eq!(again, name);
    assert!(bench.get_case(&name).unwrap().get(fields::CONCATENATED_DATAFRAME).is_some());

    let unique = bench.create_case("EP 42", true).unwrap();
    assert_ne!(unique, name);
    assert!(unique.as_str().starts_with("EP_42_"));
    assert_eq!(bench.case_count().unwrap(), 2);
}

#[test]
fn in_memory_workbench_needs_no_store() {
    let (bench, name) = common::bench_with(common::record_with_table(&common::tagged_table()));
    assert!(!bench.is_persistent());
    assert_eq!(bench.load_all().unwrap(), 0);
    assert_eq!(bench.save_image(&name, b"png").unwrap(), "appl_image_test_case.png");
    assert_eq!(bench.load_image(&name).unwrap(), Some(b"png".to_vec()));
}

#[test]
fn sqlite_in_memory_store_backs_a_workbench() {
    let bench = Workbench::with_store(Arc::new(SqliteStore::open_in_memory().unwrap()));
    let name = bench.create_case("scratch", false).unwrap();
    assert!(bench.has_case(&name).unwrap());
}

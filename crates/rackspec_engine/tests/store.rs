use pretty_assertions::assert_eq;
use rackspec_core::{FieldMap, SpecRecord};
use rackspec_engine::{SpecStore, StoreError};

fn full_record(url: &str, model: &str) -> SpecRecord {
    SpecRecord {
        url: url.to_string(),
        model_name: model.to_string(),
        date_scraped: "2025-03-01 10:00:00".to_string(),
        fields: FieldMap {
            cpu_socket: Some("LGA 4189 Socket P+".to_string()),
            cpu_count: "2".to_string(),
            max_tdp: Some("270W".to_string()),
            total_tdp: Some("540W".to_string()),
            memory_type: Some("DDR4 ECC RDIMM".to_string()),
            dimm_slots: Some("32".to_string()),
            power_supply: Some("2 x 1200W".to_string()),
            rack_unit: Some("2U".to_string()),
            drive_bays: Some("8".to_string()),
            m2_slots: Some("2 detected".to_string()),
        },
    }
}

fn sparse_record(url: &str, model: &str) -> SpecRecord {
    SpecRecord {
        url: url.to_string(),
        model_name: model.to_string(),
        date_scraped: "2025-03-02 09:30:00".to_string(),
        fields: FieldMap {
            rack_unit: Some("1U".to_string()),
            ..FieldMap::default()
        },
    }
}

#[test]
fn insert_then_repeat_is_a_conflict() {
    let store = SpecStore::open_in_memory().expect("open");
    let record = full_record("https://example.com/r283-z92", "r283-z92");
    store.insert(&record).expect("first insert");
    let err = store.insert(&record).expect_err("second insert");
    assert!(matches!(err, StoreError::Conflict));
    assert_eq!(store.list().expect("list").len(), 1);
}

#[test]
fn exists_tracks_stored_urls() {
    let store = SpecStore::open_in_memory().expect("open");
    let record = full_record("https://example.com/r283-z92", "r283-z92");
    assert!(!store.exists(&record.url).expect("exists"));
    store.insert(&record).expect("insert");
    assert!(store.exists(&record.url).expect("exists"));
    assert!(!store.exists("https://example.com/other").expect("exists"));
}

#[test]
fn list_preserves_insertion_order() {
    let store = SpecStore::open_in_memory().expect("open");
    for (url, model) in [
        ("https://example.com/a100", "a100"),
        ("https://example.com/b200", "b200"),
        ("https://example.com/c300", "c300"),
    ] {
        store.insert(&sparse_record(url, model)).expect("insert");
    }
    let models: Vec<String> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|summary| summary.model_name)
        .collect();
    assert_eq!(models, ["a100", "b200", "c300"]);
}

#[test]
fn full_record_round_trips_unchanged() {
    let store = SpecStore::open_in_memory().expect("open");
    let record = full_record("https://example.com/r283-z92#specs", "r283-z92");
    store.insert(&record).expect("insert");
    let stored = store.all_records().expect("all records");
    assert_eq!(stored, [record]);
}

#[test]
fn sparse_record_round_trips_with_fields_absent() {
    let store = SpecStore::open_in_memory().expect("open");
    let record = sparse_record("https://example.com/e152", "e152");
    store.insert(&record).expect("insert");
    let stored = store
        .get_by_model("e152")
        .expect("lookup")
        .expect("stored record");
    assert_eq!(stored.fields.rack_unit.as_deref(), Some("1U"));
    assert_eq!(stored.fields.cpu_count, "1");
    assert_eq!(stored.fields.max_tdp, None);
    assert_eq!(stored.fields.memory_type, None);
    assert_eq!(stored, record);
}

#[test]
fn get_by_model_prefers_the_oldest_row() {
    let store = SpecStore::open_in_memory().expect("open");
    store
        .insert(&sparse_record("https://example.com/old/g293", "g293"))
        .expect("insert");
    store
        .insert(&sparse_record("https://example.com/new/g293", "g293"))
        .expect("insert");
    let stored = store
        .get_by_model("g293")
        .expect("lookup")
        .expect("stored record");
    assert_eq!(stored.url, "https://example.com/old/g293");
}

#[test]
fn get_by_model_unknown_is_none() {
    let store = SpecStore::open_in_memory().expect("open");
    assert_eq!(store.get_by_model("nope").expect("lookup"), None);
}

#[test]
fn delete_by_model_reports_zero_for_unknown() {
    let store = SpecStore::open_in_memory().expect("open");
    assert_eq!(store.delete_by_model("nope").expect("delete"), 0);
}

#[test]
fn delete_by_model_removes_every_matching_row() {
    let store = SpecStore::open_in_memory().expect("open");
    store
        .insert(&sparse_record("https://example.com/old/g293", "g293"))
        .expect("insert");
    store
        .insert(&sparse_record("https://example.com/new/g293", "g293"))
        .expect("insert");
    store
        .insert(&sparse_record("https://example.com/r283", "r283"))
        .expect("insert");
    assert_eq!(store.delete_by_model("g293").expect("delete"), 2);
    let models: Vec<String> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|summary| summary.model_name)
        .collect();
    assert_eq!(models, ["r283"]);
}

#[test]
fn reopening_a_database_file_keeps_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("specs.db");
    let record = full_record("https://example.com/r283-z92", "r283-z92");

    let store = SpecStore::open(&db_path).expect("open");
    store.insert(&record).expect("insert");
    drop(store);

    let reopened = SpecStore::open(&db_path).expect("reopen");
    assert!(reopened.exists(&record.url).expect("exists"));
    assert_eq!(reopened.all_records().expect("all records"), [record]);
}

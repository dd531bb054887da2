//! End-to-end backup tests against the `SQLite` store.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use trophy::backup::{
    WireCatchRecord, WireDocument, WireEquipmentRecord, WireLocationRecord, encode,
};
use trophy::{
    ActivityType, BackupService, Catch, DocumentError, EntityStore, Equipment, EquipmentType,
    Error, Exporter, ImportOptions, ImportOutcome, Importer, Location, LocationType, SqliteStore,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::in_memory().unwrap();

    store
        .insert_location(
            &Location::new("Upper Volga", LocationType::River, 57.626_559, 39.893_813)
                .with_description("below the weir"),
        )
        .unwrap();
    store
        .insert_location(&Location::new("Pine ridge", LocationType::Forest, -33.9, 151.2))
        .unwrap();

    store
        .insert_equipment(
            &Equipment::new("Spinning rod", EquipmentType::Rod, ActivityType::Fishing)
                .with_description("2.4 m, 10-30 g"),
        )
        .unwrap();
    store
        .insert_equipment(&Equipment::new(
            "Duck call",
            EquipmentType::Call,
            ActivityType::Hunting,
        ))
        .unwrap();

    store
        .insert_catch(
            &Catch::new(ActivityType::Fishing, "Pike", date(2024, 5, 30))
                .with_weight(4.35)
                .with_length(88.5)
                .with_time(NaiveTime::from_hms_opt(6, 45, 0).unwrap())
                .with_notes("on a spoon"),
        )
        .unwrap();
    store
        .insert_catch(
            &Catch::new(ActivityType::Hunting, "Mallard", date(2023, 10, 14))
                .with_quantity(3)
                .with_time(NaiveTime::from_hms_milli_opt(17, 2, 9, 250).unwrap()),
        )
        .unwrap();
    store
        .insert_catch(&Catch::new(ActivityType::Fishing, "Roach", date(2024, 2, 29)))
        .unwrap();

    store
}

fn same_catch(a: &Catch, b: &Catch) -> bool {
    a.activity_type == b.activity_type
        && a.species == b.species
        && a.weight == b.weight
        && a.length == b.length
        && a.quantity == b.quantity
        && a.notes == b.notes
        && a.catch_date == b.catch_date
        && a.catch_time == b.catch_time
}

fn catch_record(species: &str, activity: &str, catch_date: &str) -> WireCatchRecord {
    WireCatchRecord {
        species: species.to_string(),
        activity_type: activity.to_string(),
        weight: None,
        length: None,
        quantity: 1,
        catch_date: catch_date.to_string(),
        catch_time: None,
        notes: None,
    }
}

fn import(store: &SqliteStore, bytes: &[u8]) -> trophy::Result<trophy::ImportOutcome> {
    Importer::new(store).import(bytes, &ImportOptions::default())
}

#[test]
fn test_roundtrip_preserves_every_wire_field() {
    let source = seeded_store();
    let document = Exporter::new(&source).export_at(date(2024, 6, 1)).unwrap();
    let bytes = encode(&document, true).unwrap();

    let target = SqliteStore::in_memory().unwrap();
    let outcome = import(&target, &bytes).unwrap();

    assert_eq!(outcome.catches_imported, 3);
    assert_eq!(outcome.locations_imported, 2);
    assert_eq!(outcome.equipment_imported, 2);
    assert!(!outcome.has_errors());

    let original = source.list_catches().unwrap();
    let restored = target.list_catches().unwrap();
    assert_eq!(original.len(), restored.len());
    for (a, b) in original.iter().zip(&restored) {
        assert!(same_catch(a, b), "{a:?} != {b:?}");
        assert_eq!(b.location_id, None);
    }

    let original = source.list_locations().unwrap();
    let restored = target.list_locations().unwrap();
    for (a, b) in original.iter().zip(&restored) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.description, b.description);
        assert_eq!(a.location_type, b.location_type);
        assert_eq!(a.latitude.to_bits(), b.latitude.to_bits());
        assert_eq!(a.longitude.to_bits(), b.longitude.to_bits());
    }

    let original = source.list_equipment().unwrap();
    let restored = target.list_equipment().unwrap();
    for (a, b) in original.iter().zip(&restored) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.description, b.description);
        assert_eq!(a.equipment_type, b.equipment_type);
        assert_eq!(a.activity_type, b.activity_type);
    }

    // Re-exporting the restored store yields the same document.
    let again = Exporter::new(&target).export_at(date(2024, 6, 1)).unwrap();
    assert_eq!(encode(&again, true).unwrap(), bytes);
}

#[test]
fn test_unsupported_version_fails_closed() {
    let store = seeded_store();
    let before = store.counts().unwrap();

    let err = import(
        &store,
        br#"{"version": 2, "exportDate": "2030-01-01", "catches": [], "locations": [],
             "equipment": [{"name": "x", "equipmentType": "ROD", "activityType": "FISHING"}]}"#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Document(DocumentError::UnsupportedVersion { found: 2, .. })
    ));
    assert_eq!(store.counts().unwrap(), before);
}

#[test]
fn test_one_bad_catch_does_not_block_the_rest() {
    let store = SqliteStore::in_memory().unwrap();
    let mut doc = WireDocument::new(date(2024, 6, 1));
    doc.catches.push(catch_record("Perch", "FISHING", "2024-05-01"));
    doc.catches.push(catch_record("Pike", "SWIMMING", "2024-05-02"));
    doc.catches.push(catch_record("Boar", "HUNTING", "2024-05-03"));

    let outcome = import(&store, &encode(&doc, false).unwrap()).unwrap();

    assert_eq!(outcome.catches_imported, 2);
    assert_eq!(outcome.catches_failed, 1);
    assert_eq!(
        outcome.errors,
        vec!["catch 'Pike': unknown activityType 'SWIMMING'".to_string()]
    );
    let species: Vec<String> = store
        .list_catches()
        .unwrap()
        .into_iter()
        .map(|c| c.species)
        .collect();
    assert_eq!(species, vec!["Perch".to_string(), "Boar".to_string()]);
}

#[test]
fn test_malformed_date_is_isolated() {
    let store = SqliteStore::in_memory().unwrap();
    let mut doc = WireDocument::new(date(2024, 6, 1));
    doc.catches.push(catch_record("Bream", "FISHING", "not-a-date"));
    doc.catches.push(catch_record("Tench", "FISHING", "2024-06-01"));
    doc.locations.push(WireLocationRecord {
        name: "Oxbow".to_string(),
        latitude: 1.5,
        longitude: 2.5,
        location_type: "LAKE".to_string(),
        description: None,
    });

    let outcome = import(&store, &encode(&doc, true).unwrap()).unwrap();

    assert_eq!(outcome.catches_failed, 1);
    assert_eq!(outcome.catches_imported, 1);
    assert_eq!(outcome.locations_imported, 1);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].contains("Bream"));
    assert!(outcome.errors[0].contains("not-a-date"));
}

#[test]
fn test_error_log_truncated_but_counted() {
    let store = SqliteStore::in_memory().unwrap();
    let mut doc = WireDocument::new(date(2024, 6, 1));
    for n in 0..25 {
        doc.equipment.push(WireEquipmentRecord {
            name: format!("Item {n}"),
            description: None,
            equipment_type: "TELEPORTER".to_string(),
            activity_type: "FISHING".to_string(),
        });
    }

    let outcome = import(&store, &encode(&doc, false).unwrap()).unwrap();

    assert_eq!(outcome.equipment_failed, 25);
    assert_eq!(outcome.total_failed(), 25);
    assert_eq!(outcome.errors.len(), 10);
    assert_eq!(
        outcome.errors[0],
        "equipment 'Item 0': unknown equipmentType 'TELEPORTER'"
    );
    assert_eq!(outcome.summary(), "Imported 0 of 25 records; 25 failed");
    assert_eq!(store.counts().unwrap().total(), 0);
}

/// The export date is today's local date; straddling midnight is allowed.
fn assert_stamped_today(value: &serde_json::Value, before: NaiveDate) {
    let after = chrono::Local::now().date_naive();
    let stamped = value["exportDate"].as_str().unwrap();
    assert!(
        stamped == before.to_string() || stamped == after.to_string(),
        "exportDate {stamped} is not today"
    );
}

#[test]
fn test_empty_store_exports_empty_document() {
    let store = SqliteStore::in_memory().unwrap();
    let before = chrono::Local::now().date_naive();
    let (bytes, result) = Exporter::new(&store).export_bytes(true).unwrap();
    assert_eq!(result.total_exported(), 0);
    assert_eq!(result.bytes_written, bytes.len());

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["version"], 1);
    assert_stamped_today(&value, before);
    assert_eq!(value["catches"], serde_json::json!([]));
    assert_eq!(value["locations"], serde_json::json!([]));
    assert_eq!(value["equipment"], serde_json::json!([]));

    let target = SqliteStore::in_memory().unwrap();
    let outcome = import(&target, &bytes).unwrap();
    assert_eq!(outcome, ImportOutcome::default());
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.summary(), "Imported 0 of 0 records");
    assert_eq!(target.counts().unwrap().total(), 0);
}

#[tokio::test]
async fn test_service_export_is_stamped_today() {
    let service = BackupService::new(Arc::new(seeded_store()));
    let before = chrono::Local::now().date_naive();
    let bytes = service.export_to_bytes().await.unwrap();

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_stamped_today(&value, before);
    assert_eq!(value["catches"].as_array().unwrap().len(), 3);
}

#[test]
fn test_non_finite_values_fail_export() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .insert_location(&Location::new("Nowhere", LocationType::Other, f64::INFINITY, 0.0))
        .unwrap();
    let err = Exporter::new(&store).export_bytes(true).unwrap_err();
    assert!(matches!(err, Error::OperationFailed { .. }), "{err}");

    let store = SqliteStore::in_memory().unwrap();
    store
        .insert_catch(
            &Catch::new(ActivityType::Fishing, "Carp", date(2024, 7, 1)).with_weight(f64::INFINITY),
        )
        .unwrap();
    let err = Exporter::new(&store).export_bytes(false).unwrap_err();
    assert!(err.to_string().contains("catch 'Carp': non-finite weight inf"));
}

#[tokio::test]
async fn test_non_finite_export_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    let store = SqliteStore::in_memory().unwrap();
    store
        .insert_location(&Location::new("Edge", LocationType::Sea, 10.0, f64::NEG_INFINITY))
        .unwrap();

    let service = BackupService::new(Arc::new(store));
    assert!(service.export_to_file(&path).await.is_err());
    assert!(!path.exists());
}

#[test]
fn test_unpadded_dates_and_times_are_rejected_per_record() {
    let store = SqliteStore::in_memory().unwrap();
    let mut doc = WireDocument::new(date(2024, 6, 1));
    doc.catches.push(catch_record("Chub", "FISHING", "2024-1-5"));
    doc.catches.push(catch_record("Ide", "FISHING", "+2024-01-05"));
    let mut timed = catch_record("Asp", "FISHING", "2024-01-05");
    timed.catch_time = Some("7:5".to_string());
    doc.catches.push(timed);
    doc.catches.push(catch_record("Dace", "FISHING", "2024-01-05"));

    let outcome = import(&store, &encode(&doc, false).unwrap()).unwrap();

    assert_eq!(outcome.catches_imported, 1);
    assert_eq!(outcome.catches_failed, 3);
    assert_eq!(
        outcome.errors,
        vec![
            "catch 'Chub': malformed catchDate '2024-1-5'".to_string(),
            "catch 'Ide': malformed catchDate '+2024-01-05'".to_string(),
            "catch 'Asp': malformed catchTime '7:5'".to_string(),
        ]
    );
}

#[test]
fn test_unparseable_bytes_touch_nothing() {
    let store = seeded_store();
    let before = store.counts().unwrap();

    for input in [&b""[..], b"{", b"\xff\xfe", b"{\"version\": 1, \"catches\": 5}"] {
        let err = import(&store, input).unwrap_err();
        assert!(
            matches!(err, Error::Document(DocumentError::Malformed(_))),
            "{err}"
        );
    }
    assert_eq!(store.counts().unwrap(), before);
}

#[test]
fn test_export_is_deterministic() {
    let store = seeded_store();
    let exporter = Exporter::new(&store);
    let first = encode(&exporter.export_at(date(2024, 6, 1)).unwrap(), true).unwrap();
    let second = encode(&exporter.export_at(date(2024, 6, 1)).unwrap(), true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_dry_run_leaves_store_untouched() {
    let source = seeded_store();
    let bytes = encode(&Exporter::new(&source).export().unwrap(), true).unwrap();

    let target = SqliteStore::in_memory().unwrap();
    let outcome = Importer::new(&target)
        .import(&bytes, &ImportOptions::default().with_dry_run(true))
        .unwrap();

    assert_eq!(outcome.total_imported(), 7);
    assert_eq!(target.counts().unwrap().total(), 0);
}

#[test]
fn test_import_appends_to_existing_data() {
    let store = seeded_store();
    let bytes = encode(&Exporter::new(&store).export().unwrap(), false).unwrap();

    import(&store, &bytes).unwrap();

    let counts = store.counts().unwrap();
    assert_eq!(counts.catches, 6);
    assert_eq!(counts.locations, 4);
    assert_eq!(counts.equipment, 4);
}

#[tokio::test]
async fn test_file_roundtrip_through_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trophy-backup.json");

    let source = BackupService::new(Arc::new(seeded_store()));
    let exported = source.export_to_file(&path).await.unwrap();
    assert_eq!(exported.total_exported(), 7);
    assert_eq!(exported.output_path.as_deref(), Some(path.as_path()));
    assert_eq!(
        exported.bytes_written,
        usize::try_from(std::fs::metadata(&path).unwrap().len()).unwrap()
    );

    let target = BackupService::new(Arc::new(SqliteStore::new(dir.path().join("restored.db")).unwrap()));
    let outcome = target.import_from_file(&path).await.unwrap();
    assert_eq!(outcome.summary(), "Imported 7 of 7 records");
    assert_eq!(target.store().counts().unwrap().total(), 7);
}

#[tokio::test]
async fn test_service_rejects_bad_version_from_bytes() {
    let service = BackupService::new(Arc::new(SqliteStore::in_memory().unwrap()));
    let err = service
        .import_from_bytes(br#"{"version": 0}"#.to_vec())
        .await
        .unwrap_err();
    assert!(err.is_document_error());
    assert_eq!(err.to_string(), "unsupported backup version 0 (supported: 1)");
}

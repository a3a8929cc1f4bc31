//! Integration tests for the medication store against an in-memory database.

use assert_matches::assert_matches;

use carediary::models::{MedicationType, NewMedication};
use carediary::{Config, Database, StoreError};

#[tokio::test]
async fn first_medication_gets_id_one() {
    let db = Database::new(Config::in_memory());

    let created = db
        .medications()
        .add(NewMedication::new("오메가3", MedicationType::Supplement).with_dosage("1캡슐"))
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.name, "오메가3");
    assert_eq!(created.medication_type, MedicationType::Supplement);
    assert_eq!(created.dosage.as_deref(), Some("1캡슐"));
    assert_eq!(created.note, None);
    assert!(created.updated_at.is_none());
}

#[tokio::test]
async fn ids_are_distinct_and_never_reused() {
    let db = Database::new(Config::in_memory());
    let store = db.medications();

    let mut ids = Vec::new();
    for name in ["신장약", "간 보호제", "유산균"] {
        let created = store
            .add(NewMedication::new(name, MedicationType::Prescription))
            .await
            .unwrap();
        ids.push(created.id);
    }
    assert_eq!(ids, vec![1, 2, 3]);

    store.delete(3).await.unwrap();
    let next = store
        .add(NewMedication::new("타우린", MedicationType::Supplement))
        .await
        .unwrap();

    assert_eq!(next.id, 4);
}

#[tokio::test]
async fn blank_name_is_rejected_and_not_stored() {
    let db = Database::new(Config::in_memory());
    let store = db.medications();

    for name in ["", "   "] {
        let result = store
            .add(NewMedication::new(name, MedicationType::Prescription))
            .await;
        assert_matches!(result, Err(StoreError::Validation(_)));
    }

    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_identity() {
    let db = Database::new(Config::in_memory());
    let store = db.medications();

    let created = store
        .add(
            NewMedication::new("신장약", MedicationType::Prescription)
                .with_dosage("1정")
                .with_note("아침 식사 후 복용"),
        )
        .await
        .unwrap();

    let updated = store
        .update(
            created.id,
            NewMedication::new("신장약 (저용량)", MedicationType::Supplement).with_dosage("1/2정"),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "신장약 (저용량)");
    assert_eq!(updated.medication_type, MedicationType::Supplement);
    assert_eq!(updated.dosage.as_deref(), Some("1/2정"));
    assert_eq!(updated.note, None);
    assert!(updated.updated_at.is_some());

    let loaded = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded, updated);
}

#[tokio::test]
async fn update_of_missing_id_is_not_found() {
    let db = Database::new(Config::in_memory());

    let result = db
        .medications()
        .update(42, NewMedication::new("유산균", MedicationType::Supplement))
        .await;

    assert_matches!(result, Err(StoreError::NotFound(_)));
}

#[tokio::test]
async fn invalid_update_leaves_record_untouched() {
    let db = Database::new(Config::in_memory());
    let store = db.medications();

    let created = store
        .add(NewMedication::new("유산균", MedicationType::Supplement))
        .await
        .unwrap();

    let result = store
        .update(created.id, NewMedication::new(" ", MedicationType::Supplement))
        .await;
    assert_matches!(result, Err(StoreError::Validation(_)));

    let loaded = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let db = Database::new(Config::in_memory());
    let store = db.medications();

    store.delete(7).await.unwrap();

    let created = store
        .add(NewMedication::new("타우린", MedicationType::Supplement))
        .await
        .unwrap();
    store.delete(created.id).await.unwrap();
    store.delete(created.id).await.unwrap();

    assert!(store.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn get_all_is_insertion_ordered() {
    let db = Database::new(Config::in_memory());
    let store = db.medications();

    for (name, t) in [
        ("신장약", MedicationType::Prescription),
        ("오메가3", MedicationType::Supplement),
        ("간 보호제", MedicationType::Prescription),
    ] {
        store.add(NewMedication::new(name, t)).await.unwrap();
    }

    let names: Vec<String> = store
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["신장약", "오메가3", "간 보호제"]);
}

#[tokio::test]
async fn get_by_type_filters_by_category() {
    let db = Database::new(Config::in_memory());
    let store = db.medications();

    for (name, t) in [
        ("신장약", MedicationType::Prescription),
        ("오메가3", MedicationType::Supplement),
        ("간 보호제", MedicationType::Prescription),
        ("유산균", MedicationType::Supplement),
        ("타우린", MedicationType::Supplement),
    ] {
        store.add(NewMedication::new(name, t)).await.unwrap();
    }

    let prescriptions = store.get_by_type(MedicationType::Prescription).await.unwrap();
    let supplements = store.get_by_type(MedicationType::Supplement).await.unwrap();

    assert_eq!(prescriptions.len(), 2);
    assert_eq!(supplements.len(), 3);
    assert!(prescriptions
        .iter()
        .all(|m| m.medication_type == MedicationType::Prescription));
    assert_eq!(supplements[0].name, "오메가3");
}

#[tokio::test]
async fn missing_id_reads_as_none() {
    let db = Database::new(Config::in_memory());

    assert!(db.medications().get_by_id(1).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_add_reports_unavailable() {
    let db = Database::new(Config {
        database_url: "sqlite:///nonexistent-dir/for/care_diary.db".into(),
        max_connections: 1,
        acquire_timeout_secs: 1,
    });

    let result = db
        .medications()
        .add(NewMedication::new("오메가3", MedicationType::Supplement))
        .await;

    assert_matches!(result, Err(ref e) if e.is_unavailable());
    assert!(!db.is_open());
}

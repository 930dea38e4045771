//! Tests for Engine
//!
//! These tests verify:
//! - Header creation on open
//! - Each action's effect on the store and its outcome
//! - Lookup failures leave the store untouched
//! - Reset and undo edge cases

use serde_json::{json, Value};
use sheetlog::engine::Engine;
use sheetlog::protocol::{Command, Entry};
use sheetlog::store::{Sheet, TabularStore};
use sheetlog::{ErrorKind, SheetError};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_engine() -> Engine<Sheet> {
    Engine::open(Sheet::new()).unwrap()
}

fn setup_engine_with(entries: &[(&str, i64, &str)]) -> Engine<Sheet> {
    let mut engine = setup_engine();
    for (timestamp, amount, unit) in entries {
        engine.create(Entry::new(*timestamp, *amount, *unit)).unwrap();
    }
    engine
}

fn timestamps(engine: &Engine<Sheet>) -> Vec<Value> {
    engine
        .records()
        .unwrap()
        .into_iter()
        .map(|record| record["Timestamp"].clone())
        .collect()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_header() {
    let engine = setup_engine();

    assert_eq!(engine.store().row_count().unwrap(), 1);
    assert!(engine.records().unwrap().is_empty());
}

#[test]
fn test_open_keeps_existing_rows() {
    let sheet = Sheet::from_rows(vec![
        vec![json!("Timestamp"), json!("Amount"), json!("Unit")],
        vec![json!("T1"), json!(8), json!("oz")],
    ]);

    let engine = Engine::open(sheet).unwrap();

    assert_eq!(engine.store().row_count().unwrap(), 2);
}

// =============================================================================
// Create / Read Tests
// =============================================================================

#[test]
fn test_create_appends_row() {
    let mut engine = setup_engine();

    let outcome = engine.create(Entry::new("T1", 8, "oz")).unwrap();

    assert_eq!(outcome.message, "Entry created");
    assert_eq!(outcome.data, None);
    assert_eq!(
        engine.store().row_values(2).unwrap(),
        vec![json!("T1"), json!(8), json!("oz")]
    );
}

#[test]
fn test_create_is_lenient_about_missing_fields() {
    let mut engine = setup_engine();

    engine
        .create(Entry::new("T1", Value::Null, Value::Null))
        .unwrap();

    assert_eq!(
        Value::Object(engine.records().unwrap()[0].clone()),
        json!({"Timestamp": "T1", "Amount": "", "Unit": ""})
    );
}

#[test]
fn test_create_accepts_string_amount() {
    let mut engine = setup_engine();

    engine.create(Entry::new("T1", "half", "cup")).unwrap();

    assert_eq!(engine.records().unwrap()[0]["Amount"], json!("half"));
}

#[test]
fn test_read_returns_records_array() {
    let engine = setup_engine_with(&[("T1", 8, "oz"), ("T2", 250, "ml")]);

    let outcome = engine.read().unwrap();

    assert_eq!(outcome.message, "Retrieved 2 entries");
    assert_eq!(
        outcome.data,
        Some(json!([
            {"Timestamp": "T1", "Amount": 8, "Unit": "oz"},
            {"Timestamp": "T2", "Amount": 250, "Unit": "ml"}
        ]))
    );
}

#[test]
fn test_read_empty_sheet() {
    let engine = setup_engine();

    assert_eq!(engine.read().unwrap().data, Some(json!([])));
}

// =============================================================================
// Update / Delete Tests
// =============================================================================

#[test]
fn test_update_keeps_timestamp_cell() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz"), ("T2", 9, "oz")]);

    engine.update(Entry::new("T2", 300, "ml")).unwrap();

    assert_eq!(
        engine.store().row_values(3).unwrap(),
        vec![json!("T2"), json!(300), json!("ml")]
    );
    assert_eq!(
        engine.store().row_values(2).unwrap(),
        vec![json!("T1"), json!(8), json!("oz")]
    );
}

#[test]
fn test_update_duplicate_timestamp_hits_first_row() {
    let mut engine = setup_engine_with(&[("T1", 1, "oz"), ("T1", 2, "oz")]);

    engine.update(Entry::new("T1", 5, "ml")).unwrap();

    assert_eq!(engine.store().row_values(2).unwrap()[1], json!(5));
    assert_eq!(engine.store().row_values(3).unwrap()[1], json!(2));
}

#[test]
fn test_update_missing_timestamp_fails() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz")]);
    let before = engine.store().clone();

    let err = engine.update(Entry::new("T9", 1, "ml")).unwrap_err();

    assert!(matches!(err, SheetError::NotFound(_)));
    assert_eq!(err.kind(), ErrorKind::LookupFailure);
    assert_eq!(err.to_string(), "Not found: T9");
    assert_eq!(engine.store(), &before);
}

#[test]
fn test_update_without_timestamp_fails() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz")]);

    let err = engine
        .update(Entry::new(Value::Null, 1, "ml"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LookupFailure);
}

#[test]
fn test_delete_removes_matching_row() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz"), ("T2", 9, "oz"), ("T3", 10, "oz")]);

    let outcome = engine.delete(&json!("T2")).unwrap();

    assert_eq!(outcome.message, "Entry deleted");
    assert_eq!(timestamps(&engine), vec![json!("T1"), json!("T3")]);
}

#[test]
fn test_delete_missing_timestamp_fails() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz")]);

    let err = engine.delete(&json!("T2")).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LookupFailure);
    assert_eq!(engine.store().row_count().unwrap(), 2);
}

// =============================================================================
// Reset / Undo Tests
// =============================================================================

#[test]
fn test_reset_keeps_header() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz"), ("T2", 9, "oz")]);

    let outcome = engine.reset().unwrap();

    assert_eq!(outcome.message, "All data reset");
    assert_eq!(engine.store().row_count().unwrap(), 1);
    assert_eq!(engine.store().row_values(1).unwrap()[0], json!("Timestamp"));
}

#[test]
fn test_reset_on_empty_sheet_succeeds() {
    let mut engine = setup_engine();

    engine.reset().unwrap();

    assert_eq!(engine.store().row_count().unwrap(), 1);
}

#[test]
fn test_undo_pops_last_row() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz"), ("T2", 9, "ml")]);

    let outcome = engine.undo().unwrap();

    assert_eq!(outcome.message, "Last entry undone (deleted).");
    assert_eq!(outcome.data, Some(json!(["T2", 9, "ml"])));
    assert_eq!(timestamps(&engine), vec![json!("T1")]);
}

#[test]
fn test_undo_is_positional_not_a_history() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz"), ("T2", 9, "oz")]);

    // Update touches T1, but undo still removes whatever sits last
    engine.update(Entry::new("T1", 100, "ml")).unwrap();
    let outcome = engine.undo().unwrap();

    assert_eq!(outcome.data, Some(json!(["T2", 9, "oz"])));
    assert_eq!(
        engine.store().row_values(2).unwrap(),
        vec![json!("T1"), json!(100), json!("ml")]
    );
}

#[test]
fn test_undo_on_empty_sheet_fails() {
    let mut engine = setup_engine();

    let err = engine.undo().unwrap_err();

    assert!(matches!(err, SheetError::EmptyStore));
    assert_eq!(err.kind(), ErrorKind::EmptyStore);
    assert_eq!(engine.store().row_count().unwrap(), 1);
}

#[test]
fn test_undo_after_reset_fails() {
    let mut engine = setup_engine_with(&[("T1", 8, "oz")]);

    engine.reset().unwrap();

    assert!(matches!(engine.undo(), Err(SheetError::EmptyStore)));
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_routes_commands() {
    let mut engine = setup_engine();

    engine
        .execute(Command::Create(Entry::new("T1", 8, "oz")))
        .unwrap();
    engine
        .execute(Command::Update(Entry::new("T1", 9, "oz")))
        .unwrap();
    let read = engine.execute(Command::Read).unwrap();
    assert_eq!(
        read.data,
        Some(json!([{"Timestamp": "T1", "Amount": 9, "Unit": "oz"}]))
    );

    engine
        .execute(Command::Delete {
            timestamp: json!("T1"),
        })
        .unwrap();
    assert!(engine.records().unwrap().is_empty());

    engine
        .execute(Command::Create(Entry::new("T2", 1, "oz")))
        .unwrap();
    engine.execute(Command::Reset).unwrap();
    assert!(matches!(
        engine.execute(Command::Undo),
        Err(SheetError::EmptyStore)
    ));
}

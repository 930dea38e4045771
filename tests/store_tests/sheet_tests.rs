//! Tests for the in-memory Sheet
//!
//! These tests verify:
//! - Header creation (idempotent, repairs a blank first row)
//! - Append order and record projection
//! - Lookup semantics (first match, data rows only, blank queries)
//! - Cell updates and row deletion by position

use serde_json::{json, Value};
use sheetlog::store::{CellRef, Sheet, TabularStore, HEADER, TIMESTAMP_COLUMN, UNIT_COLUMN};
use sheetlog::SheetError;

// =============================================================================
// Helper Functions
// =============================================================================

fn sheet_with_rows(rows: &[[Value; 3]]) -> Sheet {
    let mut sheet = Sheet::new();
    sheet.ensure_header().unwrap();
    for row in rows {
        sheet.append_row(row.to_vec()).unwrap();
    }
    sheet
}

// =============================================================================
// Header Tests
// =============================================================================

#[test]
fn test_ensure_header_creates_once() {
    let mut sheet = Sheet::new();

    assert!(sheet.ensure_header().unwrap());
    assert!(!sheet.ensure_header().unwrap());

    assert_eq!(sheet.row_count().unwrap(), 1);
    let header: Vec<Value> = HEADER.iter().map(|name| json!(name)).collect();
    assert_eq!(sheet.row_values(1).unwrap(), header);
}

#[test]
fn test_ensure_header_replaces_blank_first_row() {
    let mut sheet = Sheet::from_rows(vec![vec![json!(""), Value::Null], vec![json!("T1")]]);

    assert!(sheet.ensure_header().unwrap());
    assert_eq!(sheet.row_count().unwrap(), 2);
    assert_eq!(
        sheet.row_values(1).unwrap(),
        vec![json!("Timestamp"), json!("Amount"), json!("Unit")]
    );
}

#[test]
fn test_ensure_header_keeps_existing_header() {
    let mut sheet = Sheet::from_rows(vec![vec![json!("When"), json!("How much"), json!("Unit")]]);

    assert!(!sheet.ensure_header().unwrap());
    sheet.append_row(vec![json!("T1"), json!(1), json!("oz")]).unwrap();

    let records = sheet.all_records().unwrap();
    assert_eq!(records[0].get("When"), Some(&json!("T1")));
}

// =============================================================================
// Append / Records Tests
// =============================================================================

#[test]
fn test_append_returns_position() {
    let mut sheet = sheet_with_rows(&[]);

    assert_eq!(sheet.append_row(vec![json!("T1"), json!(1), json!("oz")]).unwrap(), 2);
    assert_eq!(sheet.append_row(vec![json!("T2"), json!(2), json!("oz")]).unwrap(), 3);
}

#[test]
fn test_all_records_in_append_order() {
    let sheet = sheet_with_rows(&[
        [json!("T2"), json!(2), json!("ml")],
        [json!("T1"), json!(1), json!("oz")],
    ]);

    let records = sheet.all_records().unwrap();

    assert_eq!(
        Value::Array(records.into_iter().map(Value::Object).collect()),
        json!([
            {"Timestamp": "T2", "Amount": 2, "Unit": "ml"},
            {"Timestamp": "T1", "Amount": 1, "Unit": "oz"}
        ])
    );
}

#[test]
fn test_record_keys_follow_header_order() {
    let sheet = sheet_with_rows(&[[json!("T1"), json!(1), json!("oz")]]);

    let records = sheet.all_records().unwrap();
    let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();

    assert_eq!(keys, HEADER.to_vec());
}

#[test]
fn test_null_cells_stored_blank() {
    let mut sheet = sheet_with_rows(&[]);
    sheet.append_row(vec![json!("T1"), Value::Null, Value::Null]).unwrap();

    assert_eq!(sheet.row_values(2).unwrap(), vec![json!("T1"), json!(""), json!("")]);
}

#[test]
fn test_short_row_padded_in_records() {
    let mut sheet = sheet_with_rows(&[]);
    sheet.append_row(vec![json!("T1")]).unwrap();

    let records = sheet.all_records().unwrap();

    assert_eq!(
        Value::Object(records[0].clone()),
        json!({"Timestamp": "T1", "Amount": "", "Unit": ""})
    );
}

#[test]
fn test_all_records_on_headerless_sheet() {
    let sheet = Sheet::new();
    assert!(sheet.all_records().unwrap().is_empty());
}

// =============================================================================
// Find Tests
// =============================================================================

#[test]
fn test_find_locates_row_and_column() {
    let sheet = sheet_with_rows(&[
        [json!("T1"), json!(1), json!("oz")],
        [json!("T2"), json!(2), json!("ml")],
    ]);

    assert_eq!(
        sheet.find(&json!("T2")).unwrap(),
        CellRef { row: 3, column: TIMESTAMP_COLUMN }
    );
    assert_eq!(
        sheet.find(&json!("ml")).unwrap(),
        CellRef { row: 3, column: UNIT_COLUMN }
    );
}

#[test]
fn test_find_first_match_wins() {
    let sheet = sheet_with_rows(&[
        [json!("T1"), json!(1), json!("oz")],
        [json!("T1"), json!(2), json!("ml")],
    ]);

    assert_eq!(sheet.find(&json!("T1")).unwrap().row, 2);
}

#[test]
fn test_find_compares_text() {
    let sheet = sheet_with_rows(&[[json!(1700000000), json!(8), json!("oz")]]);

    assert_eq!(sheet.find(&json!("1700000000")).unwrap().row, 2);
    assert_eq!(sheet.find(&json!(1700000000)).unwrap().row, 2);
}

#[test]
fn test_find_skips_header_row() {
    let sheet = sheet_with_rows(&[[json!("T1"), json!(1), json!("oz")]]);

    assert!(matches!(sheet.find(&json!("Timestamp")), Err(SheetError::NotFound(_))));
}

#[test]
fn test_find_blank_never_matches() {
    let mut sheet = sheet_with_rows(&[]);
    sheet.append_row(vec![Value::Null, json!(1), json!("oz")]).unwrap();

    assert!(matches!(sheet.find(&Value::Null), Err(SheetError::NotFound(_))));
    assert!(matches!(sheet.find(&json!("")), Err(SheetError::NotFound(_))));
}

#[test]
fn test_find_missing_reports_query() {
    let sheet = sheet_with_rows(&[]);

    let err = sheet.find(&json!("T404")).unwrap_err();
    assert_eq!(err.to_string(), "Not found: T404");
}

// =============================================================================
// Update / Delete Tests
// =============================================================================

#[test]
fn test_update_cell() {
    let mut sheet = sheet_with_rows(&[[json!("T1"), json!(1), json!("oz")]]);

    sheet.update_cell(2, 2, json!(99)).unwrap();

    assert_eq!(sheet.row_values(2).unwrap(), vec![json!("T1"), json!(99), json!("oz")]);
}

#[test]
fn test_update_cell_pads_short_row() {
    let mut sheet = sheet_with_rows(&[]);
    sheet.append_row(vec![json!("T1")]).unwrap();

    sheet.update_cell(2, 3, json!("ml")).unwrap();

    assert_eq!(sheet.row_values(2).unwrap(), vec![json!("T1"), json!(""), json!("ml")]);
}

#[test]
fn test_update_cell_out_of_range() {
    let mut sheet = sheet_with_rows(&[[json!("T1"), json!(1), json!("oz")]]);

    assert!(matches!(
        sheet.update_cell(3, 1, json!("x")),
        Err(SheetError::RowOutOfRange { row: 3, row_count: 2 })
    ));
    assert!(matches!(
        sheet.update_cell(2, 4, json!("x")),
        Err(SheetError::ColumnOutOfRange { column: 4, .. })
    ));
    assert!(matches!(
        sheet.update_cell(2, 0, json!("x")),
        Err(SheetError::ColumnOutOfRange { column: 0, .. })
    ));
}

#[test]
fn test_update_cells_writes_consecutive_columns() {
    let mut sheet = sheet_with_rows(&[[json!("T1"), json!(1), json!("oz")]]);

    sheet.update_cells(2, 2, vec![json!(5), json!("ml")]).unwrap();

    assert_eq!(sheet.row_values(2).unwrap(), vec![json!("T1"), json!(5), json!("ml")]);
}

#[test]
fn test_update_cells_overrun_writes_nothing() {
    let mut sheet = sheet_with_rows(&[[json!("T1"), json!(1), json!("oz")]]);

    let result = sheet.update_cells(2, 2, vec![json!(5), json!("ml"), json!("extra")]);

    assert!(matches!(result, Err(SheetError::ColumnOutOfRange { column: 4, .. })));
    assert_eq!(sheet.row_values(2).unwrap(), vec![json!("T1"), json!(1), json!("oz")]);
}

#[test]
fn test_delete_single_row_shifts_later_rows() {
    let mut sheet = sheet_with_rows(&[
        [json!("T1"), json!(1), json!("oz")],
        [json!("T2"), json!(2), json!("oz")],
        [json!("T3"), json!(3), json!("oz")],
    ]);

    sheet.delete_row(3).unwrap();

    assert_eq!(sheet.row_count().unwrap(), 3);
    assert_eq!(sheet.row_values(3).unwrap()[0], json!("T3"));
}

#[test]
fn test_delete_range_inclusive() {
    let mut sheet = sheet_with_rows(&[
        [json!("T1"), json!(1), json!("oz")],
        [json!("T2"), json!(2), json!("oz")],
        [json!("T3"), json!(3), json!("oz")],
    ]);

    sheet.delete_rows(2, 3).unwrap();

    assert_eq!(sheet.row_count().unwrap(), 2);
    assert_eq!(sheet.row_values(2).unwrap()[0], json!("T3"));
}

#[test]
fn test_delete_invalid_ranges() {
    let mut sheet = sheet_with_rows(&[[json!("T1"), json!(1), json!("oz")]]);

    assert!(matches!(sheet.delete_rows(0, 1), Err(SheetError::RowOutOfRange { .. })));
    assert!(matches!(sheet.delete_rows(2, 5), Err(SheetError::RowOutOfRange { .. })));
    assert!(matches!(sheet.delete_rows(2, 1), Err(SheetError::Storage(_))));
    assert_eq!(sheet.row_count().unwrap(), 2);
}

#[test]
fn test_boxed_store_delegates() {
    let mut store: Box<dyn TabularStore> = Box::new(Sheet::new());

    store.ensure_header().unwrap();
    store.append_row(vec![json!("T1"), json!(1), json!("oz")]).unwrap();

    assert_eq!(store.row_count().unwrap(), 2);
    assert_eq!(store.find(&json!("T1")).unwrap().row, 2);
}

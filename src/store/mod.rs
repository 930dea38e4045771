//! Store Module
//!
//! The tabular backing store behind every action.
//!
//! ## Responsibilities
//! - Keep an ordered sequence of rows under a fixed header row
//! - Address rows by 1-based position (row 1 is the header)
//! - Resolve a value to the first cell holding it
//!
//! ## Layout
//! ```text
//! ┌─────┬───────────┬────────┬──────┐
//! │ Row │ Timestamp │ Amount │ Unit │   <- row 1, header
//! ├─────┼───────────┼────────┼──────┤
//! │  2  │ T1        │ 8      │ oz   │   <- data rows, append order
//! │  3  │ T2        │ 250    │ ml   │
//! └─────┴───────────┴────────┴──────┘
//! ```
//!
//! Cells are JSON scalars. A sheet has no null cells: `null` is stored as the
//! blank string.

mod sheet;
mod file;

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::Result;

pub use sheet::Sheet;
pub use file::{
    decode_snapshot, encode_snapshot, FileStore, MAGIC, SNAPSHOT_HEADER_SIZE, SNAPSHOT_VERSION,
};

/// Column names of the header row, in column order
pub const HEADER: [&str; 3] = ["Timestamp", "Amount", "Unit"];

/// Position of the header row
pub const HEADER_ROW: usize = 1;

/// Position of the first data row
pub const FIRST_DATA_ROW: usize = 2;

/// 1-based column of each header field
pub const TIMESTAMP_COLUMN: usize = 1;
pub const AMOUNT_COLUMN: usize = 2;
pub const UNIT_COLUMN: usize = 3;

/// One data row projected onto the header names
pub type Record = Map<String, Value>;

/// Location of a cell returned by [`TabularStore::find`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    /// 1-based row position (header is row 1)
    pub row: usize,

    /// 1-based column position
    pub column: usize,
}

/// Capability interface over an ordered, header-having table
///
/// Positions are 1-based and count the header row. Implementations never
/// reorder rows: `append_row` always writes after the current last row.
pub trait TabularStore {
    /// Write the header row if the sheet has none. Returns `true` if it was created.
    fn ensure_header(&mut self) -> Result<bool>;

    /// Append a row after the last one, returning its position
    fn append_row(&mut self, values: Vec<Value>) -> Result<usize>;

    /// All data rows (header excluded) keyed by header names, in row order
    fn all_records(&self) -> Result<Vec<Record>>;

    /// Locate the first data-row cell whose text equals `value`
    ///
    /// Rows are scanned in position order and cells left to right, so when
    /// several rows hold the value the lowest position wins. A blank query
    /// never matches. Fails with [`SheetError::NotFound`](crate::SheetError::NotFound).
    fn find(&self, value: &Value) -> Result<CellRef>;

    /// Values of the row at `row`
    fn row_values(&self, row: usize) -> Result<Vec<Value>>;

    /// Overwrite a single cell
    fn update_cell(&mut self, row: usize, column: usize, value: Value) -> Result<()>;

    /// Overwrite consecutive cells of one row, starting at `column`
    ///
    /// Implementations that can should apply all cells or none. The default
    /// writes them one at a time.
    fn update_cells(&mut self, row: usize, column: usize, values: Vec<Value>) -> Result<()> {
        for (offset, value) in values.into_iter().enumerate() {
            self.update_cell(row, column + offset, value)?;
        }
        Ok(())
    }

    /// Delete rows `start..=end`
    fn delete_rows(&mut self, start: usize, end: usize) -> Result<()>;

    /// Delete the single row at `row`
    fn delete_row(&mut self, row: usize) -> Result<()> {
        self.delete_rows(row, row)
    }

    /// Number of filled rows, header included
    fn row_count(&self) -> Result<usize>;
}

impl<S: TabularStore + ?Sized> TabularStore for Box<S> {
    fn ensure_header(&mut self) -> Result<bool> {
        (**self).ensure_header()
    }

    fn append_row(&mut self, values: Vec<Value>) -> Result<usize> {
        (**self).append_row(values)
    }

    fn all_records(&self) -> Result<Vec<Record>> {
        (**self).all_records()
    }

    fn find(&self, value: &Value) -> Result<CellRef> {
        (**self).find(value)
    }

    fn row_values(&self, row: usize) -> Result<Vec<Value>> {
        (**self).row_values(row)
    }

    fn update_cell(&mut self, row: usize, column: usize, value: Value) -> Result<()> {
        (**self).update_cell(row, column, value)
    }

    fn update_cells(&mut self, row: usize, column: usize, values: Vec<Value>) -> Result<()> {
        (**self).update_cells(row, column, values)
    }

    fn delete_rows(&mut self, start: usize, end: usize) -> Result<()> {
        (**self).delete_rows(start, end)
    }

    fn row_count(&self) -> Result<usize> {
        (**self).row_count()
    }
}

// =============================================================================
// Cell helpers
// =============================================================================

/// Blank cell value
pub fn blank() -> Value {
    Value::String(String::new())
}

/// Replace `null` with the blank string
pub fn normalize_cell(value: Value) -> Value {
    match value {
        Value::Null => blank(),
        other => other,
    }
}

/// Text shown for a cell, as a spreadsheet would display it
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Whether `cell` holds `query` (text comparison, blank queries never match)
pub fn cell_matches(cell: &Value, query: &Value) -> bool {
    let query = cell_text(query);
    !query.is_empty() && cell_text(cell) == query
}

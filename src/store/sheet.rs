//! In-memory sheet
//!
//! Vec-of-rows table implementing [`TabularStore`]. Also the working copy
//! behind [`FileStore`](super::FileStore).

use serde_json::Value;

use crate::error::{Result, SheetError};

use super::{
    blank, cell_matches, cell_text, normalize_cell, CellRef, Record, TabularStore, FIRST_DATA_ROW,
    HEADER,
};

/// Rows held in memory, row 1 at index 0
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Value>>,
}

impl Sheet {
    /// Create an empty sheet (no header yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet from existing rows, header first
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(normalize_cell).collect())
            .collect();
        Self { rows }
    }

    /// Borrow all rows, header included
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Translate a 1-based row position into a vector index
    fn row_index(&self, row: usize) -> Result<usize> {
        if row == 0 || row > self.rows.len() {
            return Err(SheetError::RowOutOfRange {
                row,
                row_count: self.rows.len(),
            });
        }
        Ok(row - 1)
    }

    fn header_missing(&self) -> bool {
        match self.rows.first() {
            None => true,
            Some(first) => first.iter().all(|cell| cell_text(cell).is_empty()),
        }
    }

    fn to_record(header: &[Value], row: &[Value]) -> Record {
        header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = row.get(i).cloned().unwrap_or_else(blank);
                (cell_text(name).into_owned(), value)
            })
            .collect()
    }
}

impl TabularStore for Sheet {
    fn ensure_header(&mut self) -> Result<bool> {
        if !self.header_missing() {
            return Ok(false);
        }

        let header: Vec<Value> = HEADER.iter().map(|name| Value::from(*name)).collect();
        if self.rows.is_empty() {
            self.rows.push(header);
        } else {
            self.rows[0] = header;
        }
        Ok(true)
    }

    fn append_row(&mut self, values: Vec<Value>) -> Result<usize> {
        self.rows.push(values.into_iter().map(normalize_cell).collect());
        Ok(self.rows.len())
    }

    fn all_records(&self) -> Result<Vec<Record>> {
        let Some((header, data)) = self.rows.split_first() else {
            return Ok(Vec::new());
        };
        Ok(data.iter().map(|row| Self::to_record(header, row)).collect())
    }

    fn find(&self, value: &Value) -> Result<CellRef> {
        // Header row is never a lookup target
        let data = self.rows.iter().enumerate().skip(FIRST_DATA_ROW - 1);
        for (index, row) in data {
            if let Some(column) = row.iter().position(|cell| cell_matches(cell, value)) {
                return Ok(CellRef {
                    row: index + 1,
                    column: column + 1,
                });
            }
        }
        Err(SheetError::NotFound(cell_text(value).into_owned()))
    }

    fn row_values(&self, row: usize) -> Result<Vec<Value>> {
        let index = self.row_index(row)?;
        Ok(self.rows[index].clone())
    }

    fn update_cell(&mut self, row: usize, column: usize, value: Value) -> Result<()> {
        self.update_cells(row, column, vec![value])
    }

    fn update_cells(&mut self, row: usize, column: usize, values: Vec<Value>) -> Result<()> {
        let index = self.row_index(row)?;
        let last = column + values.len().saturating_sub(1);
        if column == 0 || last > HEADER.len() {
            return Err(SheetError::ColumnOutOfRange {
                column: if column == 0 { 0 } else { last },
                column_count: HEADER.len(),
            });
        }

        let cells = &mut self.rows[index];
        if cells.len() < last {
            cells.resize(last, blank());
        }
        for (offset, value) in values.into_iter().enumerate() {
            cells[column - 1 + offset] = normalize_cell(value);
        }
        Ok(())
    }

    fn delete_rows(&mut self, start: usize, end: usize) -> Result<()> {
        let first = self.row_index(start)?;
        let last = self.row_index(end)?;
        if first > last {
            return Err(SheetError::Storage(format!(
                "Invalid row range: {} > {}",
                start, end
            )));
        }
        self.rows.drain(first..=last);
        Ok(())
    }

    fn row_count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }
}

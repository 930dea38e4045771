//! Engine Module
//!
//! The action handlers that translate commands into store operations.
//!
//! ## Responsibilities
//! - Make sure the header row exists before any action runs
//! - Map each action onto one or more [`TabularStore`] calls
//! - Resolve timestamps to row positions through `find`
//! - Build the result message (and data) for each action

use serde_json::Value;

use crate::error::{Result, SheetError};
use crate::protocol::{Command, Entry};
use crate::store::{Record, TabularStore, AMOUNT_COLUMN, FIRST_DATA_ROW, HEADER_ROW};

/// Result of a successful action
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Confirmation text
    pub message: String,

    /// Payload for actions that return one (read, undo)
    pub data: Option<Value>,
}

impl Outcome {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    fn with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

/// The action engine
///
/// ## Ownership Model
///
/// The engine owns its store outright and every mutating action takes
/// `&mut self`. Multi-step sequences (find then update, find then delete,
/// read last row then delete it) are therefore never interleaved with
/// another action. Callers that want to share an engine across threads must
/// serialize whole actions, not individual store calls.
pub struct Engine<S> {
    store: S,
}

impl<S: TabularStore> Engine<S> {
    /// Wrap a store, creating the header row if it is missing
    pub fn open(mut store: S) -> Result<Self> {
        if store.ensure_header()? {
            tracing::info!("Created header row");
        }
        Ok(Self { store })
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Create(entry) => self.create(entry),
            Command::Read => self.read(),
            Command::Update(entry) => self.update(entry),
            Command::Delete { timestamp } => self.delete(&timestamp),
            Command::Reset => self.reset(),
            Command::Undo => self.undo(),
        }
    }

    /// Append `[timestamp, amount, unit]` as a new row
    ///
    /// Missing fields are not rejected; they become blank cells.
    pub fn create(&mut self, entry: Entry) -> Result<Outcome> {
        let row = self.store.append_row(entry.into_row())?;
        tracing::debug!("Appended entry at row {}", row);
        Ok(Outcome::message("Entry created"))
    }

    /// All records, in insertion order
    pub fn records(&self) -> Result<Vec<Record>> {
        self.store.all_records()
    }

    /// Read every data row as a record
    pub fn read(&self) -> Result<Outcome> {
        let records = self.records()?;
        let count = records.len();
        let data = Value::Array(records.into_iter().map(Value::Object).collect());
        Ok(Outcome::with_data(format!("Retrieved {} entries", count), data))
    }

    /// Overwrite amount and unit of the row holding `entry.timestamp`
    ///
    /// The timestamp cell itself is left untouched. When several rows match,
    /// the first one in row order is updated. Both cells go to the store in
    /// one `update_cells` call.
    pub fn update(&mut self, entry: Entry) -> Result<Outcome> {
        let cell = self.store.find(&entry.timestamp)?;
        self.store.update_cells(cell.row, AMOUNT_COLUMN, vec![entry.amount, entry.unit])?;
        tracing::debug!("Updated entry at row {}", cell.row);
        Ok(Outcome::message("Entry updated"))
    }

    /// Delete the row holding `timestamp`
    pub fn delete(&mut self, timestamp: &Value) -> Result<Outcome> {
        let cell = self.store.find(timestamp)?;
        self.store.delete_row(cell.row)?;
        tracing::debug!("Deleted entry at row {}", cell.row);
        Ok(Outcome::message("Entry deleted"))
    }

    /// Delete every data row, keeping the header
    pub fn reset(&mut self) -> Result<Outcome> {
        let row_count = self.store.row_count()?;
        if row_count >= FIRST_DATA_ROW {
            self.store.delete_rows(FIRST_DATA_ROW, row_count)?;
        }
        tracing::debug!("Reset removed {} rows", row_count.saturating_sub(HEADER_ROW));
        Ok(Outcome::message("All data reset"))
    }

    /// Delete the last row and return the values it held
    ///
    /// Purely positional: whatever row is last is removed, regardless of
    /// which action put it there.
    pub fn undo(&mut self) -> Result<Outcome> {
        let row_count = self.store.row_count()?;
        if row_count <= HEADER_ROW {
            return Err(SheetError::EmptyStore);
        }

        let values = self.store.row_values(row_count)?;
        self.store.delete_row(row_count)?;
        tracing::debug!("Undid row {}", row_count);
        Ok(Outcome::with_data("Last entry undone (deleted).", Value::Array(values)))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Borrow the store
    pub fn store(&self) -> &S {
        &self.store
    }
}

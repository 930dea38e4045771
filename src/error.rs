//! Error types for SheetLog
//!
//! Provides a unified error type for all operations, plus the closed set of
//! [`ErrorKind`]s that error responses expose to clients.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using SheetError
pub type Result<T> = std::result::Result<T, SheetError>;

/// Unified error type for SheetLog operations
#[derive(Debug, Error)]
pub enum SheetError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Invalid request format")]
    MalformedRequest,

    #[error("Invalid action: {0}")]
    UnknownAction(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No entries to undo.")]
    EmptyStore,

    #[error("Row {row} out of range (sheet has {row_count} rows)")]
    RowOutOfRange { row: usize, row_count: usize },

    #[error("Column {column} out of range (sheet has {column_count} columns)")]
    ColumnOutOfRange { column: usize, column_count: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Sheet corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SheetError {
    /// Map this error onto the kind reported to clients
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetError::MalformedRequest
            | SheetError::Protocol(_)
            | SheetError::Serialization(_) => ErrorKind::MalformedRequest,
            SheetError::UnknownAction(_) => ErrorKind::UnknownAction,
            SheetError::NotFound(_) => ErrorKind::LookupFailure,
            SheetError::EmptyStore => ErrorKind::EmptyStore,
            SheetError::Io(_)
            | SheetError::RowOutOfRange { .. }
            | SheetError::ColumnOutOfRange { .. }
            | SheetError::Storage(_)
            | SheetError::Corruption(_)
            | SheetError::Config(_) => ErrorKind::StoreFailure,
        }
    }
}

/// Closed set of failure kinds visible on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or empty action, or an undecodable request
    MalformedRequest,

    /// Action outside the recognised set
    UnknownAction,

    /// Timestamp lookup found no row
    LookupFailure,

    /// Undo on a sheet with no data rows
    EmptyStore,

    /// Any other backing-store failure
    StoreFailure,
}

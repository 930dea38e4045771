//! File-backed store
//!
//! Keeps the sheet in memory and rewrites a checksummed snapshot after every
//! mutation, so the sheet survives restarts.
//!
//! ## File Format
//! ```text
//! ┌──────────┬────────────┬──────────┬──────────┬──────────────────────┐
//! │Magic (4) │Version (2) │ CRC (4)  │ Len (4)  │ JSON rows payload    │
//! └──────────┴────────────┴──────────┴──────────┴──────────────────────┘
//! ```
//! All integers are big-endian. The CRC32 covers the payload only.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, SheetError};

use super::{CellRef, Record, Sheet, TabularStore};

/// Magic bytes at the start of every snapshot
pub const MAGIC: &[u8; 4] = b"SHLG";

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u16 = 1;

/// Magic (4) + version (2) + crc (4) + payload length (4)
pub const SNAPSHOT_HEADER_SIZE: usize = 14;

/// Sheet persisted to a single snapshot file
#[derive(Debug)]
pub struct FileStore {
    /// Snapshot location
    path: PathBuf,

    /// Working copy, always equal to the last snapshot written
    sheet: Sheet,
}

impl FileStore {
    /// Open the snapshot at `path`, or start an empty sheet if it does not exist
    ///
    /// The parent directory is created when missing.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let sheet = if path.exists() {
            let bytes = fs::read(path)?;
            let sheet = Sheet::from_rows(decode_snapshot(&bytes)?);
            tracing::debug!(
                "Loaded sheet snapshot {} ({} rows)",
                path.display(),
                sheet.rows().len()
            );
            sheet
        } else {
            Sheet::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            sheet,
        })
    }

    /// Get the snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow the in-memory working copy
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Apply `op` to a copy of the sheet, persist it, then adopt it
    ///
    /// If persisting fails the working copy is left untouched.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut Sheet) -> Result<T>) -> Result<T> {
        let mut next = self.sheet.clone();
        let out = op(&mut next)?;
        write_snapshot(&self.path, next.rows())?;
        self.sheet = next;
        Ok(out)
    }
}

impl TabularStore for FileStore {
    fn ensure_header(&mut self) -> Result<bool> {
        let mut next = self.sheet.clone();
        if !next.ensure_header()? {
            return Ok(false);
        }
        write_snapshot(&self.path, next.rows())?;
        self.sheet = next;
        Ok(true)
    }

    fn append_row(&mut self, values: Vec<Value>) -> Result<usize> {
        self.mutate(|sheet| sheet.append_row(values))
    }

    fn all_records(&self) -> Result<Vec<Record>> {
        self.sheet.all_records()
    }

    fn find(&self, value: &Value) -> Result<CellRef> {
        self.sheet.find(value)
    }

    fn row_values(&self, row: usize) -> Result<Vec<Value>> {
        self.sheet.row_values(row)
    }

    fn update_cell(&mut self, row: usize, column: usize, value: Value) -> Result<()> {
        self.mutate(|sheet| sheet.update_cell(row, column, value))
    }

    fn update_cells(&mut self, row: usize, column: usize, values: Vec<Value>) -> Result<()> {
        self.mutate(|sheet| sheet.update_cells(row, column, values))
    }

    fn delete_rows(&mut self, start: usize, end: usize) -> Result<()> {
        self.mutate(|sheet| sheet.delete_rows(start, end))
    }

    fn row_count(&self) -> Result<usize> {
        self.sheet.row_count()
    }
}

// =============================================================================
// Snapshot encoding
// =============================================================================

/// Encode rows into snapshot bytes
pub fn encode_snapshot(rows: &[Vec<Value>]) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(rows)?;
    let checksum = crc32fast::hash(&payload);

    let mut bytes = Vec::with_capacity(SNAPSHOT_HEADER_SIZE + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_be_bytes());
    bytes.extend_from_slice(&checksum.to_be_bytes());
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Decode snapshot bytes back into rows
pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<Vec<Value>>> {
    if bytes.len() < SNAPSHOT_HEADER_SIZE {
        return Err(SheetError::Corruption(format!(
            "Incomplete header: expected {} bytes, got {}",
            SNAPSHOT_HEADER_SIZE,
            bytes.len()
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(SheetError::Corruption("Bad magic bytes".to_string()));
    }

    let version = u16::from_be_bytes([bytes[4], bytes[5]]);
    if version != SNAPSHOT_VERSION {
        return Err(SheetError::Corruption(format!(
            "Unsupported snapshot version: {}",
            version
        )));
    }

    let expected_crc = u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
    let payload_len = u32::from_be_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]) as usize;

    let payload = &bytes[SNAPSHOT_HEADER_SIZE..];
    if payload.len() != payload_len {
        return Err(SheetError::Corruption(format!(
            "Payload length mismatch: header says {}, found {}",
            payload_len,
            payload.len()
        )));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(SheetError::Corruption(format!(
            "Checksum mismatch: expected {:08x}, got {:08x}",
            expected_crc, actual_crc
        )));
    }

    serde_json::from_slice(payload)
        .map_err(|e| SheetError::Corruption(format!("Invalid rows payload: {}", e)))
}

/// Write a snapshot atomically (temp file, fsync, rename)
fn write_snapshot(path: &Path, rows: &[Vec<Value>]) -> Result<()> {
    let bytes = encode_snapshot(rows)?;
    let tmp_path = path.with_extension("db.tmp");

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    tracing::trace!("Wrote sheet snapshot {} ({} rows)", path.display(), rows.len());
    Ok(())
}

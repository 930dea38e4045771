//! Configuration for SheetLog
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a SheetLog service
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the sheet snapshot
    /// Internal structure:
    ///   {data_dir}/
    ///     └── sheet.db         (checksummed snapshot of all rows)
    pub data_dir: PathBuf,

    /// Which store implementation backs the service
    pub store_backend: StoreBackend,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Largest accepted frame payload (in bytes)
    pub max_payload_size: usize,

    /// Connection read timeout (milliseconds, 0 disables)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 disables)
    pub write_timeout_ms: u64,
}

/// Store implementation selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Snapshot file under `data_dir`, survives restarts
    File,

    /// Process-local sheet, lost on exit
    Memory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./sheetlog_data"),
            store_backend: StoreBackend::File,
            listen_addr: "0.0.0.0:5555".to_string(),
            max_payload_size: 16 * 1024 * 1024, // 16 MB
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Snapshot file name inside `data_dir`
    pub const SHEET_FILENAME: &'static str = "sheet.db";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the sheet snapshot
    pub fn sheet_path(&self) -> PathBuf {
        self.data_dir.join(Self::SHEET_FILENAME)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for the sheet snapshot)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the store backend
    pub fn store_backend(mut self, backend: StoreBackend) -> Self {
        self.config.store_backend = backend;
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum frame payload size (in bytes)
    pub fn max_payload_size(mut self, size: usize) -> Self {
        self.config.max_payload_size = size;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

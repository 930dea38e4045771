//! # SheetLog
//!
//! A request/reply microservice exposing CRUD over a tabular store:
//! - Six actions: create, read, update, delete, reset, undo
//! - Timestamp as logical key, row position as storage address
//! - Framed JSON protocol over TCP, one response per request
//! - Pluggable store (in-memory sheet or checksummed snapshot file)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                             │
//! │            (one connection, one request at a time)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  frame → JSON request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Dispatcher                              │
//! │        (validate action, route, errors → responses)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                │
//! │     create / read / update / delete / reset / undo          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Sheet    │          │  FileStore  │
//!   │ (in-memory) │          │ (snapshot)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod protocol;
pub mod engine;
pub mod dispatcher;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, Result, SheetError};
pub use config::{Config, StoreBackend};
pub use engine::Engine;
pub use dispatcher::Dispatcher;
pub use store::{FileStore, Sheet, TabularStore};
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SheetLog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single thread: accept, serve one connection, accept the next
//! - Per connection: read request, dispatch, write response, repeat

mod server;
mod connection;

pub use server::Server;
pub use connection::Connection;

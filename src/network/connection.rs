//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::dispatcher::Dispatcher;
use crate::error::{Result, SheetError};
use crate::protocol::{encode_response, read_request_payload, Response};
use crate::store::TabularStore;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Largest request payload accepted
    max_payload: usize,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and disables Nagle's algorithm
    pub fn new(stream: TcpStream, max_payload: usize) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            max_payload,
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves a direction without timeout)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Strict request/reply alternation: one request is read, fully executed
    /// and answered before the next one is read. Returns when the client
    /// disconnects or the stream fails.
    pub fn handle<S: TabularStore>(&mut self, dispatcher: &mut Dispatcher<S>) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            let response = match read_request_payload(&mut self.reader, self.max_payload) {
                Ok(payload) => dispatcher.dispatch_payload(&payload),
                Err(SheetError::Io(ref e)) if is_disconnect(e.kind()) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(SheetError::Io(ref e)) if is_timeout(e.kind()) => {
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e @ SheetError::Io(_)) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
                // Frame was consumed; answer it and keep serving
                Err(e) => dispatcher.reject(&e),
            };

            if let Err(e) = self.send_response(&response) {
                if let SheetError::Io(ref io_err) = e {
                    if is_disconnect(io_err.kind()) {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Send a response to the client
    ///
    /// A response that cannot be framed (payload over the frame limit) is
    /// replaced by a `store_failure` error, so the client still gets a reply.
    fn send_response(&mut self, response: &Response) -> Result<()> {
        let frame = match encode_response(response) {
            Ok(frame) => frame,
            Err(e @ SheetError::Io(_)) => return Err(e),
            Err(e) => {
                tracing::warn!("Cannot encode response for {}: {}", self.peer_addr, e);
                let fallback =
                    Response::error(crate::ErrorKind::StoreFailure, "Response too large");
                encode_response(&fallback)?
            }
        };

        self.writer.write_all(&frame)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
    )
}

// Windows reports TimedOut where Unix reports WouldBlock
fn is_timeout(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

//! TCP Server
//!
//! Accepts connections and serves them one at a time.

use std::net::{SocketAddr, TcpListener, TcpStream};

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{Result, SheetError};
use crate::store::TabularStore;

use super::Connection;

/// TCP server for SheetLog
///
/// Single-threaded: the accept loop serves each connection to completion
/// before accepting the next, so the dispatcher (and the store behind it)
/// only ever sees one request at a time. Clients that connect meanwhile wait
/// in the listen backlog.
pub struct Server<S> {
    config: Config,
    listener: TcpListener,
    dispatcher: Dispatcher<S>,
}

impl<S: TabularStore> Server<S> {
    /// Bind the listen address from `config`
    pub fn bind(config: Config, dispatcher: Dispatcher<S>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            SheetError::Config(format!("Failed to bind {}: {}", config.listen_addr, e))
        })?;

        Ok(Self {
            config,
            listener,
            dispatcher,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start the server (blocking)
    ///
    /// Runs until the process is terminated. Failed connections are logged
    /// and never stop the loop.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        loop {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    if let Err(e) = self.serve(stream) {
                        tracing::warn!("Connection {} ended with error: {}", addr, e);
                    }
                }
                Err(e) => tracing::warn!("Failed to accept connection: {}", e),
            }
        }
    }

    /// Serve a single accepted stream until the client disconnects
    pub fn serve(&mut self, stream: TcpStream) -> Result<()> {
        let mut connection = Connection::new(stream, self.config.max_payload_size)?;
        connection.set_timeouts(self.config.read_timeout_ms, self.config.write_timeout_ms)?;
        connection.handle(&mut self.dispatcher)
    }
}

//! Blocking client
//!
//! Connects to a SheetLog server and exchanges one response per request.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use serde_json::Value;

use crate::error::Result;
use crate::protocol::{read_response, write_request, Command, Entry, Request, Response};

/// Client connection to a SheetLog server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to `addr`
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a raw request and wait for its response
    pub fn send(&mut self, request: &Request) -> Result<Response> {
        write_request(&mut self.writer, request)?;
        read_response(&mut self.reader)
    }

    /// Send a typed command
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        self.send(&command.to_request())
    }

    pub fn create(&mut self, entry: Entry) -> Result<Response> {
        self.execute(&Command::Create(entry))
    }

    pub fn read(&mut self) -> Result<Response> {
        self.execute(&Command::Read)
    }

    pub fn update(&mut self, entry: Entry) -> Result<Response> {
        self.execute(&Command::Update(entry))
    }

    pub fn delete(&mut self, timestamp: impl Into<Value>) -> Result<Response> {
        self.execute(&Command::Delete {
            timestamp: timestamp.into(),
        })
    }

    pub fn reset(&mut self) -> Result<Response> {
        self.execute(&Command::Reset)
    }

    pub fn undo(&mut self) -> Result<Response> {
        self.execute(&Command::Undo)
    }
}

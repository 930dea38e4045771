//! Protocol codec
//!
//! Framing for JSON requests and responses.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Kind (1) │ Len (4)  │       JSON Payload          │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! - Kind: `0x51` ('Q') request, `0x52` ('R') response
//! - Len: payload length, big-endian

use std::io::{self, Read, Write};

use crate::error::{Result, SheetError};

use super::{Request, Response};

/// Header size: 1 byte kind + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Frame kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameKind {
    Request = 0x51,
    Response = 0x52,
}

impl FrameKind {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x51 => Some(FrameKind::Request),
            0x52 => Some(FrameKind::Response),
            _ => None,
        }
    }
}

// =============================================================================
// Frame Encoding/Decoding
// =============================================================================

/// Encode a payload into a frame
///
/// Format: kind (1) + payload_len (4) + payload
pub fn encode_frame(kind: FrameKind, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(SheetError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload.len(),
            MAX_PAYLOAD_SIZE
        )));
    }

    let mut message = Vec::with_capacity(HEADER_SIZE + payload.len());
    message.push(kind as u8);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(payload);

    Ok(message)
}

/// Decode a complete frame of the expected kind, returning its payload
pub fn decode_frame(bytes: &[u8], expected: FrameKind) -> Result<&[u8]> {
    if bytes.len() < HEADER_SIZE {
        return Err(SheetError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let (kind, payload_len) = parse_header(&[bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]);
    check_kind(kind, expected)?;

    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(SheetError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(SheetError::Protocol(format!(
            "Incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    Ok(&bytes[HEADER_SIZE..total_len])
}

/// Encode a request frame
pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    encode_frame(FrameKind::Request, &request.to_json()?)
}

/// Decode a request frame
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    Request::from_json(decode_frame(bytes, FrameKind::Request)?)
}

/// Encode a response frame
pub fn encode_response(response: &Response) -> Result<Vec<u8>> {
    encode_frame(FrameKind::Response, &response.to_json()?)
}

/// Decode a response frame
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    Response::from_json(decode_frame(bytes, FrameKind::Response)?)
}

fn parse_header(header: &[u8; HEADER_SIZE]) -> (u8, usize) {
    let payload_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;
    (header[0], payload_len)
}

fn check_kind(kind: u8, expected: FrameKind) -> Result<()> {
    match FrameKind::from_byte(kind) {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(SheetError::Protocol(format!(
            "Unexpected frame kind: expected {:?}, got {:?}",
            expected, found
        ))),
        None => Err(SheetError::Protocol(format!(
            "Unknown frame kind: 0x{:02x}",
            kind
        ))),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one complete frame from a stream and return its payload
///
/// Blocks until the frame is received. A frame that is well delimited but
/// invalid (wrong kind, payload over `max_payload`) is still consumed in full
/// before a [`SheetError::Protocol`] is returned, so the stream stays aligned
/// on frame boundaries. Only [`SheetError::Io`] leaves the stream unusable.
pub fn read_frame<R: Read>(
    reader: &mut R,
    expected: FrameKind,
    max_payload: usize,
) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let (kind, payload_len) = parse_header(&header);

    if payload_len > max_payload {
        discard(reader, payload_len)?;
        return Err(SheetError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, max_payload
        )));
    }

    let mut payload = vec![0u8; payload_len];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    check_kind(kind, expected)?;
    Ok(payload)
}

/// Read a request frame's payload (JSON still undecoded)
pub fn read_request_payload<R: Read>(reader: &mut R, max_payload: usize) -> Result<Vec<u8>> {
    read_frame(reader, FrameKind::Request, max_payload)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = encode_request(request)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let payload = read_frame(reader, FrameKind::Response, MAX_PAYLOAD_SIZE)?;
    Response::from_json(&payload)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Skip `len` payload bytes
fn discard<R: Read>(reader: &mut R, len: usize) -> Result<()> {
    let skipped = io::copy(&mut reader.by_ref().take(len as u64), &mut io::sink())?;
    if skipped < len as u64 {
        return Err(SheetError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended inside an oversized frame",
        )));
    }
    Ok(())
}

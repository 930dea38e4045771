//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Framed JSON)
//!
//! ### Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Kind (1) │ Len (4)  │       JSON Payload          │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Request Payload
//! `{"action": "create", "data": {"timestamp": "T1", "amount": 8, "unit": "oz"}}`
//!
//! ### Actions
//! - create: append `[timestamp, amount, unit]`
//! - read:   all records
//! - update: overwrite amount/unit of the row holding `timestamp`
//! - delete: remove the row holding `timestamp`
//! - reset:  remove every data row
//! - undo:   pop the last row
//!
//! ### Response Payload
//! `{"status": "success" | "error", "message": "...", "data": ..., "kind": ...}`

mod command;
mod request;
mod response;
mod codec;

pub use command::{Action, Command, Entry};
pub use request::Request;
pub use response::{Response, Status};
pub use codec::{
    decode_frame, decode_request, decode_response, encode_frame, encode_request, encode_response,
    read_frame, read_request_payload, read_response, write_request, write_response, FrameKind,
    HEADER_SIZE, MAX_PAYLOAD_SIZE,
};

//! Response definitions
//!
//! Represents responses to clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, Result, SheetError};

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Outcome of the request
    pub status: Status,

    /// Human-readable text, present on success and error
    pub message: String,

    /// Records for `read`, removed row values for `undo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Failure classification, errors only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl Response {
    /// Create a success response without data
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: None,
            kind: None,
        }
    }

    /// Create a success response carrying data
    pub fn success_with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
            kind: None,
        }
    }

    /// Create an error response
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            data: None,
            kind: Some(kind),
        }
    }

    /// Create an error response from a crate error
    pub fn from_error(err: &SheetError) -> Self {
        Self::error(err.kind(), err.to_string())
    }

    /// Whether the request succeeded
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Parse a JSON payload
    pub fn from_json(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }

    /// Serialize to a JSON payload
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

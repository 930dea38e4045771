//! Request definitions
//!
//! The JSON envelope clients send.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A request as decoded from the wire
///
/// Both fields are optional on the wire. Shape validation (empty or unknown
/// action, non-object data for the actions that read it) happens when the
/// request is turned into a [`Command`](super::Command).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Action name, matched case-insensitively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Action arguments, an object for create, update and delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Request {
    /// Create a request with no data
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            data: None,
        }
    }

    /// Create a request carrying `data`
    pub fn with_data(action: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            action: Some(action.into()),
            data: Some(Value::Object(data)),
        }
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

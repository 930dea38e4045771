//! Command definitions
//!
//! Typed actions built from a validated [`Request`].

use serde_json::{Map, Value};

use crate::error::{Result, SheetError};

use super::Request;

/// Recognised action names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Reset,
    Undo,
}

impl Action {
    /// Every action, in routing order
    pub const ALL: [Action; 6] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Reset,
        Action::Undo,
    ];

    /// Parse an action name (case-insensitive)
    ///
    /// An empty name is a malformed request; any other unrecognised name is
    /// an unknown action.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(SheetError::MalformedRequest);
        }
        match name.to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "reset" => Ok(Action::Reset),
            "undo" => Ok(Action::Undo),
            _ => Err(SheetError::UnknownAction(name.to_string())),
        }
    }

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Reset => "reset",
            Action::Undo => "undo",
        }
    }
}

/// Entry fields carried by create and update
///
/// Missing fields are `Value::Null` and land in the sheet as blank cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub timestamp: Value,
    pub amount: Value,
    pub unit: Value,
}

impl Entry {
    /// Build an entry from field values
    pub fn new(
        timestamp: impl Into<Value>,
        amount: impl Into<Value>,
        unit: impl Into<Value>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            amount: amount.into(),
            unit: unit.into(),
        }
    }

    /// Pick the entry fields out of request data, leniently
    pub fn from_data(data: Option<&Map<String, Value>>) -> Self {
        let field = |name: &str| data.and_then(|d| d.get(name)).cloned().unwrap_or(Value::Null);
        Self {
            timestamp: field("timestamp"),
            amount: field("amount"),
            unit: field("unit"),
        }
    }

    /// Request data for this entry
    pub fn to_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("timestamp".to_string(), self.timestamp.clone());
        data.insert("amount".to_string(), self.amount.clone());
        data.insert("unit".to_string(), self.unit.clone());
        data
    }

    /// Cells in header column order
    pub fn into_row(self) -> Vec<Value> {
        vec![self.timestamp, self.amount, self.unit]
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a new row
    Create(Entry),

    /// Read every data row
    Read,

    /// Overwrite amount and unit of the row holding `entry.timestamp`
    Update(Entry),

    /// Delete the row holding `timestamp`
    Delete { timestamp: Value },

    /// Delete every data row
    Reset,

    /// Pop the last row
    Undo,
}

impl Command {
    /// Validate a request and turn it into a command
    pub fn from_request(request: &Request) -> Result<Self> {
        let name = request.action.as_deref().unwrap_or_default();
        let action = Action::parse(name)?;

        Ok(match action {
            Action::Create => Command::Create(Entry::from_data(object_data(request)?)),
            Action::Read => Command::Read,
            Action::Update => Command::Update(Entry::from_data(object_data(request)?)),
            Action::Delete => Command::Delete {
                timestamp: Entry::from_data(object_data(request)?).timestamp,
            },
            Action::Reset => Command::Reset,
            Action::Undo => Command::Undo,
        })
    }

    /// Get the action
    pub fn action(&self) -> Action {
        match self {
            Command::Create(_) => Action::Create,
            Command::Read => Action::Read,
            Command::Update(_) => Action::Update,
            Command::Delete { .. } => Action::Delete,
            Command::Reset => Action::Reset,
            Command::Undo => Action::Undo,
        }
    }

    /// Build the wire request for this command
    pub fn to_request(&self) -> Request {
        let name = self.action().as_str();
        match self {
            Command::Create(entry) | Command::Update(entry) => {
                Request::with_data(name, entry.to_data())
            }
            Command::Delete { timestamp } => {
                let mut data = Map::new();
                data.insert("timestamp".to_string(), timestamp.clone());
                Request::with_data(name, data)
            }
            Command::Read | Command::Reset | Command::Undo => Request::new(name),
        }
    }
}

// Actions without arguments never look at `data`
fn object_data(request: &Request) -> Result<Option<&Map<String, Value>>> {
    match &request.data {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(data)) => Ok(Some(data)),
        Some(_) => Err(SheetError::MalformedRequest),
    }
}

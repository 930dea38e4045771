//! Request dispatch.
//!
//! Turns one decoded request into exactly one response. Validation failures,
//! unknown actions and handler errors all come back as error responses; no
//! error escapes the dispatcher, so the serving loop never stops on a bad
//! request.

use tracing::{debug, warn};

use crate::engine::{Engine, Outcome};
use crate::error::SheetError;
use crate::protocol::{Command, Request, Response};
use crate::store::TabularStore;

/// Tracing target for dispatch operations.
pub const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

impl From<Outcome> for Response {
    fn from(outcome: Outcome) -> Self {
        match outcome.data {
            Some(data) => Response::success_with_data(outcome.message, data),
            None => Response::success(outcome.message),
        }
    }
}

/// Routes requests to the engine and shapes the responses.
pub struct Dispatcher<S> {
    engine: Engine<S>,
}

impl<S: TabularStore> Dispatcher<S> {
    /// Creates a dispatcher over an opened engine.
    pub fn new(engine: Engine<S>) -> Self {
        Self { engine }
    }

    /// Decodes a JSON request payload and dispatches it.
    pub fn dispatch_payload(&mut self, payload: &[u8]) -> Response {
        match Request::from_json(payload) {
            Ok(request) => self.dispatch(&request),
            Err(error) => self.reject(&error),
        }
    }

    /// Validates, routes and executes a request.
    ///
    /// Empty or unknown actions are answered without touching the store.
    pub fn dispatch(&mut self, request: &Request) -> Response {
        let command = match Command::from_request(request) {
            Ok(command) => command,
            Err(error) => return self.reject(&error),
        };

        let action = command.action().as_str();
        debug!(target: DISPATCH_TARGET, action, "dispatching request");

        match self.engine.execute(command) {
            Ok(outcome) => outcome.into(),
            Err(error) => {
                warn!(target: DISPATCH_TARGET, action, %error, "action failed");
                Response::from_error(&error)
            }
        }
    }

    /// Builds the error response for a request that never reached a handler.
    pub fn reject(&self, error: &SheetError) -> Response {
        warn!(target: DISPATCH_TARGET, %error, "rejected request");
        Response::from_error(error)
    }

    /// Borrows the engine.
    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }
}

//! Transport - Request/Response Channel to the Host
//!
//! The core never opens or manages the connection; it is handed a transport
//! by the host and only issues calls on it.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::domain::command::Request;
use crate::error::Result;

/// Future of one transport call
pub type CallFuture = LocalBoxFuture<'static, Result<Value>>;

/// Shared handle to the host's live session
pub type SharedTransport = Rc<dyn Transport>;

/// Asynchronous request/response channel.
///
/// Every call yields one future resolving to the raw JSON response, or to
/// [`Error::Transport`](crate::error::Error::Transport) when the host rejects it.
pub trait Transport {
    fn call(&self, request: Request) -> CallFuture;
}

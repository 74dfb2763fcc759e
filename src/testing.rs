//! Test support: a transport whose responses are released by hand.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::app::headless::HeadlessHost;
use crate::domain::command::Request;
use crate::error::{Error, Result};
use crate::services::{CallFuture, SharedTransport, Transport};

struct PendingCall {
    request: Request,
    responder: oneshot::Sender<Result<Value>>,
}

/// Records every call and holds it open until the test resolves or rejects it
#[derive(Default)]
pub struct ScriptedTransport {
    pending: RefCell<Vec<PendingCall>>,
    calls: Cell<usize>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Total calls issued so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Requests still waiting for a response, oldest first
    pub fn pending(&self) -> Vec<Request> {
        self.pending.borrow().iter().map(|p| p.request.clone()).collect()
    }

    pub fn resolve(&self, index: usize, value: Value) {
        self.respond(index, Ok(value));
    }

    pub fn reject(&self, index: usize, message: &str) {
        self.respond(index, Err(Error::transport(message)));
    }

    fn respond(&self, index: usize, response: Result<Value>) {
        let call = self.pending.borrow_mut().remove(index);
        let _ = call.responder.send(response);
    }
}

impl Transport for ScriptedTransport {
    fn call(&self, request: Request) -> CallFuture {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push(PendingCall {
            request,
            responder: tx,
        });
        self.calls.set(self.calls.get() + 1);

        async move {
            rx.await
                .unwrap_or_else(|_| Err(Error::transport("call dropped")))
        }
        .boxed_local()
    }
}

/// Host with a live scripted session
pub fn connected_host(transport: &Rc<ScriptedTransport>) -> Rc<HeadlessHost> {
    let session: SharedTransport = transport.clone();
    Rc::new(HeadlessHost::new(Some(session)))
}

/// Let spawned tasks run until they block again
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

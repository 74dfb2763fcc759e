//! Host - View Lifecycle and Controller Registry
//!
//! A view ("host") owns zero or more controllers and notifies them of three
//! lifecycle events:
//!
//! ```text
//! attach ──► host_updated ──► host_updated ──► ... ──► detach
//!   │             │                                      │
//!   │             └── controllers may start fetches      └── drop per-session state
//!   └── optional setup
//! ```
//!
//! Controllers call back into the host only to read the current session and
//! to request a re-render once their state changed.

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::i18n::Locale;
use crate::services::{SharedTransport, spawn_local_named};

/// The view side of the lifecycle contract
pub trait Host {
    /// Live session, absent while disconnected
    fn session(&self) -> Option<SharedTransport>;

    /// Ask for a re-render; the next pass calls `on_host_update` again
    fn request_update(&self);

    /// Run a background task for this host
    fn spawn(&self, name: &'static str, task: LocalBoxFuture<'static, ()>) {
        spawn_local_named(name, task);
    }

    fn locale(&self) -> Locale {
        Locale::default()
    }

    fn dark_mode(&self) -> bool {
        false
    }
}

/// A unit of reusable behavior attached to a host
pub trait HostController {
    fn on_attach(&self) {}

    fn on_detach(&self) {}

    fn on_host_update(&self) {}
}

/// Controllers registered on one host, notified in registration order
#[derive(Default)]
pub struct ControllerSet {
    controllers: Vec<Rc<dyn HostController>>,
}

impl ControllerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, controller: Rc<dyn HostController>) {
        self.controllers.push(controller);
    }

    /// Remove a controller by identity. Returns false if it was not registered.
    pub fn remove(&mut self, controller: &Rc<dyn HostController>) -> bool {
        let before = self.controllers.len();
        self.controllers
            .retain(|c| !std::ptr::addr_eq(Rc::as_ptr(c), Rc::as_ptr(controller)));
        self.controllers.len() != before
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn attach(&self) {
        for controller in &self.controllers {
            controller.on_attach();
        }
    }

    pub fn detach(&self) {
        for controller in &self.controllers {
            controller.on_detach();
        }
    }

    pub fn host_updated(&self) {
        for controller in &self.controllers {
            controller.on_host_update();
        }
    }
}

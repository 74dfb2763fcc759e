//! Headless Host
//!
//! A [`Host`] without a UI toolkit. Tracks in-flight tasks and pending update
//! requests so a driver can re-render until nothing is outstanding.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tokio::sync::Notify;

use crate::app::host::Host;
use crate::i18n::Locale;
use crate::services::{SharedTransport, spawn_local_named};

pub struct HeadlessHost {
    session: RefCell<Option<SharedTransport>>,
    locale: Cell<Locale>,
    dark_mode: Cell<bool>,
    update_requested: Rc<Cell<bool>>,
    in_flight: Rc<Cell<usize>>,
    changed: Rc<Notify>,
}

impl HeadlessHost {
    pub fn new(session: Option<SharedTransport>) -> Self {
        Self {
            session: RefCell::new(session),
            locale: Cell::new(Locale::default()),
            dark_mode: Cell::new(false),
            update_requested: Rc::new(Cell::new(false)),
            in_flight: Rc::new(Cell::new(0)),
            changed: Rc::new(Notify::new()),
        }
    }

    pub fn with_locale(self, locale: Locale) -> Self {
        self.locale.set(locale);
        self
    }

    pub fn with_dark_mode(self, dark_mode: bool) -> Self {
        self.dark_mode.set(dark_mode);
        self
    }

    /// Replace the session (None simulates a disconnect)
    pub fn set_session(&self, session: Option<SharedTransport>) {
        *self.session.borrow_mut() = session;
    }

    pub fn set_locale(&self, locale: Locale) {
        self.locale.set(locale);
    }

    pub fn set_dark_mode(&self, dark_mode: bool) {
        self.dark_mode.set(dark_mode);
    }

    /// Consume a pending update request
    pub fn take_update_request(&self) -> bool {
        self.update_requested.replace(false)
    }

    /// Number of spawned tasks not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Wait until a task finishes or an update is requested
    pub async fn changed(&self) {
        self.changed.notified().await;
    }
}

impl Host for HeadlessHost {
    fn session(&self) -> Option<SharedTransport> {
        self.session.borrow().clone()
    }

    fn request_update(&self) {
        self.update_requested.set(true);
        self.changed.notify_one();
    }

    fn spawn(&self, name: &'static str, task: LocalBoxFuture<'static, ()>) {
        let in_flight = self.in_flight.clone();
        let changed = self.changed.clone();

        in_flight.set(in_flight.get() + 1);
        spawn_local_named(name, async move {
            task.await;
            in_flight.set(in_flight.get().saturating_sub(1));
            changed.notify_one();
        });
    }

    fn locale(&self) -> Locale {
        self.locale.get()
    }

    fn dark_mode(&self) -> bool {
        self.dark_mode.get()
    }
}

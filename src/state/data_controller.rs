//! DataController - Fetch Once per Session
//!
//! Loads one resource the first time its host is updated with a live session
//! and exposes a `loading` / `data` / `error` view of it. Detaching resets the
//! fetched flag so the next attach loads fresh data.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::app::host::{Host, HostController};
use crate::error::Result;
use crate::services::SharedTransport;

type Fetcher<T> = Rc<dyn Fn(SharedTransport) -> LocalBoxFuture<'static, Result<T>>>;

/// Snapshot of a controller's state for rendering
#[derive(Debug)]
pub struct DataView<T> {
    pub data: Option<Rc<T>>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct DataState<T> {
    data: Option<Rc<T>>,
    loading: bool,
    error: Option<String>,
    fetched: bool,
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            fetched: false,
        }
    }
}

pub struct DataController<T> {
    host: Rc<dyn Host>,
    fetcher: Fetcher<T>,
    state: Rc<RefCell<DataState<T>>>,
}

impl<T: 'static> DataController<T> {
    pub fn new<F, Fut>(host: Rc<dyn Host>, fetcher: F) -> Self
    where
        F: Fn(SharedTransport) -> Fut + 'static,
        Fut: Future<Output = Result<T>> + 'static,
    {
        Self {
            host,
            fetcher: Rc::new(move |session| fetcher(session).boxed_local()),
            state: Rc::new(RefCell::new(DataState::default())),
        }
    }

    pub fn data(&self) -> Option<Rc<T>> {
        self.state.borrow().data.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn view(&self) -> DataView<T> {
        let state = self.state.borrow();
        DataView {
            data: state.data.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Fetch again now. Without a session this does nothing.
    pub async fn refresh(&self) {
        if let Some(session) = self.host.session() {
            self.fetch(session).await;
        }
    }

    /// Mark the fetch as issued and build the request. The returned future
    /// applies the outcome when it resolves; the last response to resolve wins.
    fn fetch(&self, session: SharedTransport) -> LocalBoxFuture<'static, ()> {
        {
            let mut state = self.state.borrow_mut();
            state.fetched = true;
            state.loading = true;
        }

        let request = (self.fetcher)(session);
        let state = self.state.clone();
        let host = self.host.clone();

        async move {
            let result = request.await;
            {
                let mut state = state.borrow_mut();
                match result {
                    Ok(data) => {
                        state.data = Some(Rc::new(data));
                        state.error = None;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Data fetch failed");
                        state.error = Some(err.to_string());
                    }
                }
                state.loading = false;
            }
            host.request_update();
        }
        .boxed_local()
    }
}

impl<T: 'static> HostController for DataController<T> {
    fn on_host_update(&self) {
        if self.state.borrow().fetched {
            return;
        }
        let Some(session) = self.host.session() else {
            return;
        };

        let task = self.fetch(session);
        self.host.spawn("data-controller-fetch", task);
    }

    fn on_detach(&self) {
        self.state.borrow_mut().fetched = false;
    }
}

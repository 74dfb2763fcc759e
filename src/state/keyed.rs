//! KeyedController - Refetch When the Key Changes
//!
//! Like [`DataController`](super::DataController), but scoped to a key (a
//! meter serial, a charger id). Whenever the host updates with a key that
//! differs from the last one fetched, a new request is issued and any older
//! request still in flight is discarded on arrival.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::app::host::{Host, HostController};
use crate::error::Result;
use crate::services::{RaceGuard, SharedTransport, Stale};

use super::DataView;

type KeyedFetcher<K, T> = Rc<dyn Fn(SharedTransport, K) -> LocalBoxFuture<'static, Result<T>>>;

struct KeyedState<K, T> {
    key: Option<K>,
    fetched_key: Option<K>,
    data: Option<Rc<T>>,
    loading: bool,
    error: Option<String>,
}

pub struct KeyedController<K, T> {
    host: Rc<dyn Host>,
    fetcher: KeyedFetcher<K, T>,
    guard: RaceGuard,
    state: Rc<RefCell<KeyedState<K, T>>>,
}

impl<K, T> KeyedController<K, T>
where
    K: Clone + PartialEq + std::fmt::Display + 'static,
    T: 'static,
{
    pub fn new<F, Fut>(host: Rc<dyn Host>, fetcher: F) -> Self
    where
        F: Fn(SharedTransport, K) -> Fut + 'static,
        Fut: Future<Output = Result<T>> + 'static,
    {
        Self {
            host,
            fetcher: Rc::new(move |session, key| fetcher(session, key).boxed_local()),
            guard: RaceGuard::new(),
            state: Rc::new(RefCell::new(KeyedState {
                key: None,
                fetched_key: None,
                data: None,
                loading: true,
                error: None,
            })),
        }
    }

    /// Point the controller at a key. A different key drops the data of the
    /// previous one and supersedes its in-flight fetch; the new fetch happens
    /// on the next host update.
    pub fn set_key(&self, key: Option<K>) {
        let rekeyed = {
            let mut state = self.state.borrow_mut();
            let rekeyed = state.key != key;
            if rekeyed {
                state.data = None;
                state.error = None;
                state.loading = key.is_some();
                state.fetched_key = None;
                state.key = key;
            }
            rekeyed
        };
        if rekeyed {
            self.guard.invalidate();
        }
    }

    pub fn key(&self) -> Option<K> {
        self.state.borrow().key.clone()
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

    fn sync(&self) {
        let key = {
            let state = self.state.borrow();
            match &state.key {
                Some(key) if state.fetched_key.as_ref() != Some(key) => key.clone(),
                _ => return,
            }
        };
        let Some(session) = self.host.session() else {
            return;
        };

        {
            let mut state = self.state.borrow_mut();
            state.fetched_key = Some(key.clone());
            state.loading = true;
        }
        tracing::debug!(%key, "Fetching keyed resource");

        let fetcher = self.fetcher.clone();
        let fetch_key = key.clone();
        let request = self.guard.run(move || fetcher(session, fetch_key));
        let state = self.state.clone();
        let host = self.host.clone();

        self.host.spawn(
            "keyed-controller-fetch",
            async move {
                let result = match request.await {
                    Ok(result) => result,
                    Err(Stale) => {
                        tracing::debug!(%key, "Discarding superseded response");
                        return;
                    }
                };
                {
                    let mut state = state.borrow_mut();
                    match result {
                        Ok(data) => {
                            state.data = Some(Rc::new(data));
                            state.error = None;
                        }
                        Err(err) => {
                            tracing::warn!(%key, error = %err, "Keyed fetch failed");
                            state.data = None;
                            state.error = Some(err.to_string());
                        }
                    }
                    state.loading = false;
                }
                host.request_update();
            }
            .boxed_local(),
        );
    }
}

impl<K, T> HostController for KeyedController<K, T>
where
    K: Clone + PartialEq + std::fmt::Display + 'static,
    T: 'static,
{
    fn on_host_update(&self) {
        self.sync();
    }

    fn on_detach(&self) {
        self.state.borrow_mut().fetched_key = None;
        self.guard.invalidate();
    }
}

//! Race Guard - Stale Response Detection
//!
//! A monotonically increasing token per owner. Each request captures the
//! token current when it is issued; when the response arrives, a newer token
//! means the response was superseded and must not be applied.
//!
//! ```text
//! issue #1 ──────────────────────────────┐ resolves late → Stale
//!      issue #2 ───────────┐ resolves     │
//!                          ▼ Ok(#2)       ▼ dropped
//! ```
//!
//! Nothing is ever aborted; superseded results are simply ignored on arrival.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

/// Token captured when a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Marker for a response superseded by a newer request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stale;

/// Shared, cloneable token counter for one owner
#[derive(Debug, Clone, Default)]
pub struct RaceGuard {
    current: Rc<Cell<u64>>,
}

impl RaceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter and return the new current token
    pub fn issue(&self) -> RequestToken {
        let next = self.current.get() + 1;
        self.current.set(next);
        RequestToken(next)
    }

    /// Token of the most recently issued request
    pub fn current(&self) -> RequestToken {
        RequestToken(self.current.get())
    }

    /// Whether `token` still belongs to the latest request
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current.get() == token.0
    }

    /// Supersede every in-flight request without issuing a new one
    pub fn invalidate(&self) {
        self.issue();
    }

    /// Issue a request under a fresh token. The token is taken before
    /// `issue` runs, so the ordering of calls to `run` is the ordering that
    /// decides staleness.
    pub fn run<F, Fut>(&self, issue: F) -> LocalBoxFuture<'static, Result<Fut::Output, Stale>>
    where
        F: FnOnce() -> Fut,
        Fut: Future + 'static,
        Fut::Output: 'static,
    {
        let token = self.issue();
        let request = issue();
        let guard = self.clone();

        async move {
            let output = request.await;
            if guard.is_current(token) {
                Ok(output)
            } else {
                Err(Stale)
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn tokens_increase_monotonically() {
        let guard = RaceGuard::new();
        let a = guard.issue();
        let b = guard.issue();
        assert!(b > a);
        assert!(guard.is_current(b));
        assert!(!guard.is_current(a));
        assert_eq!(guard.current(), b);
    }

    #[test]
    fn clones_share_the_counter() {
        let guard = RaceGuard::new();
        let token = guard.issue();
        guard.clone().invalidate();
        assert!(!guard.is_current(token));
    }

    #[tokio::test]
    async fn later_request_wins_regardless_of_resolution_order() {
        let guard = RaceGuard::new();
        let (tx1, rx1) = oneshot::channel::<u32>();
        let (tx2, rx2) = oneshot::channel::<u32>();

        let first = guard.run(|| rx1);
        let second = guard.run(|| rx2);

        tx2.send(2).expect("send");
        assert_eq!(second.await, Ok(Ok(2)));

        tx1.send(1).expect("send");
        assert_eq!(first.await, Err(Stale));
    }

    #[tokio::test]
    async fn invalidate_supersedes_in_flight_request() {
        let guard = RaceGuard::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let pending = guard.run(|| rx);
        guard.invalidate();
        tx.send(7).expect("send");

        assert_eq!(pending.await, Err(Stale));
    }
}

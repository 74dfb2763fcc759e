//! Local Runtime
//!
//! Every controller shares state through `Rc<RefCell<..>>`, so all request
//! futures run on one thread inside a tokio `LocalSet`.
//!
//! ## Pattern
//!
//! ```text
//! controller.on_host_update()
//!       │
//!       ▼
//! spawn_local_named("fetch", async { ... })
//!       │
//!       ▼
//! LocalSet polls the task on the same thread
//!       │
//!       ▼
//! state updated, host.request_update()
//! ```

use std::future::Future;

use tokio::task::LocalSet;

use crate::error::Result;

/// Spawn a detached task on the current `LocalSet` with a name (for debugging)
///
/// Must be called from within a `LocalSet` context.
pub fn spawn_local_named<F>(name: &'static str, future: F)
where
    F: Future<Output = ()> + 'static,
{
    tracing::debug!("Spawning local task: {}", name);
    tokio::task::spawn_local(async move {
        future.await;
        tracing::debug!("Local task completed: {}", name);
    });
}

/// Run a future to completion on a fresh current-thread runtime wrapped in a
/// `LocalSet`.
///
/// Used by the binary entry point; everything it spawns through
/// [`spawn_local_named`] is driven by the same set.
pub fn block_on_local<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = LocalSet::new();

    Ok(local.block_on(&runtime, future))
}

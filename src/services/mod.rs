//! Service Layer
//!
//! Everything between the views and the host's request/response channel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         api                                  │
//! │   typed calls: version, summary, history, schedule, backfill │
//! └─────────────────────────────────────────────────────────────┘
//!                            │ Request / serde_json::Value
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 dyn Transport (host session)                 │
//! │        FixtureTransport │ host-provided implementation       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
mod fixture;
mod race_guard;
mod runtime;
mod transport;

pub use fixture::*;
pub use race_guard::*;
pub use runtime::*;
pub use transport::*;

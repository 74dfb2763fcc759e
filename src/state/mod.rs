//! State - Lifecycle-Bound Controllers
//!
//! Each controller owns one piece of remote state, fetches it when its host
//! is updated with a live session, and asks the host to re-render when the
//! state changes.
//!
//! | Controller          | Fetches                        | Stale responses |
//! |---------------------|--------------------------------|-----------------|
//! | `DataController`    | once per session               | last one wins   |
//! | `KeyedController`   | whenever the key changes       | discarded       |
//! | `WindowedAnalytics` | on serial or lookback change   | discarded       |

pub mod analytics;
mod data_controller;
mod keyed;

pub use data_controller::*;
pub use keyed::*;

//! EON Next Dashboard Core
//!
//! Lifecycle-bound data controllers, windowed cost analytics and chart
//! adapters for an energy-usage dashboard. The host (a UI shell or the
//! headless runner) provides a session over which typed commands are sent.

pub mod app;
pub mod components;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod helpers;
pub mod i18n;
pub mod services;
pub mod state;
pub mod theme;
pub mod utils;

#[cfg(test)]
mod testing;

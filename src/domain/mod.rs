//! Domain - Pure Data Structures and Protocol Types
//!
//! These types don't depend on the host or the chart library and represent
//! the energy-usage domain.

pub mod backfill;
pub mod command;
pub mod config;
pub mod cost;
pub mod history;
pub mod meter;
pub mod period;
pub mod schedule;

//! Consumption Feature - Meter Readings, Costs and the 7-Day Chart

mod page;

pub use page::*;

//! Features - Vertical Feature Slices
//!
//! Each feature owns its page and the controllers that feed it.

pub mod backfill;
pub mod breakdown;
pub mod consumption;
pub mod dashboard;
pub mod schedule;

//! Backfill Feature - Historical Import Progress

mod page;

pub use page::*;

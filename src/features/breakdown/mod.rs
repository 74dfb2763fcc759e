//! Breakdown Feature - Period Cost Split

mod page;

pub use page::*;

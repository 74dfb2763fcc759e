//! Dashboard Feature - Panel Composition and Version Check

mod page;
mod version;

pub use page::*;
pub use version::*;

//! Schedule Feature - EV Charging Slots

mod page;

pub use page::*;

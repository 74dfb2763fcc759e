//! Components - Reusable Widgets
//!
//! Widgets that render from props and never talk to the host themselves.

pub mod charts;
pub mod range_picker;

//! Charts - Declarative Chart Adapter and Backends

pub mod adapter;
pub mod bar;
pub mod dataset;
pub mod doughnut;
pub mod headless;
pub mod library;
pub mod shape;
pub mod sparkline;

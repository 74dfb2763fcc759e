//! Theme - Chart Palette

pub mod colors;

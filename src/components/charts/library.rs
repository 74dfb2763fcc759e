//! Chart Library Seam
//!
//! The adapter drives any backend through these two traits: one to create
//! instances on a canvas, one to patch or tear them down.

use serde_json::Value;

/// Drawing surface a chart is mounted on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub id: String,
}

impl Canvas {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Animation behaviour of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Animated,
    /// Apply immediately without animation
    Immediate,
}

pub trait ChartLibrary {
    type Instance: ChartInstance;

    /// Build an instance from a full configuration (`type`, `data`, `options`)
    fn create(&self, canvas: &Canvas, config: Value) -> Self::Instance;
}

pub trait ChartInstance {
    /// Replace the category labels and datasets
    fn set_data(&mut self, labels: Value, datasets: Value);

    /// Deep-merge `patch` into the instance options
    fn merge_options(&mut self, patch: Value);

    fn update(&mut self, mode: UpdateMode);

    fn destroy(&mut self);
}

//! Bar Chart - Configuration and In-Place Patches

use serde_json::{Value, json};

use crate::constants::SECONDARY_AXIS_ID;
use crate::theme::colors::ChartPalette;

use super::adapter::ChartSpec;
use super::dataset::ChartData;
use super::shape::ConfigShape;

/// Props of a category bar chart with an optional secondary axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarChartProps {
    pub data: ChartData,
    pub y_label: String,
    /// Title of the secondary axis; non-empty enables the axis
    pub y2_label: String,
    pub dark_mode: bool,
}

impl BarChartProps {
    pub fn new(data: ChartData) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn y2_label(mut self, label: impl Into<String>) -> Self {
        self.y2_label = label.into();
        self
    }

    pub fn dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    fn has_secondary_axis(&self) -> bool {
        !self.y2_label.is_empty() || self.data.series.iter().any(|s| s.secondary_axis)
    }

    fn scales(&self, palette: &ChartPalette) -> Value {
        let mut scales = json!({
            "x": {
                "ticks": { "color": palette.text },
                "grid": { "display": false }
            },
            "y": {
                "beginAtZero": true,
                "position": "left",
                "title": {
                    "display": !self.y_label.is_empty(),
                    "text": self.y_label,
                    "color": palette.text
                },
                "ticks": { "color": palette.text },
                "grid": { "color": palette.grid }
            }
        });

        if self.has_secondary_axis() {
            scales[SECONDARY_AXIS_ID] = json!({
                "beginAtZero": true,
                "position": "right",
                "title": {
                    "display": !self.y2_label.is_empty(),
                    "text": self.y2_label,
                    "color": palette.text
                },
                "ticks": { "color": palette.text },
                "grid": { "drawOnChartArea": false }
            });
        }

        scales
    }
}

impl ChartSpec for BarChartProps {
    fn shape(&self) -> ConfigShape {
        ConfigShape::new(self.data.series.len(), self.has_secondary_axis())
    }

    fn config(&self) -> Value {
        let palette = ChartPalette::for_mode(self.dark_mode);
        json!({
            "type": "bar",
            "data": {
                "labels": self.labels(),
                "datasets": self.datasets()
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "interaction": { "mode": "index", "intersect": false },
                "plugins": {
                    "legend": {
                        "display": self.data.series.len() > 1,
                        "labels": { "color": palette.text }
                    }
                },
                "scales": self.scales(&palette)
            }
        })
    }

    fn labels(&self) -> Value {
        self.data.labels_json()
    }

    fn datasets(&self) -> Value {
        self.data.datasets_json()
    }

    fn options_patch(&self) -> Value {
        let palette = ChartPalette::for_mode(self.dark_mode);
        json!({
            "plugins": { "legend": { "labels": { "color": palette.text } } },
            "scales": self.scales(&palette)
        })
    }
}

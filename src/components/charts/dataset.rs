//! Chart Dataset - Labels and Series

use serde_json::{Value, json};

use crate::constants::SECONDARY_AXIS_ID;

/// One data series of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
    /// Plot against the secondary (right-hand) axis
    pub secondary_axis: bool,
    pub border_radius: Option<u32>,
}

impl Series {
    pub fn new(label: impl Into<String>, data: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data,
            color: color.into(),
            secondary_axis: false,
            border_radius: None,
        }
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.secondary_axis = true;
        self
    }

    pub fn border_radius(mut self, radius: u32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut dataset = json!({
            "label": self.label,
            "data": self.data,
            "backgroundColor": self.color,
            "borderColor": self.color,
        });
        if self.secondary_axis {
            dataset["yAxisID"] = json!(SECONDARY_AXIS_ID);
        }
        if let Some(radius) = self.border_radius {
            dataset["borderRadius"] = json!(radius);
        }
        dataset
    }
}

/// Category labels plus the series plotted over them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            series: Vec::new(),
        }
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn labels_json(&self) -> Value {
        json!(self.labels)
    }

    pub fn datasets_json(&self) -> Value {
        Value::Array(self.series.iter().map(Series::to_json).collect())
    }
}

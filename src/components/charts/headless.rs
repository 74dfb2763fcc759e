//! Headless Charts - In-Memory Chart Backend
//!
//! Keeps each instance's configuration as JSON and renders it as text bars.
//! Counts every create, update and destroy so callers can observe the
//! adapter's lifecycle.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;

use super::library::{Canvas, ChartInstance, ChartLibrary, UpdateMode};

const BAR_WIDTH: usize = 24;

#[derive(Debug, Default)]
struct ChartLog {
    created: Cell<usize>,
    updated: Cell<usize>,
    destroyed: Cell<usize>,
}

/// Cloneable handle; clones share one log
#[derive(Debug, Clone, Default)]
pub struct HeadlessCharts {
    log: Rc<ChartLog>,
}

impl HeadlessCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.log.created.get()
    }

    pub fn updated(&self) -> usize {
        self.log.updated.get()
    }

    pub fn destroyed(&self) -> usize {
        self.log.destroyed.get()
    }

    /// Instances currently alive
    pub fn live(&self) -> usize {
        self.created().saturating_sub(self.destroyed())
    }
}

impl ChartLibrary for HeadlessCharts {
    type Instance = HeadlessChart;

    fn create(&self, canvas: &Canvas, config: Value) -> HeadlessChart {
        self.log.created.set(self.log.created.get() + 1);
        tracing::debug!(canvas = %canvas.id, "Chart created");
        HeadlessChart {
            canvas: canvas.clone(),
            config,
            log: self.log.clone(),
            destroyed: false,
        }
    }
}

#[derive(Debug)]
pub struct HeadlessChart {
    canvas: Canvas,
    config: Value,
    log: Rc<ChartLog>,
    destroyed: bool,
}

impl HeadlessChart {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    /// One line per category with a proportional bar per dataset
    pub fn render_text(&self) -> Vec<String> {
        let labels: Vec<&str> = self.config["data"]["labels"]
            .as_array()
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let datasets = self.config["data"]["datasets"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let values: Vec<Vec<f64>> = datasets
            .iter()
            .map(|d| {
                d["data"]
                    .as_array()
                    .map(|a| a.iter().filter_map(Value::as_f64).collect())
                    .unwrap_or_default()
            })
            .collect();
        let max = values
            .iter()
            .flatten()
            .copied()
            .fold(0.0_f64, f64::max);
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut lines = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            for series in &values {
                let Some(value) = series.get(i) else {
                    continue;
                };
                let len = if max > 0.0 {
                    ((value / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                lines.push(format!(
                    "{label:<width$}  {:<BAR_WIDTH$}  {value:.2}",
                    "█".repeat(len)
                ));
            }
        }
        lines
    }
}

impl ChartInstance for HeadlessChart {
    fn set_data(&mut self, labels: Value, datasets: Value) {
        self.config["data"]["labels"] = labels;
        self.config["data"]["datasets"] = datasets;
    }

    fn merge_options(&mut self, patch: Value) {
        merge(&mut self.config["options"], patch);
    }

    fn update(&mut self, mode: UpdateMode) {
        self.log.updated.set(self.log.updated.get() + 1);
        tracing::trace!(canvas = %self.canvas.id, ?mode, "Chart updated");
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.log.destroyed.set(self.log.destroyed.get() + 1);
        tracing::debug!(canvas = %self.canvas.id, "Chart destroyed");
    }
}

/// Recursive object merge; non-object values replace
fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(target.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_keeps_untouched_keys() {
        let mut target = json!({ "a": { "b": 1, "c": 2 }, "d": 3 });
        merge(&mut target, json!({ "a": { "b": 10 }, "e": 5 }));
        assert_eq!(target, json!({ "a": { "b": 10, "c": 2 }, "d": 3, "e": 5 }));
    }

    #[test]
    fn destroy_is_counted_once() {
        let charts = HeadlessCharts::new();
        let mut chart = charts.create(&Canvas::new("c"), json!({}));
        chart.destroy();
        chart.destroy();
        assert_eq!(charts.destroyed(), 1);
        assert_eq!(charts.live(), 0);
    }

    #[test]
    fn renders_proportional_bars() {
        let charts = HeadlessCharts::new();
        let chart = charts.create(
            &Canvas::new("c"),
            json!({
                "data": {
                    "labels": ["Mon", "Tue"],
                    "datasets": [{ "data": [2.0, 4.0] }]
                }
            }),
        );
        let lines = chart.render_text();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Mon  ████████████ "));
        assert!(lines[1].ends_with("4.00"));
    }
}

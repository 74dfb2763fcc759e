//! Doughnut Chart - Cost Breakdown Segments

use serde_json::{Value, json};

use crate::theme::colors::ChartPalette;

use super::adapter::ChartSpec;
use super::shape::ConfigShape;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoughnutProps {
    pub segments: Vec<PieSegment>,
    pub dark_mode: bool,
}

impl DoughnutProps {
    pub fn new(segments: Vec<PieSegment>) -> Self {
        Self {
            segments,
            dark_mode: false,
        }
    }

    pub fn dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    /// Tooltip text of one segment, e.g. "Usage charges: £16.40 (79.3%)"
    pub fn tooltip(&self, index: usize, currency_symbol: &str) -> Option<String> {
        let segment = self.segments.get(index)?;
        let total: f64 = self.segments.iter().map(|s| s.value).sum();
        let pct = if total > 0.0 {
            segment.value / total * 100.0
        } else {
            0.0
        };
        Some(format!(
            "{}: {currency_symbol}{:.2} ({pct:.1}%)",
            segment.label, segment.value
        ))
    }

    fn tooltip_options(palette: &ChartPalette) -> Value {
        json!({
            "backgroundColor": palette.tooltip_bg,
            "titleColor": palette.tooltip_title,
            "bodyColor": palette.tooltip_body,
            "borderColor": palette.tooltip_border,
            "borderWidth": 1
        })
    }
}

impl ChartSpec for DoughnutProps {
    fn shape(&self) -> ConfigShape {
        ConfigShape::new(1, false)
    }

    fn config(&self) -> Value {
        let palette = ChartPalette::for_mode(self.dark_mode);
        json!({
            "type": "doughnut",
            "data": {
                "labels": self.labels(),
                "datasets": self.datasets()
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "cutout": "60%",
                "plugins": {
                    "legend": { "display": false },
                    "tooltip": Self::tooltip_options(&palette)
                }
            }
        })
    }

    fn labels(&self) -> Value {
        json!(self.segments.iter().map(|s| s.label.as_str()).collect::<Vec<_>>())
    }

    fn datasets(&self) -> Value {
        json!([{
            "data": self.segments.iter().map(|s| s.value).collect::<Vec<_>>(),
            "backgroundColor": self.segments.iter().map(|s| s.color.as_str()).collect::<Vec<_>>(),
            "borderWidth": 0
        }])
    }

    fn options_patch(&self) -> Value {
        let palette = ChartPalette::for_mode(self.dark_mode);
        json!({ "plugins": { "tooltip": Self::tooltip_options(&palette) } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> DoughnutProps {
        DoughnutProps::new(vec![
            PieSegment {
                label: "Usage charges".into(),
                value: 16.4,
                color: "rgba(3, 169, 244, 0.85)".into(),
            },
            PieSegment {
                label: "Standing charge".into(),
                value: 4.27,
                color: "rgba(156, 39, 176, 0.75)".into(),
            },
        ])
    }

    #[test]
    fn tooltip_shows_value_and_share() {
        assert_eq!(
            props().tooltip(0, "£").as_deref(),
            Some("Usage charges: £16.40 (79.3%)")
        );
        assert_eq!(props().tooltip(5, "£"), None);
    }

    #[test]
    fn dark_mode_tooltip_colours() {
        let patch = props().dark_mode(true).options_patch();
        assert_eq!(patch["plugins"]["tooltip"]["backgroundColor"], "#424242");
    }

    #[test]
    fn shape_never_changes() {
        assert_eq!(props().shape(), DoughnutProps::default().shape());
    }
}

//! Sparkline - Inline SVG Trend Line
//!
//! Values are normalised to the min/max of the series and laid out on a fixed
//! viewBox. A flat series lies along the bottom edge.

use crate::constants::{SPARKLINE_HEIGHT, SPARKLINE_PADDING, SPARKLINE_WIDTH};
use crate::theme::colors::ChartColors;

/// Markup rendered when there are too few points to draw a line
pub const EMPTY_SPARKLINE: &str = r#"<div class="sparkline-container"></div>"#;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Computed sparkline paths
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineGeometry {
    pub points: Vec<(f64, f64)>,
    /// `points` attribute of the line
    pub polyline: String,
    /// Closed path filling the area under the line
    pub fill_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    values: Vec<f64>,
    color: String,
}

impl Sparkline {
    /// Non-finite values are skipped
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().filter(|v| v.is_finite()).collect(),
            color: ChartColors::SPARKLINE.to_string(),
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// None for fewer than two values
    pub fn geometry(&self) -> Option<SparklineGeometry> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }

        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };

        let inner_w = SPARKLINE_WIDTH - 2.0 * SPARKLINE_PADDING;
        let inner_h = SPARKLINE_HEIGHT - 2.0 * SPARKLINE_PADDING;
        let last = (n - 1) as f64;

        let points: Vec<(f64, f64)> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let x = SPARKLINE_PADDING + (i as f64 / last) * inner_w;
                let y = SPARKLINE_PADDING + (1.0 - (v - min) / range) * inner_h;
                (x, y)
            })
            .collect();

        let joined: Vec<String> = points.iter().map(|(x, y)| format!("{x},{y}")).collect();
        let polyline = joined.join(" ");

        let (first_x, _) = points[0];
        let (last_x, _) = points[n - 1];
        let fill_path = format!(
            "M{first_x},{SPARKLINE_HEIGHT} L{} L{last_x},{SPARKLINE_HEIGHT} Z",
            joined.join(" L")
        );

        Some(SparklineGeometry {
            points,
            polyline,
            fill_path,
        })
    }

    /// One block character per value, e.g. "▁▅█"; empty for fewer than two values
    pub fn render_text(&self) -> String {
        let Some(geometry) = self.geometry() else {
            return String::new();
        };
        let inner_h = SPARKLINE_HEIGHT - 2.0 * SPARKLINE_PADDING;
        let top = (BLOCKS.len() - 1) as f64;

        geometry
            .points
            .iter()
            .map(|(_, y)| {
                let level = ((SPARKLINE_HEIGHT - SPARKLINE_PADDING - y) / inner_h * top).round();
                BLOCKS[level.clamp(0.0, top) as usize]
            })
            .collect()
    }

    /// SVG markup, or [`EMPTY_SPARKLINE`] for fewer than two values
    pub fn render(&self) -> String {
        let Some(geometry) = self.geometry() else {
            return EMPTY_SPARKLINE.to_string();
        };

        format!(
            concat!(
                r#"<div class="sparkline-container">"#,
                r#"<svg viewBox="0 0 {w} {h}" preserveAspectRatio="none">"#,
                r#"<path d="{fill}" fill="{color}" fill-opacity="0.15" stroke="none"/>"#,
                r#"<polyline points="{line}" fill="none" stroke="{color}" stroke-width="1.5" stroke-linejoin="round" stroke-linecap="round"/>"#,
                r#"</svg></div>"#
            ),
            w = SPARKLINE_WIDTH,
            h = SPARKLINE_HEIGHT,
            fill = geometry.fill_path,
            line = geometry.polyline,
            color = self.color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_two_points_render_empty_container() {
        assert_eq!(Sparkline::new([]).render(), EMPTY_SPARKLINE);
        assert_eq!(Sparkline::new([4.2]).render(), EMPTY_SPARKLINE);
        assert_eq!(Sparkline::new([4.2, f64::NAN]).render(), EMPTY_SPARKLINE);
    }

    #[test]
    fn extremes_touch_the_padding() {
        let geometry = Sparkline::new([0.0, 10.0]).geometry().expect("geometry");
        assert_eq!(geometry.points, vec![(2.0, 28.0), (98.0, 2.0)]);
        assert_eq!(geometry.polyline, "2,28 98,2");
        assert_eq!(geometry.fill_path, "M2,30 L2,28 L98,2 L98,30 Z");
    }

    #[test]
    fn flat_series_uses_unit_range() {
        let geometry = Sparkline::new([5.0, 5.0, 5.0]).geometry().expect("geometry");
        assert!(geometry.points.iter().all(|(_, y)| *y == 28.0));
        assert_eq!(geometry.points[1].0, 50.0);
    }

    #[test]
    fn text_rendering_spans_block_levels() {
        assert_eq!(Sparkline::new([0.0, 7.0, 3.5]).render_text(), "▁█▅");
        assert_eq!(Sparkline::new([1.0]).render_text(), "");
    }

    #[test]
    fn render_embeds_paths_and_colour() {
        let svg = Sparkline::new([1.0, 3.0, 2.0]).color("#03a9f4").render();
        assert!(svg.starts_with(r#"<div class="sparkline-container"><svg viewBox="0 0 100 30""#));
        assert!(svg.contains(r##"stroke="#03a9f4""##));
        assert!(svg.contains(r#"points="2,28 50,2 98,15""#));
    }
}

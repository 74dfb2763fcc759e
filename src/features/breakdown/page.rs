//! Cost Breakdown Page
//!
//! Usage versus standing charges for the selected aggregation window.

use std::rc::Rc;

use crate::app::host::{Host, HostController};
use crate::components::charts::adapter::ChartAdapter;
use crate::components::charts::doughnut::{DoughnutProps, PieSegment};
use crate::components::charts::headless::HeadlessCharts;
use crate::components::charts::library::Canvas;
use crate::components::range_picker::RangePicker;
use crate::domain::cost::{DerivedTotals, SegmentKind};
use crate::domain::meter::MeterSummary;
use crate::i18n::{Locale, t};
use crate::state::analytics::{BreakdownView, TariffInputs, WindowedAnalytics};
use crate::utils::format::format_money;

pub struct BreakdownPage {
    analytics: Rc<WindowedAnalytics>,
    chart: ChartAdapter<HeadlessCharts, DoughnutProps>,
    currency: String,
}

impl BreakdownPage {
    pub fn new(host: Rc<dyn Host>, charts: HeadlessCharts, currency: impl Into<String>) -> Self {
        Self::with_analytics(WindowedAnalytics::new(host), charts, currency)
    }

    pub fn with_analytics(
        analytics: WindowedAnalytics,
        charts: HeadlessCharts,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            analytics: Rc::new(analytics),
            chart: ChartAdapter::new(charts),
            currency: currency.into(),
        }
    }

    pub fn controller(&self) -> Rc<dyn HostController> {
        self.analytics.clone()
    }

    pub fn analytics(&self) -> &WindowedAnalytics {
        &self.analytics
    }

    pub fn set_meter(&mut self, meter: &MeterSummary) {
        self.analytics.set_inputs(TariffInputs::from(meter));
    }

    /// Period picker changed
    pub fn select_period(&self, value: u32) {
        self.analytics.select_picker_value(value);
    }

    pub fn mount(&mut self, canvas: Canvas) {
        self.chart.first_render(canvas);
    }

    pub fn disconnect(&mut self) {
        self.chart.disconnect();
    }

    pub fn render(&mut self, locale: Locale, dark_mode: bool) -> Vec<String> {
        let breakdown = match self.analytics.breakdown() {
            BreakdownView::NoTariff => {
                self.chart.disconnect();
                return vec![t(locale, "breakdown-no-tariff")];
            }
            BreakdownView::Priced(breakdown) => breakdown,
        };
        let totals = &breakdown.totals;

        let mut lines = Vec::new();
        if totals.total_cost > 0.0 {
            let label = if breakdown.period_label.is_empty() {
                t(locale, "breakdown-total")
            } else {
                breakdown.period_label.clone()
            };
            lines.push(format!("{}  {label}", format_money(totals.total_cost, &self.currency)));
        }
        lines.push(
            RangePicker::periods(locale)
                .value(self.analytics.period().picker_value())
                .render(),
        );

        if totals.segments.is_empty() {
            self.chart.disconnect();
            if self.analytics.loading() {
                lines.push(t(locale, "summary-loading"));
            } else {
                lines.push(t(locale, "breakdown-no-data"));
            }
            return lines;
        }

        self.chart.set_props(doughnut_props(totals, locale, dark_mode));
        if let Some(chart) = self.chart.instance() {
            lines.extend(chart.render_text());
        }
        lines.extend(legend(totals, &self.currency, locale));
        lines
    }
}

fn doughnut_props(totals: &DerivedTotals, locale: Locale, dark_mode: bool) -> DoughnutProps {
    let segments = totals
        .segments
        .iter()
        .map(|s| PieSegment {
            label: t(locale, s.kind.label_key()),
            value: s.value,
            color: s.color.to_string(),
        })
        .collect();
    DoughnutProps::new(segments).dark_mode(dark_mode)
}

fn legend(totals: &DerivedTotals, currency: &str, locale: Locale) -> Vec<String> {
    totals
        .segments
        .iter()
        .map(|s| {
            let key = match s.kind {
                SegmentKind::Usage => "breakdown-usage",
                SegmentKind::Standing => "breakdown-standing",
            };
            format!(
                "{} {} ({:.1}%)",
                t(locale, key),
                format_money(s.value, currency),
                totals.share_percent(s.value)
            )
        })
        .collect()
}

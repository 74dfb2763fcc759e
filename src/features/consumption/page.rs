//! Consumption Page
//!
//! One meter's card: latest reading, cost figures, a trend line and a bar
//! chart of the last week's daily consumption.

use std::rc::Rc;

use crate::app::host::{Host, HostController};
use crate::components::charts::adapter::ChartAdapter;
use crate::components::charts::bar::BarChartProps;
use crate::components::charts::dataset::{ChartData, Series};
use crate::components::charts::headless::HeadlessCharts;
use crate::components::charts::library::Canvas;
use crate::components::charts::sparkline::Sparkline;
use crate::constants::{BAR_BORDER_RADIUS, CONSUMPTION_CHART_DAYS};
use crate::domain::history::ConsumptionHistory;
use crate::domain::meter::{EntityRef, MeterKind, MeterSummary};
use crate::i18n::{Locale, t};
use crate::services::{SharedTransport, api};
use crate::state::KeyedController;
use crate::theme::colors::ChartColors;
use crate::utils::format::{format_money, format_weekday_short};

pub struct ConsumptionPage {
    meter: Option<MeterSummary>,
    history: Rc<KeyedController<EntityRef, ConsumptionHistory>>,
    chart: ChartAdapter<HeadlessCharts, BarChartProps>,
    currency: String,
}

impl ConsumptionPage {
    pub fn new(host: Rc<dyn Host>, charts: HeadlessCharts, currency: impl Into<String>) -> Self {
        let history = KeyedController::new(host, |session: SharedTransport, serial: EntityRef| {
            api::get_consumption_history(&*session, &serial, CONSUMPTION_CHART_DAYS)
        });
        Self {
            meter: None,
            history: Rc::new(history),
            chart: ChartAdapter::new(charts),
            currency: currency.into(),
        }
    }

    pub fn controller(&self) -> Rc<dyn HostController> {
        self.history.clone()
    }

    pub fn set_meter(&mut self, meter: &MeterSummary) {
        self.history.set_key(meter.serial.clone());
        self.meter = Some(meter.clone());
    }

    pub fn mount(&mut self, canvas: Canvas) {
        self.chart.first_render(canvas);
    }

    pub fn disconnect(&mut self) {
        self.chart.disconnect();
    }

    /// Trend of the fetched daily values
    pub fn sparkline(&self) -> Sparkline {
        let values = self
            .history
            .data()
            .map(|h| h.entries.iter().map(|e| e.consumption).collect::<Vec<_>>())
            .unwrap_or_default();
        Sparkline::new(values)
    }

    pub fn render(&mut self, locale: Locale, dark_mode: bool) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(meter) = &self.meter {
            lines.push(header(meter, locale));
            lines.extend(meter_lines(meter, locale));
            lines.extend(cost_lines(meter, &self.currency, locale));
            if let Some(today) = meter.daily_consumption {
                lines.push(format!("{}: {today} kWh", t(locale, "consumption-today")));
            }
        }

        let trend = self.sparkline().render_text();
        if !trend.is_empty() {
            lines.push(format!("{}: {trend}", t(locale, "meter-trend")));
        }

        let view = self.history.view();
        match view.data.as_deref() {
            Some(history) if !history.entries.is_empty() => {
                let kind = self.meter.as_ref().map(|m| m.kind).unwrap_or_default();
                self.chart.set_props(chart_props(history, kind, locale, dark_mode));
                if let Some(chart) = self.chart.instance() {
                    lines.extend(chart.render_text());
                }
            }
            _ if view.loading => lines.push(t(locale, "chart-loading")),
            _ => {
                if let Some(error) = view.error {
                    lines.push(format!("⚠ {error}"));
                }
            }
        }

        lines
    }
}

fn header(meter: &MeterSummary, locale: Locale) -> String {
    let kind = match meter.kind {
        MeterKind::Electricity => t(locale, "meter-electricity"),
        MeterKind::Gas => t(locale, "meter-gas"),
        MeterKind::Other => t(locale, "meter-other"),
    };
    match &meter.serial {
        Some(serial) => format!("{kind} {serial}"),
        None => kind,
    }
}

fn meter_lines(meter: &MeterSummary, locale: Locale) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(reading) = meter.latest_reading {
        lines.push(format!("{}: {reading}", t(locale, "meter-latest-reading")));
    }
    if let Some(date) = meter.latest_reading_date.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("{}: {date}", t(locale, "meter-date")));
    }
    if let Some(tariff) = meter.tariff_name.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("{}: {tariff}", t(locale, "meter-tariff")));
    }
    lines
}

fn cost_lines(meter: &MeterSummary, currency: &str, locale: Locale) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(today) = meter.today_cost_estimate() {
        lines.push(format!("{}: {}", t(locale, "cost-today"), format_money(today, currency)));
    }
    if let Some(yesterday) = meter.previous_day_cost {
        lines.push(format!("{}: {}", t(locale, "cost-yesterday"), format_money(yesterday, currency)));
    }
    if let Some(standing) = meter.standing_charge {
        lines.push(format!("{}: {}", t(locale, "cost-standing"), format_money(standing, currency)));
    }
    if let Some(rate) = meter.unit_rate {
        lines.push(format!("{}: {currency}{rate:.4}", t(locale, "cost-unit-rate")));
    }
    lines
}

fn chart_props(
    history: &ConsumptionHistory,
    kind: MeterKind,
    locale: Locale,
    dark_mode: bool,
) -> BarChartProps {
    let labels = history
        .entries
        .iter()
        .map(|e| format_weekday_short(e.date, locale))
        .collect();
    let values = history.entries.iter().map(|e| e.consumption).collect();

    let data = ChartData::new(labels).series(
        Series::new(t(locale, "consumption-title"), values, ChartColors::bar(kind))
            .border_radius(BAR_BORDER_RADIUS),
    );
    BarChartProps::new(data).y_label("kWh").dark_mode(dark_mode)
}

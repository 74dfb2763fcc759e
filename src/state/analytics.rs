//! WindowedAnalytics - Period Cost Breakdown Engine
//!
//! Fetches consumption history sized to the selected aggregation window,
//! then derives totals and chart segments from it. Derivation is memoized on
//! its inputs so repeated renders reuse the same result.
//!
//! ## Data Flow
//!
//! ```text
//! (serial, lookback_days) changed ──► race-guarded fetch ──► history
//!                                                              │
//! (history, period, rate, standing, kind) ──► memo ──► Breakdown
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use futures::FutureExt;

use crate::app::host::{Host, HostController};
use crate::domain::cost::DerivedTotals;
use crate::domain::history::HistoryEntry;
use crate::domain::meter::{EntityRef, MeterKind, MeterSummary};
use crate::domain::period::AggregationWindow;
use crate::i18n::Locale;
use crate::services::{RaceGuard, Stale, api};
use crate::utils::format::{format_date_span, format_day_label};

/// Clock returning the local calendar day
pub type Clock = Rc<dyn Fn() -> NaiveDate>;

/// Tariff and scope inputs the view passes down on every render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TariffInputs {
    pub serial: Option<EntityRef>,
    pub unit_rate: Option<f64>,
    pub standing_charge: Option<f64>,
    pub kind: MeterKind,
}

impl From<&MeterSummary> for TariffInputs {
    fn from(meter: &MeterSummary) -> Self {
        Self {
            serial: meter.serial.clone(),
            unit_rate: meter.unit_rate,
            standing_charge: meter.standing_charge,
            kind: meter.kind,
        }
    }
}

/// Derived view of one window
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub totals: DerivedTotals,
    /// Empty when the window has no entries
    pub period_label: String,
    /// The bucketed entries the totals were derived from
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone)]
pub enum BreakdownView {
    /// No unit rate, so no cost figures at all
    NoTariff,
    Priced(Rc<Breakdown>),
}

struct MemoKey {
    history: Rc<Vec<HistoryEntry>>,
    period: AggregationWindow,
    unit_rate: f64,
    standing_charge: Option<f64>,
    kind: MeterKind,
}

impl MemoKey {
    fn matches(&self, other: &MemoKey) -> bool {
        Rc::ptr_eq(&self.history, &other.history)
            && self.period == other.period
            && self.unit_rate == other.unit_rate
            && self.standing_charge == other.standing_charge
            && self.kind == other.kind
    }
}

struct EngineState {
    inputs: TariffInputs,
    period: AggregationWindow,
    history: Rc<Vec<HistoryEntry>>,
    loading: bool,
    error: Option<String>,
    /// (serial, lookback_days) of the last issued fetch
    fetched: Option<(EntityRef, u32)>,
    memo: Option<(MemoKey, Rc<Breakdown>)>,
}

impl EngineState {
    fn reset_session(&mut self) {
        self.history = Rc::new(Vec::new());
        self.loading = self.inputs.serial.is_some();
        self.error = None;
        self.fetched = None;
        self.memo = None;
    }
}

pub struct WindowedAnalytics {
    host: Rc<dyn Host>,
    guard: RaceGuard,
    clock: Clock,
    state: Rc<RefCell<EngineState>>,
}

impl WindowedAnalytics {
    pub fn new(host: Rc<dyn Host>) -> Self {
        Self::with_clock(host, Rc::new(|| Local::now().date_naive()))
    }

    pub fn with_clock(host: Rc<dyn Host>, clock: Clock) -> Self {
        Self {
            host,
            guard: RaceGuard::new(),
            clock,
            state: Rc::new(RefCell::new(EngineState {
                inputs: TariffInputs::default(),
                period: AggregationWindow::default(),
                history: Rc::new(Vec::new()),
                loading: false,
                error: None,
                fetched: None,
                memo: None,
            })),
        }
    }

    /// Update the tariff inputs. Switching to another meter (or to none)
    /// drops the previous meter's history and supersedes its in-flight fetch.
    pub fn set_inputs(&self, inputs: TariffInputs) {
        let rekeyed = {
            let mut state = self.state.borrow_mut();
            let rekeyed = state.inputs.serial != inputs.serial;
            if rekeyed {
                state.history = Rc::new(Vec::new());
                state.loading = inputs.serial.is_some();
                state.error = None;
                state.fetched = None;
            }
            state.inputs = inputs;
            rekeyed
        };
        if rekeyed {
            self.guard.invalidate();
        }
    }

    pub fn set_period(&self, period: AggregationWindow) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.period != period;
            state.period = period;
            changed
        };
        if changed {
            self.host.request_update();
        }
    }

    /// Period picker handler
    pub fn select_picker_value(&self, value: u32) {
        self.set_period(AggregationWindow::from_picker_value(value));
    }

    pub fn period(&self) -> AggregationWindow {
        self.state.borrow().period
    }

    pub fn history(&self) -> Rc<Vec<HistoryEntry>> {
        self.state.borrow().history.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Totals for the selected window, recomputed only when the history,
    /// period or tariff changed since the last call
    pub fn breakdown(&self) -> BreakdownView {
        let mut state = self.state.borrow_mut();
        let Some(unit_rate) = state.inputs.unit_rate else {
            return BreakdownView::NoTariff;
        };

        let key = MemoKey {
            history: state.history.clone(),
            period: state.period,
            unit_rate,
            standing_charge: state.inputs.standing_charge,
            kind: state.inputs.kind,
        };
        if let Some((memo_key, memo)) = &state.memo
            && memo_key.matches(&key)
        {
            return BreakdownView::Priced(memo.clone());
        }

        let today = (self.clock)();
        let entries = key.period.bucket(&key.history, today);
        let totals = DerivedTotals::derive(&entries, unit_rate, key.standing_charge, key.kind);
        let period_label = period_label(key.period, &entries, self.host.locale());

        let breakdown = Rc::new(Breakdown {
            totals,
            period_label,
            entries,
        });
        state.memo = Some((key, breakdown.clone()));

        BreakdownView::Priced(breakdown)
    }

    fn sync(&self) {
        let (serial, days) = {
            let state = self.state.borrow();
            let Some(serial) = state.inputs.serial.clone() else {
                return;
            };
            let days = state.period.lookback_days();
            if state.fetched.as_ref() == Some(&(serial.clone(), days)) {
                return;
            }
            (serial, days)
        };
        let Some(session) = self.host.session() else {
            return;
        };

        {
            let mut state = self.state.borrow_mut();
            state.fetched = Some((serial.clone(), days));
            state.loading = true;
        }
        tracing::debug!(%serial, days, "Fetching consumption history");

        let request = self.guard.run(move || api::get_consumption_history(&*session, &serial, days));
        let state = self.state.clone();
        let host = self.host.clone();

        self.host.spawn(
            "analytics-history",
            async move {
                let result = match request.await {
                    Ok(result) => result,
                    Err(Stale) => {
                        tracing::debug!(days, "Discarding superseded history response");
                        return;
                    }
                };
                {
                    let mut state = state.borrow_mut();
                    match result {
                        Ok(history) => {
                            state.history = Rc::new(history.entries);
                            state.error = None;
                        }
                        Err(err) => {
                            tracing::warn!(days, error = %err, "History fetch failed");
                            state.history = Rc::new(Vec::new());
                            state.error = Some(err.to_string());
                        }
                    }
                    state.loading = false;
                }
                host.request_update();
            }
            .boxed_local(),
        );
    }
}

impl HostController for WindowedAnalytics {
    fn on_host_update(&self) {
        self.sync();
    }

    fn on_detach(&self) {
        self.state.borrow_mut().reset_session();
        self.guard.invalidate();
    }
}

/// "Friday 27 Feb" for a single day, "21 Feb – 27 Feb" for a span
fn period_label(period: AggregationWindow, entries: &[HistoryEntry], locale: Locale) -> String {
    match (entries.first(), entries.last()) {
        (Some(first), Some(_)) if period == AggregationWindow::Day && entries.len() == 1 => {
            format_day_label(first.date, locale)
        }
        (Some(first), Some(last)) => format_date_span(first.date, last.date, locale),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::headless::HeadlessHost;
    use crate::domain::command::Request;
    use crate::testing::{ScriptedTransport, connected_host, settle};
    use serde_json::{Value, json};
    use tokio::task::LocalSet;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).expect("valid date")
    }

    fn fixed_clock() -> Clock {
        Rc::new(|| date(2, 28))
    }

    fn engine(host: Rc<dyn Host>) -> WindowedAnalytics {
        WindowedAnalytics::with_clock(host, fixed_clock())
    }

    fn tariff(serial: &str) -> TariffInputs {
        TariffInputs {
            serial: Some(EntityRef::new(serial)),
            unit_rate: Some(0.2449),
            standing_charge: Some(0.61),
            kind: MeterKind::Electricity,
        }
    }

    /// Response with one entry per value, ending yesterday
    fn history_response(values: &[f64]) -> Value {
        let today = date(2, 28);
        let entries: Vec<Value> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let back = (values.len() - i) as u64;
                let day = today
                    .checked_sub_days(chrono::Days::new(back))
                    .expect("valid date");
                json!({ "date": day.to_string(), "consumption": v })
            })
            .collect();
        json!({ "entries": entries })
    }

    const WEEK: [f64; 7] = [9.12, 10.4, 8.95, 9.6, 10.06, 10.1, 8.72];

    fn history_request(days: u32) -> Request {
        Request::ConsumptionHistory {
            serial: EntityRef::new("E1"),
            days,
        }
    }

    #[tokio::test]
    async fn test_fetches_lookback_for_selected_period() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                assert_eq!(transport.pending(), vec![history_request(2)]);

                analytics.on_host_update();
                assert_eq!(transport.calls(), 1);

                analytics.set_period(AggregationWindow::Week);
                analytics.on_host_update();
                assert_eq!(transport.pending(), vec![history_request(2), history_request(8)]);
            })
            .await;
    }

    #[tokio::test]
    async fn test_latest_period_wins_when_earlier_response_arrives_last() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                analytics.set_period(AggregationWindow::Week);
                analytics.on_host_update();

                transport.resolve(1, history_response(&WEEK));
                settle().await;
                assert_eq!(analytics.history().len(), 7);

                transport.resolve(0, history_response(&[1.0]));
                settle().await;
                assert_eq!(analytics.history().len(), 7);
                assert!(!analytics.loading());
            })
            .await;
    }

    #[tokio::test]
    async fn test_rapid_toggling_applies_only_final_request() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                analytics.set_period(AggregationWindow::Week);
                analytics.on_host_update();
                analytics.set_period(AggregationWindow::Day);
                analytics.on_host_update();
                assert_eq!(transport.calls(), 3);

                // Resolve in order: last, first, middle
                transport.resolve(2, history_response(&[3.0, 4.0]));
                settle().await;
                transport.resolve(0, history_response(&[1.0]));
                settle().await;
                transport.resolve(0, history_response(&WEEK));
                settle().await;

                let history = analytics.history();
                assert_eq!(history.len(), 2);
                assert_eq!(history[1].consumption, 4.0);
            })
            .await;
    }

    #[tokio::test]
    async fn test_current_failure_empties_history_stale_failure_is_ignored() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                analytics.set_period(AggregationWindow::Week);
                analytics.on_host_update();

                transport.resolve(1, history_response(&WEEK));
                settle().await;
                transport.reject(0, "timeout");
                settle().await;
                assert_eq!(analytics.history().len(), 7);
                assert!(analytics.error().is_none());

                analytics.set_period(AggregationWindow::Month);
                analytics.on_host_update();
                transport.reject(0, "connection refused");
                settle().await;
                assert!(analytics.history().is_empty());
                assert_eq!(analytics.error().as_deref(), Some("connection refused"));
            })
            .await;
    }

    #[tokio::test]
    async fn test_week_breakdown_totals() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.set_period(AggregationWindow::Week);
                analytics.on_host_update();
                assert_eq!(transport.pending(), vec![history_request(8)]);

                transport.resolve(0, history_response(&WEEK));
                settle().await;

                let BreakdownView::Priced(breakdown) = analytics.breakdown() else {
                    panic!("expected priced breakdown");
                };
                assert_eq!(breakdown.totals.days, 7);
                assert_eq!(breakdown.totals.consumption_cost, 16.4);
                assert_eq!(breakdown.totals.standing_cost, 4.27);
                assert_eq!(breakdown.totals.total_cost, 20.67);
                assert_eq!(breakdown.totals.segments.len(), 2);
                assert_eq!(breakdown.period_label, "21 Feb – 27 Feb");
            })
            .await;
    }

    #[tokio::test]
    async fn test_day_breakdown_label_names_the_day() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                transport.resolve(0, history_response(&[5.0, 6.0]));
                settle().await;

                let BreakdownView::Priced(breakdown) = analytics.breakdown() else {
                    panic!("expected priced breakdown");
                };
                assert_eq!(breakdown.entries.len(), 1);
                assert_eq!(breakdown.totals.consumption, 6.0);
                assert_eq!(breakdown.period_label, "Friday 27 Feb");
            })
            .await;
    }

    #[tokio::test]
    async fn test_breakdown_is_memoized_on_inputs() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.set_period(AggregationWindow::Week);
                analytics.on_host_update();
                transport.resolve(0, history_response(&WEEK));
                settle().await;

                let priced = |view: BreakdownView| match view {
                    BreakdownView::Priced(b) => b,
                    BreakdownView::NoTariff => panic!("expected priced breakdown"),
                };

                let first = priced(analytics.breakdown());
                let second = priced(analytics.breakdown());
                assert!(Rc::ptr_eq(&first, &second));

                let mut inputs = tariff("E1");
                inputs.unit_rate = Some(0.3);
                analytics.set_inputs(inputs.clone());
                let repriced = priced(analytics.breakdown());
                assert!(!Rc::ptr_eq(&second, &repriced));

                inputs.kind = MeterKind::Gas;
                analytics.set_inputs(inputs);
                let gas = priced(analytics.breakdown());
                assert!(!Rc::ptr_eq(&repriced, &gas));

                analytics.set_period(AggregationWindow::Day);
                let day = priced(analytics.breakdown());
                assert!(!Rc::ptr_eq(&gas, &day));
                assert!(Rc::ptr_eq(&day, &priced(analytics.breakdown())));
            })
            .await;
    }

    #[tokio::test]
    async fn test_missing_unit_rate_means_no_tariff() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                let mut inputs = tariff("E1");
                inputs.unit_rate = None;
                analytics.set_inputs(inputs);

                assert!(matches!(analytics.breakdown(), BreakdownView::NoTariff));
            })
            .await;
    }

    #[tokio::test]
    async fn test_no_serial_or_no_session_means_no_fetch() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));
                analytics.set_inputs(TariffInputs {
                    serial: None,
                    ..tariff("E1")
                });
                analytics.on_host_update();
                assert_eq!(transport.calls(), 0);
                assert!(!analytics.loading());
                assert!(matches!(analytics.breakdown(), BreakdownView::Priced(b) if b.entries.is_empty()));

                let offline = engine(Rc::new(HeadlessHost::new(None)));
                offline.set_inputs(tariff("E1"));
                offline.on_host_update();
                settle().await;
                assert!(offline.loading());
                assert!(offline.history().is_empty());
            })
            .await;
    }

    #[tokio::test]
    async fn test_detach_discards_in_flight_and_reattach_refetches() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                analytics.on_detach();

                transport.resolve(0, history_response(&[1.0, 2.0]));
                settle().await;
                assert!(analytics.history().is_empty());

                analytics.on_attach();
                analytics.on_host_update();
                assert_eq!(transport.calls(), 2);
            })
            .await;
    }

    #[tokio::test]
    async fn test_switching_meter_clears_history_and_refetches() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                transport.resolve(0, history_response(&[1.0, 2.0]));
                settle().await;
                assert_eq!(analytics.history().len(), 2);

                analytics.set_inputs(tariff("G1"));
                assert!(analytics.history().is_empty());
                analytics.on_host_update();
                assert_eq!(
                    transport.pending(),
                    vec![Request::ConsumptionHistory {
                        serial: EntityRef::new("G1"),
                        days: 2,
                    }]
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_serial_cleared_then_restored_refetches() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                transport.resolve(0, history_response(&[1.0, 2.0]));
                settle().await;

                analytics.set_inputs(TariffInputs {
                    serial: None,
                    ..tariff("E1")
                });
                analytics.on_host_update();
                assert!(analytics.history().is_empty());
                assert!(!analytics.loading());

                analytics.set_inputs(tariff("E1"));
                assert!(analytics.loading());
                analytics.on_host_update();
                assert_eq!(transport.calls(), 2);
                assert_eq!(transport.pending(), vec![history_request(2)]);

                transport.resolve(0, history_response(&[3.0, 4.0]));
                settle().await;
                assert_eq!(analytics.history().len(), 2);
                assert!(!analytics.loading());
            })
            .await;
    }

    #[tokio::test]
    async fn test_previous_serial_response_is_dropped_after_rekey() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let analytics = engine(connected_host(&transport));

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                analytics.set_inputs(TariffInputs {
                    serial: None,
                    ..tariff("E1")
                });

                transport.resolve(0, history_response(&[1.0, 2.0]));
                settle().await;
                assert!(analytics.history().is_empty());
                assert!(!analytics.loading());

                analytics.set_inputs(tariff("E1"));
                analytics.on_host_update();
                analytics.set_inputs(tariff("G1"));
                analytics.on_host_update();

                transport.resolve(0, history_response(&WEEK));
                settle().await;
                assert!(analytics.history().is_empty());
                assert!(analytics.loading());

                transport.resolve(0, history_response(&[5.0]));
                settle().await;
                assert_eq!(analytics.history().len(), 1);
                assert!(!analytics.loading());
            })
            .await;
    }
}

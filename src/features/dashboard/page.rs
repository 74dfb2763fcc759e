//! Dashboard Page
//!
//! Composes every panel: one consumption card and one cost breakdown per
//! meter, one schedule per EV charger, and the backfill status. Sections are
//! created and dropped to follow the summary the host reports.

use std::rc::Rc;

use crate::app::headless::HeadlessHost;
use crate::app::host::{ControllerSet, Host, HostController};
use crate::components::charts::headless::HeadlessCharts;
use crate::components::charts::library::Canvas;
use crate::constants::MAX_SETTLE_PASSES;
use crate::domain::meter::{DashboardSummary, VersionResponse};
use crate::features::backfill::BackfillPage;
use crate::features::breakdown::BreakdownPage;
use crate::features::consumption::ConsumptionPage;
use crate::features::schedule::SchedulePage;
use crate::i18n::t;
use crate::services::{SharedTransport, api};
use crate::state::DataController;
use crate::state::analytics::{Clock, WindowedAnalytics};

use super::version::version_banner;

struct MeterSection {
    consumption: ConsumptionPage,
    breakdown: BreakdownPage,
}

pub struct DashboardPage {
    host: Rc<dyn Host>,
    charts: HeadlessCharts,
    currency: String,
    clock: Option<Clock>,
    summary: Rc<DataController<DashboardSummary>>,
    version: Rc<DataController<VersionResponse>>,
    backfill: BackfillPage,
    meters: Vec<MeterSection>,
    chargers: Vec<SchedulePage>,
    controllers: ControllerSet,
    attached: bool,
    synced: Option<Rc<DashboardSummary>>,
}

impl DashboardPage {
    pub fn new(host: Rc<dyn Host>, charts: HeadlessCharts, currency: impl Into<String>) -> Self {
        let summary = Rc::new(DataController::new(host.clone(), |session: SharedTransport| {
            api::get_dashboard_summary(&*session)
        }));
        let version = Rc::new(DataController::new(host.clone(), |session: SharedTransport| {
            api::get_version(&*session)
        }));
        let backfill = BackfillPage::new(host.clone());

        let mut controllers = ControllerSet::new();
        controllers.add(summary.clone());
        controllers.add(version.clone());
        controllers.add(backfill.controller());

        Self {
            host,
            charts,
            currency: currency.into(),
            clock: None,
            summary,
            version,
            backfill,
            meters: Vec::new(),
            chargers: Vec::new(),
            controllers,
            attached: false,
            synced: None,
        }
    }

    /// Date source for the cost breakdowns
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn attach(&mut self) {
        self.attached = true;
        self.controllers.attach();
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.controllers.detach();
        for section in &mut self.meters {
            section.consumption.disconnect();
            section.breakdown.disconnect();
        }
    }

    pub fn meter_count(&self) -> usize {
        self.meters.len()
    }

    pub fn charger_count(&self) -> usize {
        self.chargers.len()
    }

    /// Period picker of the breakdown for meter `index` changed
    pub fn select_period(&self, index: usize, value: u32) {
        if let Some(section) = self.meters.get(index) {
            section.breakdown.select_period(value);
        }
    }

    /// One update cycle: render, then let every controller react
    pub fn pass(&mut self) -> Vec<String> {
        let lines = self.render();
        self.controllers.host_updated();
        lines
    }

    /// Re-render until no fetch is in flight and no update is pending
    pub async fn run_until_settled(&mut self, host: &HeadlessHost) -> Vec<String> {
        let mut lines = Vec::new();
        for pass in 0..MAX_SETTLE_PASSES {
            lines = self.pass();
            let requested = host.take_update_request();
            if host.in_flight() == 0 && !requested {
                tracing::debug!(passes = pass + 1, "Dashboard settled");
                return lines;
            }
            if host.in_flight() > 0 {
                host.changed().await;
            }
        }
        tracing::warn!(passes = MAX_SETTLE_PASSES, "Dashboard did not settle");
        lines
    }

    pub fn render(&mut self) -> Vec<String> {
        let locale = self.host.locale();
        let dark_mode = self.host.dark_mode();
        self.sync_sections();

        let mut lines = Vec::new();
        if let Some(version) = self.version.data() {
            lines.extend(version_banner(Some(&version.version), locale));
        }

        let view = self.summary.view();
        match view.data {
            Some(_) if self.meters.is_empty() && self.chargers.is_empty() => {
                lines.push(t(locale, "summary-empty"));
            }
            Some(_) => {
                for section in &mut self.meters {
                    lines.extend(section.consumption.render(locale, dark_mode));
                    lines.extend(section.breakdown.render(locale, dark_mode));
                    lines.push(String::new());
                }
                for charger in &self.chargers {
                    lines.extend(charger.render(locale));
                    lines.push(String::new());
                }
            }
            None => match view.error {
                Some(error) => lines.push(format!("{}: {error}", t(locale, "summary-error"))),
                None => lines.push(t(locale, "summary-loading")),
            },
        }

        lines.extend(self.backfill.render(locale));
        lines
    }

    /// Match the meter and charger sections to the latest summary
    fn sync_sections(&mut self) {
        let Some(summary) = self.summary.data() else {
            return;
        };
        if self.synced.as_ref().is_some_and(|s| Rc::ptr_eq(s, &summary)) {
            return;
        }
        tracing::debug!(
            meters = summary.meters.len(),
            chargers = summary.ev_chargers.len(),
            "Syncing dashboard sections"
        );

        while self.meters.len() > summary.meters.len() {
            if let Some(mut section) = self.meters.pop() {
                section.consumption.disconnect();
                section.breakdown.disconnect();
                self.release(section.consumption.controller());
                self.release(section.breakdown.controller());
            }
        }
        for (index, meter) in summary.meters.iter().enumerate() {
            if index == self.meters.len() {
                let section = self.meter_section(index);
                self.adopt(section.consumption.controller());
                self.adopt(section.breakdown.controller());
                self.meters.push(section);
            }
            let section = &mut self.meters[index];
            section.consumption.set_meter(meter);
            section.breakdown.set_meter(meter);
        }

        while self.chargers.len() > summary.ev_chargers.len() {
            if let Some(page) = self.chargers.pop() {
                self.release(page.controller());
            }
        }
        for (index, charger) in summary.ev_chargers.iter().enumerate() {
            if index == self.chargers.len() {
                let page = SchedulePage::new(self.host.clone());
                self.adopt(page.controller());
                self.chargers.push(page);
            }
            self.chargers[index].set_charger(charger);
        }

        self.synced = Some(summary);
    }

    fn meter_section(&self, index: usize) -> MeterSection {
        let mut consumption =
            ConsumptionPage::new(self.host.clone(), self.charts.clone(), self.currency.clone());
        consumption.mount(Canvas::new(format!("consumption-{index}")));

        let analytics = match &self.clock {
            Some(clock) => WindowedAnalytics::with_clock(self.host.clone(), clock.clone()),
            None => WindowedAnalytics::new(self.host.clone()),
        };
        let mut breakdown =
            BreakdownPage::with_analytics(analytics, self.charts.clone(), self.currency.clone());
        breakdown.mount(Canvas::new(format!("breakdown-{index}")));

        MeterSection {
            consumption,
            breakdown,
        }
    }

    fn adopt(&mut self, controller: Rc<dyn HostController>) {
        if self.attached {
            controller.on_attach();
        }
        self.controllers.add(controller);
    }

    fn release(&mut self, controller: Rc<dyn HostController>) {
        controller.on_detach();
        self.controllers.remove(&controller);
    }
}

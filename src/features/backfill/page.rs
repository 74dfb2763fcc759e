//! Backfill Page

use std::rc::Rc;

use crate::app::host::{Host, HostController};
use crate::domain::backfill::BackfillStatus;
use crate::i18n::{Locale, t, t_format};
use crate::services::{SharedTransport, api};
use crate::state::DataController;

const PROGRESS_WIDTH: usize = 20;

pub struct BackfillPage {
    controller: Rc<DataController<BackfillStatus>>,
}

impl BackfillPage {
    pub fn new(host: Rc<dyn Host>) -> Self {
        let controller = DataController::new(host, |session: SharedTransport| {
            api::get_backfill_status(&*session)
        });
        Self {
            controller: Rc::new(controller),
        }
    }

    pub fn controller(&self) -> Rc<dyn HostController> {
        self.controller.clone()
    }

    pub fn render(&self, locale: Locale) -> Vec<String> {
        let title = t(locale, "backfill-title");
        let view = self.controller.view();

        if view.loading {
            return vec![title, t(locale, "backfill-loading")];
        }
        if view.error.is_some() {
            return vec![title, t(locale, "backfill-error")];
        }
        let Some(status) = view.data else {
            return vec![title, t(locale, "backfill-none")];
        };
        if !status.enabled {
            return vec![title, t(locale, "backfill-disabled")];
        }

        let mut lines = Vec::new();
        if status.state.is_empty() {
            lines.push(title);
        } else {
            lines.push(format!("{title} [{}]", status.state));
        }

        let pct = status.progress_percent();
        let done = status.completed_meters.to_string();
        let total = status.total_meters.to_string();
        let pct_text = pct.to_string();
        lines.push(format!(
            "{}: {}",
            t(locale, "backfill-progress"),
            t_format(
                locale,
                "backfill-meters",
                &[("done", done.as_str()), ("total", total.as_str()), ("pct", pct_text.as_str())],
            )
        ));
        lines.push(progress_bar(pct));

        if status.lookback_days > 0 {
            lines.push(format!(
                "{}: {}",
                t(locale, "backfill-lookback"),
                t_format(locale, "backfill-days", &[("days", status.lookback_days.to_string().as_str())])
            ));
        }
        if let Some(next) = status.next_start_date.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("{}: {next}", t(locale, "backfill-next")));
        }

        for meter in &status.meters {
            let progress = if meter.done {
                t(locale, "backfill-complete")
            } else {
                let days = format!("{}/{}", meter.days_completed, meter.days_total());
                t_format(locale, "backfill-days", &[("days", days.as_str())])
            };
            lines.push(format!("  {}  {progress}", meter.serial));
        }

        lines
    }
}

fn progress_bar(pct: u32) -> String {
    let filled = (pct.min(100) as usize * PROGRESS_WIDTH).div_ceil(100);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled)
    )
}

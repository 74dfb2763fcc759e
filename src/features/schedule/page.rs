//! EV Schedule Page

use std::rc::Rc;

use crate::app::host::{Host, HostController};
use crate::domain::meter::{EntityRef, EvChargerSummary};
use crate::domain::schedule::{EvSchedule, ScheduleStatus};
use crate::i18n::{Locale, t};
use crate::services::{SharedTransport, api};
use crate::state::KeyedController;
use crate::utils::format::format_date_time_range;

pub struct SchedulePage {
    charger: Option<EvChargerSummary>,
    controller: Rc<KeyedController<EntityRef, EvSchedule>>,
}

impl SchedulePage {
    pub fn new(host: Rc<dyn Host>) -> Self {
        let controller = KeyedController::new(host, |session: SharedTransport, device_id: EntityRef| {
            api::get_ev_schedule(&*session, &device_id)
        });
        Self {
            charger: None,
            controller: Rc::new(controller),
        }
    }

    pub fn controller(&self) -> Rc<dyn HostController> {
        self.controller.clone()
    }

    /// Scope the page to `charger`
    pub fn set_charger(&mut self, charger: &EvChargerSummary) {
        self.controller.set_key(Some(charger.device_id.clone()));
        self.charger = Some(charger.clone());
    }

    pub fn render(&self, locale: Locale) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(charger) = &self.charger {
            lines.push(format!("EV {}", charger.serial));
            if charger.next_charge_start.is_some() {
                lines.push(format_date_time_range(
                    charger.next_charge_start.as_deref(),
                    charger.next_charge_end.as_deref(),
                    locale,
                ));
            }
        }

        let view = self.controller.view();
        if view.loading {
            lines.push(t(locale, "schedule-loading"));
            return lines;
        }
        if view.error.is_some() {
            lines.push(t(locale, "schedule-error"));
            return lines;
        }
        let Some(schedule) = view.data else {
            lines.push(t(locale, "schedule-none"));
            return lines;
        };

        let status = match schedule.status {
            ScheduleStatus::Scheduled => t(locale, "schedule-active"),
            ScheduleStatus::Idle => t(locale, "schedule-idle"),
        };
        lines.push(format!("{} [{status}]", t(locale, "schedule-title")));

        if schedule.slots.is_empty() {
            lines.push(t(locale, "schedule-no-slots"));
        }
        for (i, slot) in schedule.slots.iter().enumerate() {
            let range = format_date_time_range(Some(&slot.start), Some(&slot.end), locale);
            match slot.duration_label() {
                Some(duration) => lines.push(format!("  #{} {range} ({duration})", i + 1)),
                None => lines.push(format!("  #{} {range}", i + 1)),
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedTransport, connected_host, settle};
    use serde_json::json;
    use tokio::task::LocalSet;

    fn charger() -> EvChargerSummary {
        EvChargerSummary {
            device_id: EntityRef::new("dev-1"),
            serial: "EV123".into(),
            schedule_slots: 1,
            next_charge_start: None,
            next_charge_end: None,
        }
    }

    #[tokio::test]
    async fn test_renders_slots_with_duration() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let mut page = SchedulePage::new(connected_host(&transport));
                page.set_charger(&charger());
                assert_eq!(page.render(Locale::EnGB), vec!["EV EV123", "Loading EV schedule…"]);

                page.controller().on_host_update();
                transport.resolve(
                    0,
                    json!({
                        "status": "scheduled",
                        "slots": [{ "start": "2026-02-28T01:00:00", "end": "2026-02-28T03:30:00" }]
                    }),
                );
                settle().await;

                let lines = page.render(Locale::EnGB);
                assert_eq!(lines[1], "Schedule [Active]");
                assert_eq!(lines[2], "  #1 Sat 28 Feb, 01:00 → Sat 28 Feb, 03:30 (2h 30m)");
            })
            .await;
    }

    #[tokio::test]
    async fn test_idle_without_slots() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let mut page = SchedulePage::new(connected_host(&transport));
                page.set_charger(&charger());

                page.controller().on_host_update();
                transport.resolve(0, json!({ "status": "idle", "slots": [] }));
                settle().await;

                let lines = page.render(Locale::EnGB);
                assert_eq!(lines[1], "Schedule [Idle]");
                assert_eq!(lines[2], "No upcoming charge slots");
            })
            .await;
    }

    #[tokio::test]
    async fn test_error_is_inline() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                let mut page = SchedulePage::new(connected_host(&transport));
                page.set_charger(&charger());

                page.controller().on_host_update();
                transport.reject(0, "connection refused");
                settle().await;

                assert_eq!(page.render(Locale::EnGB)[1], "Unable to load schedule");
            })
            .await;
    }
}

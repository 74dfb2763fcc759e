//! Schedule - EV Charging Schedule

use serde::{Deserialize, Serialize};

use crate::utils::format::parse_local;

/// Whether the charger has planned slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    #[default]
    #[serde(other)]
    Idle,
}

/// A planned charging slot (ISO-8601 bounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeSlot {
    pub start: String,
    pub end: String,
}

impl ChargeSlot {
    /// Slot length as `"2h 30m"`, `"2h"` or `"45m"`. Absent when either bound
    /// does not parse or the slot is not positive.
    pub fn duration_label(&self) -> Option<String> {
        let start = parse_local(&self.start)?;
        let end = parse_local(&self.end)?;

        let seconds = (end - start).num_seconds();
        let minutes = (seconds as f64 / 60.0).round() as i64;
        if minutes <= 0 {
            return None;
        }

        let hours = minutes / 60;
        let remainder = minutes % 60;
        Some(match (hours, remainder) {
            (0, m) => format!("{m}m"),
            (h, 0) => format!("{h}h"),
            (h, m) => format!("{h}h {m}m"),
        })
    }
}

/// `eon_next/ev_schedule` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvSchedule {
    #[serde(default)]
    pub status: ScheduleStatus,
    #[serde(default)]
    pub slots: Vec<ChargeSlot>,
}

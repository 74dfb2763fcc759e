//! Backfill - Historical Statistics Import Progress

use serde::{Deserialize, Serialize};

/// Progress of one meter's backfill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterBackfill {
    pub serial: String,
    pub done: bool,
    #[serde(default)]
    pub days_completed: u32,
    #[serde(default)]
    pub days_remaining: u32,
}

impl MeterBackfill {
    /// Total days this meter will backfill
    pub fn days_total(&self) -> u32 {
        self.days_completed + self.days_remaining
    }
}

/// `eon_next/backfill_status` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackfillStatus {
    pub enabled: bool,
    /// Free-form state name reported by the host (e.g. "running", "idle")
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub total_meters: u32,
    #[serde(default)]
    pub completed_meters: u32,
    #[serde(default)]
    pub lookback_days: u32,
    #[serde(default)]
    pub next_start_date: Option<String>,
    #[serde(default)]
    pub meters: Vec<MeterBackfill>,
}

impl BackfillStatus {
    /// Completed share of meters, rounded to a whole percent
    pub fn progress_percent(&self) -> u32 {
        if self.total_meters == 0 {
            return 0;
        }
        (f64::from(self.completed_meters) / f64::from(self.total_meters) * 100.0).round() as u32
    }
}

//! Command - Requests Understood by the Host Channel

use serde::Serialize;

use crate::domain::meter::EntityRef;

/// A tagged request `{type, ...params}` sent over the host channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Backend integration version
    #[serde(rename = "eon_next/version")]
    Version,

    /// All meters and EV chargers with their latest figures
    #[serde(rename = "eon_next/dashboard_summary")]
    DashboardSummary,

    /// Daily consumption for one meter, most recent `days` days
    #[serde(rename = "eon_next/consumption_history")]
    ConsumptionHistory { serial: EntityRef, days: u32 },

    /// Planned charging slots for one EV charger
    #[serde(rename = "eon_next/ev_schedule")]
    EvSchedule { device_id: EntityRef },

    /// Historical statistics import progress
    #[serde(rename = "eon_next/backfill_status")]
    BackfillStatus,
}

impl Request {
    /// The `type` tag of this request
    pub fn command(&self) -> &'static str {
        match self {
            Request::Version => "eon_next/version",
            Request::DashboardSummary => "eon_next/dashboard_summary",
            Request::ConsumptionHistory { .. } => "eon_next/consumption_history",
            Request::EvSchedule { .. } => "eon_next/ev_schedule",
            Request::BackfillStatus => "eon_next/backfill_status",
        }
    }
}

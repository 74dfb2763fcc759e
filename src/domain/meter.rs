//! Meter - Summary Types Returned by the Host

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque identifier of the meter or device a view is scoped to
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRef(pub Arc<str>);

impl EntityRef {
    /// Create a new EntityRef from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityRef {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fuel a meter measures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterKind {
    #[default]
    Electricity,
    Gas,
    /// Anything the host reports that we do not style specially
    #[serde(other)]
    Other,
}

/// `eon_next/version` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Per-meter summary from `eon_next/dashboard_summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterSummary {
    pub serial: Option<EntityRef>,
    #[serde(rename = "type", default)]
    pub kind: MeterKind,
    #[serde(default)]
    pub latest_reading: Option<f64>,
    #[serde(default)]
    pub latest_reading_date: Option<String>,
    #[serde(default)]
    pub daily_consumption: Option<f64>,
    #[serde(default)]
    pub standing_charge: Option<f64>,
    #[serde(default)]
    pub previous_day_cost: Option<f64>,
    #[serde(default)]
    pub unit_rate: Option<f64>,
    #[serde(default)]
    pub tariff_name: Option<String>,
}

impl MeterSummary {
    /// Minimal summary for a meter with a tariff, used by tests and fixtures
    pub fn new(serial: impl Into<EntityRef>, kind: MeterKind) -> Self {
        Self {
            serial: Some(serial.into()),
            kind,
            latest_reading: None,
            latest_reading_date: None,
            daily_consumption: None,
            standing_charge: None,
            previous_day_cost: None,
            unit_rate: None,
            tariff_name: None,
        }
    }

    /// Estimated cost so far today: consumption at the unit rate plus the
    /// daily standing charge. Absent without both consumption and a rate.
    pub fn today_cost_estimate(&self) -> Option<f64> {
        let consumption = self.daily_consumption?;
        let rate = self.unit_rate?;
        Some(consumption * rate + self.standing_charge.unwrap_or(0.0))
    }
}

/// Per-charger summary from `eon_next/dashboard_summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvChargerSummary {
    pub device_id: EntityRef,
    pub serial: String,
    #[serde(default)]
    pub schedule_slots: u32,
    #[serde(default)]
    pub next_charge_start: Option<String>,
    #[serde(default)]
    pub next_charge_end: Option<String>,
}

/// `eon_next/dashboard_summary` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub meters: Vec<MeterSummary>,
    #[serde(default)]
    pub ev_chargers: Vec<EvChargerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ref_is_a_bare_string_on_the_wire() {
        let serial: EntityRef = serde_json::from_value(serde_json::json!("E1")).expect("decode");
        assert_eq!(serial, EntityRef::new("E1"));
        assert_eq!(serde_json::to_value(&serial).expect("encode"), serde_json::json!("E1"));
    }

    #[test]
    fn summary_decodes_host_shape() {
        let json = serde_json::json!({
            "meters": [{
                "serial": "E1",
                "type": "gas",
                "latest_reading": 1234.5,
                "latest_reading_date": "2026-02-27",
                "daily_consumption": null,
                "standing_charge": 0.31,
                "previous_day_cost": 1.2,
                "unit_rate": 0.06,
                "tariff_name": "Next Flex"
            }],
            "ev_chargers": []
        });
        let summary: DashboardSummary = serde_json::from_value(json).expect("decode");
        let meter = &summary.meters[0];
        assert_eq!(meter.serial.as_ref().map(EntityRef::as_str), Some("E1"));
        assert_eq!(meter.kind, MeterKind::Gas);
        assert_eq!(meter.daily_consumption, None);
    }

    #[test]
    fn unknown_meter_type_is_other() {
        let kind: MeterKind = serde_json::from_str("\"heat\"").expect("decode");
        assert_eq!(kind, MeterKind::Other);
    }

    #[test]
    fn today_cost_needs_consumption_and_rate() {
        let mut meter = MeterSummary::new("E1", MeterKind::Electricity);
        assert_eq!(meter.today_cost_estimate(), None);

        meter.daily_consumption = Some(10.0);
        meter.unit_rate = Some(0.25);
        assert_eq!(meter.today_cost_estimate(), Some(2.5));

        meter.standing_charge = Some(0.5);
        assert_eq!(meter.today_cost_estimate(), Some(3.0));
    }
}

//! Fixture Transport - Canned Host Responses
//!
//! Serves every command from a JSON fixture file so the dashboard can run
//! without a live host. Responses are forwarded as raw JSON and decoded by
//! the same code paths a real session goes through.

use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use ahash::AHashMap;
use futures::FutureExt;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::command::Request;
use crate::error::{Error, Result};
use crate::services::transport::{CallFuture, Transport};

/// Contents of a fixture file
///
/// ```json
/// {
///   "version": { "version": "0.4.2" },
///   "dashboard_summary": { "meters": [], "ev_chargers": [] },
///   "history": { "E1": [{ "date": "2026-02-27", "consumption": 9.1 }] },
///   "ev_schedules": { "dev-1": { "status": "scheduled", "slots": [] } },
///   "backfill_status": { "enabled": false },
///   "failures": { "eon_next/backfill_status": "connection refused" }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub version: Option<Value>,
    pub dashboard_summary: Option<Value>,
    /// Daily entries per meter serial, oldest first
    pub history: AHashMap<String, Vec<Value>>,
    /// Schedules per EV charger device id
    pub ev_schedules: AHashMap<String, Value>,
    pub backfill_status: Option<Value>,
    /// Commands that fail, with the message the host reports
    pub failures: AHashMap<String, String>,
}

impl Fixture {
    /// Load a fixture from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let fixture = serde_json::from_str(&content).map_err(|e| Error::Fixture {
            message: format!("{}: {e}", path.display()),
        })?;
        tracing::info!("Loaded fixture from {}", path.display());
        Ok(fixture)
    }

    /// Answer one request
    pub fn respond(&self, request: &Request) -> Result<Value> {
        let command = request.command();
        if let Some(message) = self.failures.get(command) {
            return Err(Error::transport(message.clone()));
        }

        match request {
            Request::Version => self.version.clone().ok_or_else(|| missing(command)),
            Request::DashboardSummary => self
                .dashboard_summary
                .clone()
                .ok_or_else(|| missing(command)),
            Request::ConsumptionHistory { serial, days } => {
                let entries = self
                    .history
                    .get(serial.as_str())
                    .map(|all| {
                        let keep = (*days as usize).min(all.len());
                        all[all.len() - keep..].to_vec()
                    })
                    .unwrap_or_default();
                Ok(json!({ "entries": entries }))
            }
            Request::EvSchedule { device_id } => self
                .ev_schedules
                .get(device_id.as_str())
                .cloned()
                .ok_or_else(|| Error::transport(format!("Unknown EV charger: {device_id}"))),
            Request::BackfillStatus => self.backfill_status.clone().ok_or_else(|| missing(command)),
        }
    }
}

fn missing(command: &str) -> Error {
    Error::transport(format!("No fixture response for {command}"))
}

/// Transport answering from a [`Fixture`], optionally after a fixed delay
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    fixture: Rc<Fixture>,
    latency: Duration,
}

impl FixtureTransport {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Rc::new(fixture),
            latency: Duration::ZERO,
        }
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Transport for FixtureTransport {
    fn call(&self, request: Request) -> CallFuture {
        let fixture = self.fixture.clone();
        let latency = self.latency;

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let response = fixture.respond(&request);
            if let Err(err) = &response {
                tracing::warn!(command = request.command(), error = %err, "Fixture call failed");
            }
            response
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meter::EntityRef;

    fn fixture() -> Fixture {
        serde_json::from_value(json!({
            "version": { "version": "0.4.2" },
            "history": {
                "E1": [
                    { "date": "2026-02-25", "consumption": 1.0 },
                    { "date": "2026-02-26", "consumption": 2.0 },
                    { "date": "2026-02-27", "consumption": 3.0 }
                ]
            },
            "failures": { "eon_next/backfill_status": "connection refused" }
        }))
        .expect("fixture")
    }

    #[test]
    fn history_is_truncated_to_requested_days() {
        let response = fixture()
            .respond(&Request::ConsumptionHistory {
                serial: EntityRef::new("E1"),
                days: 2,
            })
            .expect("history");
        let entries = response["entries"].as_array().expect("entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["date"], "2026-02-26");
    }

    #[test]
    fn unknown_serial_has_empty_history() {
        let response = fixture()
            .respond(&Request::ConsumptionHistory {
                serial: EntityRef::new("G9"),
                days: 8,
            })
            .expect("history");
        assert_eq!(response, json!({ "entries": [] }));
    }

    #[test]
    fn scripted_failures_surface_bare_message() {
        let err = fixture()
            .respond(&Request::BackfillStatus)
            .expect_err("failure");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn missing_response_is_transport_error() {
        let err = fixture()
            .respond(&Request::DashboardSummary)
            .expect_err("missing");
        assert!(matches!(err, Error::Transport { .. }));
    }

    #[tokio::test]
    async fn transport_answers_from_fixture() {
        let transport = FixtureTransport::new(fixture()).with_latency(Duration::from_millis(1));
        let value = transport.call(Request::Version).await.expect("version");
        assert_eq!(value["version"], "0.4.2");
    }
}

//! History - Daily Consumption Entries
//!
//! Responses are decoded leniently: malformed entries are dropped one by one
//! instead of failing the whole response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One calendar day of consumption
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Calendar day (local)
    pub date: NaiveDate,
    /// Non-negative consumption for the day (kWh)
    pub consumption: f64,
}

impl HistoryEntry {
    pub fn new(date: NaiveDate, consumption: f64) -> Self {
        Self { date, consumption }
    }
}

/// Wire shape of `eon_next/consumption_history`
#[derive(Debug, Clone, Deserialize)]
pub struct RawHistory {
    pub entries: Vec<Value>,
}

/// Sanitized history: ascending, unique dates, finite non-negative values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionHistory {
    pub entries: Vec<HistoryEntry>,
    /// Number of entries rejected while decoding
    pub dropped: usize,
}

impl From<RawHistory> for ConsumptionHistory {
    fn from(raw: RawHistory) -> Self {
        let total = raw.entries.len();
        let mut entries: Vec<HistoryEntry> = raw.entries.iter().filter_map(parse_entry).collect();

        // Stable sort keeps the first occurrence of a date ahead of later ones
        entries.sort_by_key(|e| e.date);
        entries.dedup_by_key(|e| e.date);

        let dropped = total - entries.len();
        if dropped > 0 {
            tracing::warn!(dropped, total, "Dropped malformed or duplicate history entries");
        }

        Self { entries, dropped }
    }
}

fn parse_entry(value: &Value) -> Option<HistoryEntry> {
    let date = value.get("date")?.as_str()?;
    let date = NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d").ok()?;
    let consumption = value.get("consumption")?.as_f64()?;

    if !consumption.is_finite() || consumption < 0.0 {
        return None;
    }

    Some(HistoryEntry { date, consumption })
}

//! Period - Aggregation Windows and Calendar Bucketing

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{
    LOOKBACK_DAYS_DAY, LOOKBACK_DAYS_MONTH, LOOKBACK_DAYS_WEEK, WINDOW_SPAN_MONTH,
    WINDOW_SPAN_WEEK,
};
use crate::domain::history::HistoryEntry;

/// Period mode selected for cost and consumption rollups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationWindow {
    /// Yesterday, the most recent complete day
    #[default]
    Day,
    /// The seven complete days before today
    Week,
    /// The thirty complete days before today
    Month,
}

impl AggregationWindow {
    pub const ALL: [AggregationWindow; 3] = [Self::Day, Self::Week, Self::Month];

    /// Days of history to request so the window plus one leading day is present
    pub fn lookback_days(self) -> u32 {
        match self {
            Self::Day => LOOKBACK_DAYS_DAY,
            Self::Week => LOOKBACK_DAYS_WEEK,
            Self::Month => LOOKBACK_DAYS_MONTH,
        }
    }

    /// Value carried by the period picker option
    pub fn picker_value(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    /// Inverse of [`picker_value`](Self::picker_value); unknown values select a month
    pub fn from_picker_value(value: u32) -> Self {
        match value {
            1 => Self::Day,
            7 => Self::Week,
            _ => Self::Month,
        }
    }

    /// Translation key of the picker label
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Day => "period-day",
            Self::Week => "period-week",
            Self::Month => "period-month",
        }
    }

    /// Select the entries that fall inside this window relative to `today`.
    /// Today itself is never included because its consumption is partial.
    pub fn bucket(self, entries: &[HistoryEntry], today: NaiveDate) -> Vec<HistoryEntry> {
        let Some(yesterday) = today.checked_sub_days(Days::new(1)) else {
            return Vec::new();
        };

        let start = match self {
            Self::Day => yesterday,
            Self::Week => days_before(today, WINDOW_SPAN_WEEK),
            Self::Month => days_before(today, WINDOW_SPAN_MONTH),
        };

        entries
            .iter()
            .filter(|e| e.date >= start && e.date < today)
            .copied()
            .collect()
    }
}

fn days_before(today: NaiveDate, span: u64) -> NaiveDate {
    today
        .checked_sub_days(Days::new(span))
        .unwrap_or(NaiveDate::MIN)
}

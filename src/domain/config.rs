//! Config - Dashboard Configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::DEFAULT_CURRENCY_SYMBOL;

/// Main dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Language tag for labels and dates (e.g. "en-GB"); system locale when absent
    pub locale: Option<String>,
    /// Dark chart palette
    pub dark_mode: bool,
    /// Symbol prefixed to cost figures
    pub currency_symbol: String,
    /// JSON fixture answering host commands in headless mode
    pub fixture: Option<PathBuf>,
    /// Simulated latency for every fixture response
    pub latency_ms: u64,
    /// Logging options
    pub log: LogConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: None,
            dark_mode: false,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            fixture: None,
            latency_ms: 0,
            log: LogConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Also write a daily rolling log file into the data directory
    pub to_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: false,
        }
    }
}

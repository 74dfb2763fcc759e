//! Dashboard Constants
//!
//! Centralized constants shared by the analytics engine, controllers and charts.

/// Days of history fetched for each aggregation window. One leading day more
/// than the window so the calendar boundary is always covered.
pub const LOOKBACK_DAYS_DAY: u32 = 2;
pub const LOOKBACK_DAYS_WEEK: u32 = 8;
pub const LOOKBACK_DAYS_MONTH: u32 = 31;

/// Calendar span of each window, counted back from today (exclusive)
pub const WINDOW_SPAN_WEEK: u64 = 7;
pub const WINDOW_SPAN_MONTH: u64 = 30;

/// History length behind the 7-day consumption bar chart
pub const CONSUMPTION_CHART_DAYS: u32 = 7;

/// Sparkline geometry (SVG user units)
pub const SPARKLINE_WIDTH: f64 = 100.0;
pub const SPARKLINE_HEIGHT: f64 = 30.0;
pub const SPARKLINE_PADDING: f64 = 2.0;

/// Axis id used by series plotted against the secondary scale
pub const SECONDARY_AXIS_ID: &str = "y2";

/// Bar corner radius for consumption bars
pub const BAR_BORDER_RADIUS: u32 = 4;

/// Placeholder shown for absent timestamps
pub const MISSING_VALUE: &str = "—";

/// Default currency symbol for cost figures
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "eon-dash.toml";

/// Upper bound on update passes the headless host runs before giving up
pub const MAX_SETTLE_PASSES: usize = 64;

//! Format - Date, Time and Money Formatting
//!
//! Pure functions, no state. Timestamps arrive as ISO-8601 strings from the host.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::constants::MISSING_VALUE;
use crate::i18n::Locale;

const DATE_TIME_FORMAT: &str = "%a %-d %b, %H:%M";
const DAY_LABEL_FORMAT: &str = "%A %-d %b";
const SHORT_DATE_FORMAT: &str = "%-d %b";
const WEEKDAY_SHORT_FORMAT: &str = "%a";

/// Parse an ISO-8601 timestamp into local time. Values without an offset are
/// taken as local wall-clock time; bare dates as local midnight.
pub fn parse_local(value: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local.from_local_datetime(&naive).earliest()
}

/// Format an ISO date-time for display in the user's local time zone.
/// Missing values render as a dash; unparseable values are shown as given.
pub fn format_date_time(value: Option<&str>, locale: Locale) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return MISSING_VALUE.to_string();
    };

    match parse_local(value) {
        Some(dt) => dt
            .format_localized(DATE_TIME_FORMAT, locale.chrono_locale())
            .to_string(),
        None => value.to_string(),
    }
}

/// Format an ISO date-time range for display
pub fn format_date_time_range(start: Option<&str>, end: Option<&str>, locale: Locale) -> String {
    let formatted_start = format_date_time(start, locale);
    match end.filter(|e| !e.is_empty()) {
        Some(end) => format!("{formatted_start} → {}", format_date_time(Some(end), locale)),
        None => formatted_start,
    }
}

fn format_date(date: NaiveDate, fmt: &str, locale: Locale) -> String {
    match date.and_hms_opt(0, 0, 0) {
        Some(midnight) => Utc
            .from_utc_datetime(&midnight)
            .format_localized(fmt, locale.chrono_locale())
            .to_string(),
        None => date.to_string(),
    }
}

/// Long label for a single day, e.g. "Friday 27 Feb"
pub fn format_day_label(date: NaiveDate, locale: Locale) -> String {
    format_date(date, DAY_LABEL_FORMAT, locale)
}

/// Short date, e.g. "21 Feb"
pub fn format_short_date(date: NaiveDate, locale: Locale) -> String {
    format_date(date, SHORT_DATE_FORMAT, locale)
}

/// Short weekday, e.g. "Sat"
pub fn format_weekday_short(date: NaiveDate, locale: Locale) -> String {
    format_date(date, WEEKDAY_SHORT_FORMAT, locale)
}

/// Short-date span, e.g. "21 Feb – 27 Feb"
pub fn format_date_span(first: NaiveDate, last: NaiveDate, locale: Locale) -> String {
    format!(
        "{} – {}",
        format_short_date(first, locale),
        format_short_date(last, locale)
    )
}

/// Money with two decimals, e.g. "£20.67"
pub fn format_money(value: f64, symbol: &str) -> String {
    format!("{symbol}{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).expect("valid date")
    }

    #[test]
    fn missing_values_render_dash() {
        assert_eq!(format_date_time(None, Locale::EnGB), "—");
        assert_eq!(format_date_time(Some(""), Locale::EnGB), "—");
    }

    #[test]
    fn invalid_values_pass_through() {
        assert_eq!(format_date_time(Some("tomorrow-ish"), Locale::EnGB), "tomorrow-ish");
    }

    #[test]
    fn naive_timestamps_are_local_wall_clock() {
        assert_eq!(
            format_date_time(Some("2026-02-28T14:05:00"), Locale::EnGB),
            "Sat 28 Feb, 14:05"
        );
    }

    #[test]
    fn ranges_join_with_arrow() {
        assert_eq!(
            format_date_time_range(Some("2026-02-28T01:00:00"), Some("2026-02-28T03:30:00"), Locale::EnGB),
            "Sat 28 Feb, 01:00 → Sat 28 Feb, 03:30"
        );
        assert_eq!(
            format_date_time_range(Some("2026-02-28T01:00:00"), None, Locale::EnGB),
            "Sat 28 Feb, 01:00"
        );
    }

    #[test]
    fn day_and_span_labels() {
        assert_eq!(format_day_label(date(2, 27), Locale::EnGB), "Friday 27 Feb");
        assert_eq!(format_date_span(date(2, 21), date(2, 27), Locale::EnGB), "21 Feb – 27 Feb");
        assert_eq!(format_weekday_short(date(2, 27), Locale::EnGB), "Fri");
    }

    #[test]
    fn day_label_is_localised() {
        assert_eq!(format_day_label(date(2, 27), Locale::De), "Freitag 27 Feb");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(20.67, "£"), "£20.67");
        assert_eq!(format_money(4.2, "€"), "€4.20");
    }
}

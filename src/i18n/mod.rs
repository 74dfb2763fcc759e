//! i18n - Internationalization Module
//!
//! Provides simple translation functions using HashMap-based lookups.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English (UK)
    #[default]
    EnGB,
    /// German
    De,
}

impl Locale {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::EnGB => "English",
            Locale::De => "Deutsch",
        }
    }

    /// Resolve a BCP-47 style tag ("en", "en-GB", "de_AT") to a supported
    /// locale. Unknown languages fall back to English.
    pub fn from_language_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "de" => Locale::De,
            _ => Locale::EnGB,
        }
    }

    /// Locale used for month and weekday names
    pub fn chrono_locale(&self) -> chrono::Locale {
        match self {
            Locale::EnGB => chrono::Locale::en_GB,
            Locale::De => chrono::Locale::de_DE,
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> =
    OnceLock::new();

/// Initialize translations (key -> (en, de))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // Period picker
    map.insert("period-day", ("Day", "Tag"));
    map.insert("period-week", ("Week", "Woche"));
    map.insert("period-month", ("Month", "Monat"));

    // Cost breakdown
    map.insert("segment-usage", ("Usage charges", "Verbrauchskosten"));
    map.insert("segment-standing", ("Standing charge", "Grundgebühr"));
    map.insert("breakdown-total", ("Total", "Gesamt"));
    map.insert("breakdown-usage", ("Usage", "Verbrauch"));
    map.insert("breakdown-standing", ("Standing", "Grundgebühr"));
    map.insert(
        "breakdown-no-tariff",
        (
            "No tariff data available for cost breakdown",
            "Keine Tarifdaten für die Kostenaufteilung verfügbar",
        ),
    );
    map.insert(
        "breakdown-no-data",
        (
            "No consumption data available for this period",
            "Keine Verbrauchsdaten für diesen Zeitraum verfügbar",
        ),
    );

    // Consumption and cost
    map.insert("consumption-title", ("Consumption", "Verbrauch"));
    map.insert("consumption-today", ("Today", "Heute"));
    map.insert("cost-today", ("Today (est)", "Heute (geschätzt)"));
    map.insert("cost-yesterday", ("Yesterday", "Gestern"));
    map.insert("cost-standing", ("Standing/day", "Grundgebühr/Tag"));
    map.insert("cost-unit-rate", ("Unit rate/kWh", "Arbeitspreis/kWh"));

    // Meter
    map.insert("meter-electricity", ("Electricity", "Strom"));
    map.insert("meter-gas", ("Gas", "Gas"));
    map.insert("meter-other", ("Meter", "Zähler"));
    map.insert("meter-trend", ("Trend", "Verlauf"));
    map.insert("meter-latest-reading", ("Latest reading", "Letzter Zählerstand"));
    map.insert("meter-date", ("Date", "Datum"));
    map.insert("meter-tariff", ("Tariff", "Tarif"));

    // EV schedule
    map.insert("schedule-title", ("Schedule", "Zeitplan"));
    map.insert("schedule-active", ("Active", "Aktiv"));
    map.insert("schedule-idle", ("Idle", "Inaktiv"));
    map.insert("schedule-loading", ("Loading EV schedule…", "Ladeplan wird geladen…"));
    map.insert("schedule-error", ("Unable to load schedule", "Zeitplan konnte nicht geladen werden"));
    map.insert("schedule-none", ("No schedule data", "Keine Zeitplandaten"));
    map.insert("schedule-no-slots", ("No upcoming charge slots", "Keine anstehenden Ladefenster"));

    // Backfill
    map.insert("backfill-title", ("Historical Backfill", "Historischer Import"));
    map.insert("backfill-loading", ("Loading status…", "Status wird geladen…"));
    map.insert("backfill-error", ("Failed to load backfill status.", "Importstatus konnte nicht geladen werden."));
    map.insert("backfill-none", ("No backfill status available.", "Kein Importstatus verfügbar."));
    map.insert(
        "backfill-disabled",
        (
            "Backfill is disabled. Enable it in the integration options.",
            "Der Import ist deaktiviert. Aktivieren Sie ihn in den Integrationsoptionen.",
        ),
    );
    map.insert("backfill-progress", ("Progress", "Fortschritt"));
    map.insert("backfill-meters", ("{done} / {total} meters ({pct}%)", "{done} / {total} Zähler ({pct}%)"));
    map.insert("backfill-lookback", ("Lookback", "Zeitraum"));
    map.insert("backfill-days", ("{days} days", "{days} Tage"));
    map.insert("backfill-next", ("Next backfill from", "Nächster Import ab"));
    map.insert("backfill-complete", ("Complete", "Abgeschlossen"));

    // Summary
    map.insert("summary-loading", ("Loading…", "Wird geladen…"));
    map.insert("summary-error", ("Failed to load dashboard", "Dashboard konnte nicht geladen werden"));
    map.insert("summary-empty", ("No meters found", "Keine Zähler gefunden"));
    map.insert("chart-loading", ("Loading chart…", "Diagramm wird geladen…"));
    map.insert(
        "version-mismatch",
        (
            "Version mismatch: frontend v{frontend}, backend v{backend}. Try clearing your browser cache or restarting Home Assistant.",
            "Versionskonflikt: Frontend v{frontend}, Backend v{backend}. Browser-Cache leeren oder Home Assistant neu starten.",
        ),
    );

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> String {
    if let Some(&(en, de)) = translations().get(key) {
        match locale {
            Locale::EnGB => en.to_string(),
            Locale::De => de.to_string(),
        }
    } else {
        // Fallback: return the key itself
        key.to_string()
    }
}

/// Translate a key and substitute `{name}` placeholders
///
/// # Example
/// ```ignore
/// // With translation "backfill-days" = "{days} days"
/// t_format(Locale::EnGB, "backfill-days", &[("days", "30")])
/// // Returns "30 days"
/// ```
pub fn t_format(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(locale, key);

    for (name, value) in args {
        result = result.replace(&format!("{{{name}}}"), value);
    }

    result
}

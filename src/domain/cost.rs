//! Cost - Derived Totals for an Aggregation Window

use crate::domain::history::HistoryEntry;
use crate::domain::meter::MeterKind;
use crate::theme::colors::ChartColors;

/// Round to two decimal places, half-up on the cent value
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Which charge a pie segment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Usage,
    Standing,
}

impl SegmentKind {
    /// Translation key of the segment label
    pub fn label_key(self) -> &'static str {
        match self {
            SegmentKind::Usage => "segment-usage",
            SegmentKind::Standing => "segment-standing",
        }
    }
}

/// One slice of the cost breakdown chart
#[derive(Debug, Clone, PartialEq)]
pub struct CostSegment {
    pub kind: SegmentKind,
    pub value: f64,
    pub color: &'static str,
}

/// Cost totals for the entries of one window
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTotals {
    /// Summed consumption (kWh)
    pub consumption: f64,
    /// Days that contributed to the window
    pub days: usize,
    pub consumption_cost: f64,
    pub standing_cost: f64,
    pub total_cost: f64,
    /// Empty unless the total is positive
    pub segments: Vec<CostSegment>,
}

impl DerivedTotals {
    /// Pure derivation from the bucketed entries and the tariff
    pub fn derive(
        entries: &[HistoryEntry],
        unit_rate: f64,
        standing_charge: Option<f64>,
        kind: MeterKind,
    ) -> Self {
        let consumption: f64 = entries.iter().map(|e| e.consumption).sum();
        let days = entries.len();

        let consumption_cost = round2(consumption * unit_rate);
        let standing_cost = round2(days as f64 * standing_charge.unwrap_or(0.0));
        let total_cost = round2(consumption_cost + standing_cost);

        let segments = if total_cost > 0.0 {
            vec![
                CostSegment {
                    kind: SegmentKind::Usage,
                    value: consumption_cost,
                    color: ChartColors::consumption(kind),
                },
                CostSegment {
                    kind: SegmentKind::Standing,
                    value: standing_cost,
                    color: ChartColors::STANDING,
                },
            ]
        } else {
            Vec::new()
        };

        Self {
            consumption,
            days,
            consumption_cost,
            standing_cost,
            total_cost,
            segments,
        }
    }

    /// Share of the total taken by `value`, in percent with one decimal
    pub fn share_percent(&self, value: f64) -> f64 {
        if self.total_cost > 0.0 {
            (value / self.total_cost * 1000.0).round() / 10.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week_entries() -> Vec<HistoryEntry> {
        let values = [9.12, 10.4, 8.95, 9.6, 10.06, 10.1, 8.72];
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let date = NaiveDate::from_ymd_opt(2026, 2, 21 + i as u32).expect("valid date");
                HistoryEntry::new(date, *v)
            })
            .collect()
    }

    #[test]
    fn round2_is_half_up_on_cents() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(16.396_055), 16.4);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn round2_is_idempotent() {
        for x in [0.0, 0.005, 1.015, 3.14159, 16.396_055, 4.270_000_000_000_001, 99.995, 1234.5678] {
            assert_eq!(round2(round2(x)), round2(x), "round2 not idempotent for {x}");
        }
    }

    #[test]
    fn week_scenario_totals() {
        let totals = DerivedTotals::derive(&week_entries(), 0.2449, Some(0.61), MeterKind::Electricity);

        assert!((totals.consumption - 66.95).abs() < 1e-9);
        assert_eq!(totals.days, 7);
        assert_eq!(totals.consumption_cost, round2(66.95 * 0.2449));
        assert_eq!(totals.standing_cost, 4.27);
        assert_eq!(totals.total_cost, round2(totals.consumption_cost + totals.standing_cost));
        assert_eq!(totals.total_cost, 20.67);
        assert_eq!(totals.segments.len(), 2);
        assert_eq!(totals.segments[0].color, ChartColors::CONSUMPTION_ELECTRICITY);
    }

    #[test]
    fn gas_usage_segment_uses_gas_colour() {
        let totals = DerivedTotals::derive(&week_entries(), 0.06, None, MeterKind::Gas);
        assert_eq!(totals.standing_cost, 0.0);
        assert_eq!(totals.segments[0].color, ChartColors::CONSUMPTION_GAS);
    }

    #[test]
    fn zero_total_has_no_segments() {
        let totals = DerivedTotals::derive(&[], 0.25, Some(0.5), MeterKind::Electricity);
        assert_eq!(totals.total_cost, 0.0);
        assert!(totals.segments.is_empty());
        assert_eq!(totals.share_percent(1.0), 0.0);
    }

    #[test]
    fn share_percent_has_one_decimal() {
        let totals = DerivedTotals::derive(&week_entries(), 0.2449, Some(0.61), MeterKind::Electricity);
        assert_eq!(totals.share_percent(totals.standing_cost), 20.7);
    }
}

//! Colors - Chart and Series Colors

use crate::domain::meter::MeterKind;

/// Chart palette - series colours are constants, scale colours depend on mode
pub struct ChartColors;

impl ChartColors {
    // Series colors
    /// Electricity consumption - Light blue
    pub const CONSUMPTION_ELECTRICITY: &'static str = "rgba(3, 169, 244, 0.85)";
    /// Gas consumption - Orange
    pub const CONSUMPTION_GAS: &'static str = "rgba(255, 152, 0, 0.85)";
    /// Standing charge - Purple
    pub const STANDING: &'static str = "rgba(156, 39, 176, 0.75)";
    /// Electricity bars - Light blue, lighter fill
    pub const BAR_ELECTRICITY: &'static str = "rgba(3, 169, 244, 0.7)";
    /// Gas bars - Orange, lighter fill
    pub const BAR_GAS: &'static str = "rgba(255, 152, 0, 0.7)";
    /// Sparkline stroke default
    pub const SPARKLINE: &'static str = "var(--eon-primary)";

    /// Usage colour for the breakdown chart
    pub fn consumption(kind: MeterKind) -> &'static str {
        match kind {
            MeterKind::Gas => Self::CONSUMPTION_GAS,
            _ => Self::CONSUMPTION_ELECTRICITY,
        }
    }

    /// Bar colour for the consumption chart
    pub fn bar(kind: MeterKind) -> &'static str {
        match kind {
            MeterKind::Gas => Self::BAR_GAS,
            _ => Self::BAR_ELECTRICITY,
        }
    }
}

/// Scale and tooltip colours for one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub text: &'static str,
    pub grid: &'static str,
    pub tooltip_bg: &'static str,
    pub tooltip_title: &'static str,
    pub tooltip_body: &'static str,
    pub tooltip_border: &'static str,
}

impl ChartPalette {
    pub const LIGHT: ChartPalette = ChartPalette {
        text: "#212121",
        grid: "#e0e0e0",
        tooltip_bg: "#fff",
        tooltip_title: "#212121",
        tooltip_body: "#424242",
        tooltip_border: "#e0e0e0",
    };

    pub const DARK: ChartPalette = ChartPalette {
        text: "#e1e1e1",
        grid: "#3c3c3c",
        tooltip_bg: "#424242",
        tooltip_title: "#e1e1e1",
        tooltip_body: "#bdbdbd",
        tooltip_border: "#616161",
    };

    /// Palette for the given mode
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }
}

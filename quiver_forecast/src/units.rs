/// Unit conversion and display formatting helpers.
///
/// Every helper here accepts possibly-missing or malformed input and answers
/// with `None` (or a placeholder string) instead of panicking, so that a gap in
/// the upstream data degrades to an "N/A" cell rather than a crash.

use serde::{Deserialize, Serialize};

/// Feet per metre.
pub const FEET_PER_METER: f64 = 3.28084;

/// Km/h per m/s.
pub const KMH_PER_MS: f64 = 3.6;

/// Placeholder shown for a missing value in compact table cells.
pub const MISSING_DASH: &str = "—";

/// Placeholder shown for a missing value on the dashboard cards.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Unit toggles
// ---------------------------------------------------------------------------

/// Wave height unit selected in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "ft")]
    Feet,
}

/// Temperature unit selected in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl HeightUnit {
    pub fn label(&self) -> &'static str {
        match self {
            HeightUnit::Meters => "m",
            HeightUnit::Feet => "ft",
        }
    }
}

impl TempUnit {
    pub fn label(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Converts metres to feet.
pub fn to_feet(meters: f64) -> Option<f64> {
    finite(meters).map(|m| m * FEET_PER_METER)
}

/// Converts feet to metres.
pub fn to_meters(feet: f64) -> Option<f64> {
    finite(feet).map(|ft| ft / FEET_PER_METER)
}

/// Converts metres per second to kilometres per hour.
pub fn to_kmh(ms: f64) -> Option<f64> {
    finite(ms).map(|v| v * KMH_PER_MS)
}

/// Rounds a wind speed that is already in km/h (Open-Meteo's default) for
/// display, or returns the dash placeholder when missing.
pub fn wind_speed_kph(wind_speed: Option<f64>) -> String {
    match wind_speed.and_then(finite) {
        Some(v) => format!("{}", v.round()),
        None => MISSING_DASH.to_string(),
    }
}

/// Converts a Celsius reading to the selected unit with one decimal.
pub fn convert_temp(temp_c: Option<f64>, unit: TempUnit) -> Option<String> {
    let temp_c = temp_c.and_then(finite)?;
    let value = match unit {
        TempUnit::Celsius => temp_c,
        TempUnit::Fahrenheit => temp_c * 9.0 / 5.0 + 32.0,
    };
    Some(format!("{:.1}", value))
}

/// Converts a wave height in metres to the selected unit with one decimal.
pub fn convert_height(height_m: Option<f64>, unit: HeightUnit) -> Option<String> {
    let height_m = height_m.and_then(finite)?;
    let value = match unit {
        HeightUnit::Meters => height_m,
        HeightUnit::Feet => height_m * FEET_PER_METER,
    };
    Some(format!("{:.1}", value))
}

/// Formats an optional value with a fixed number of decimals and a suffix,
/// falling back to "N/A".
pub fn format_value(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value.and_then(finite) {
        Some(v) => format!("{:.*}{}", decimals, v, suffix),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Rounds to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Core data types for the Quiver surf forecast.
///
/// This module defines the shared domain model imported by all other modules:
/// the raw Open-Meteo series, the per-hour display slots, the reading fed to
/// the wave quality scorer, and the crate error type.
/// It contains no logic beyond small accessors, and no I/O.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw hourly/daily series
// ---------------------------------------------------------------------------

/// Hourly block of an Open-Meteo marine response.
///
/// Arrays are parallel: index `i` of every field belongs to `time[i]`.
/// Any array may be shorter than `time` or contain nulls; both read as
/// "no data" through [`value_at`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarineSeries {
    #[serde(default)]
    pub time: Vec<String>, // local ISO 8601, e.g. "2025-06-08T06:00"
    #[serde(default)]
    pub sea_surface_temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub wave_height: Vec<Option<f64>>, // metres
    #[serde(default)]
    pub wave_period: Vec<Option<f64>>, // seconds
    #[serde(default)]
    pub wave_direction: Vec<Option<f64>>, // degrees
}

/// Hourly block of an Open-Meteo forecast (atmospheric) response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>, // °C
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>, // km/h
    #[serde(default)]
    pub wind_direction_10m: Vec<Option<f64>>, // degrees
}

/// Daily block of an Open-Meteo forecast response requested for sun data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunSeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
    #[serde(default)]
    pub uv_index_max: Vec<Option<f64>>,
}

impl MarineSeries {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl WeatherSeries {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl SunSeries {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Reads index `i` of a parallel array, treating out-of-range, null and
/// non-finite entries alike as missing.
pub fn value_at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Display slots
// ---------------------------------------------------------------------------

/// One hour of a forecast day, combining marine and atmospheric readings.
///
/// Marine fields come from the marine series; the atmospheric fields are
/// `None` when the weather series has no entry for the same timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySlot {
    pub time: String, // "HH:MM"
    pub wave_height: Option<f64>, // metres, rounded to 0.1
    pub period: Option<f64>,
    pub wave_direction: Option<f64>,
    pub air_temp: Option<f64>,
    pub wind_speed: Option<f64>, // km/h
    pub wind_direction: Option<f64>,
}

impl HourlySlot {
    /// Hour of day parsed from `time`, if well formed.
    pub fn hour(&self) -> Option<u32> {
        self.time.split(':').next()?.parse().ok()
    }
}

/// All display slots of a single calendar day with its wave height range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAggregate {
    pub date: chrono::NaiveDate,
    pub slots: Vec<HourlySlot>,
    pub max_wave_height: Option<f64>,
    pub min_wave_height: Option<f64>,
}

/// Peak wave height of one day, as plotted on the multi-day chart.
///
/// Serializes as `{"day": "2025-06-08", "wave": "3.40"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPeak {
    pub day: String,  // "YYYY-MM-DD"
    pub wave: String, // metres, always two decimals
}

impl DailyPeak {
    pub fn new(day: String, wave_m: f64) -> Self {
        DailyPeak {
            day,
            wave: format!("{:.2}", wave_m),
        }
    }
}

/// Conditions for the current hour, shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub water_temp: Option<f64>,
    pub air_temp: Option<f64>,
    pub wave_height: Option<f64>,
    pub wave_period: Option<f64>,
    pub wave_direction: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub uv_index: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

// ---------------------------------------------------------------------------
// Scorer input
// ---------------------------------------------------------------------------

/// Tide state at the time of a reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideState {
    /// At or near a turning point.
    Slack,
    /// Actively rising or falling.
    #[default]
    Moving,
    /// No tide information; scores neutrally.
    Unknown,
}

impl std::fmt::Display for TideState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TideState::Slack => write!(f, "slack"),
            TideState::Moving => write!(f, "moving"),
            TideState::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single point-in-time observation fed to the wave quality scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionReading {
    pub swell_height_m: f64,
    pub swell_period_s: f64,
    pub swell_direction_deg: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    #[serde(default)]
    pub tide_state: TideState,
}

impl ConditionReading {
    /// Builds a reading from a display slot. Missing fields contribute zero.
    pub fn from_slot(slot: &HourlySlot, tide_state: TideState) -> Self {
        let or_zero = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);
        ConditionReading {
            swell_height_m: or_zero(slot.wave_height),
            swell_period_s: or_zero(slot.period),
            swell_direction_deg: or_zero(slot.wave_direction),
            wind_speed_kmh: or_zero(slot.wind_speed),
            wind_direction_deg: or_zero(slot.wind_direction),
            tide_state,
        }
    }

    /// Copy of this reading with every non-finite number replaced by zero.
    pub fn sanitized(&self) -> Self {
        let fix = |v: f64| if v.is_finite() { v } else { 0.0 };
        ConditionReading {
            swell_height_m: fix(self.swell_height_m),
            swell_period_s: fix(self.swell_period_s),
            swell_direction_deg: fix(self.swell_direction_deg),
            wind_speed_kmh: fix(self.wind_speed_kmh),
            wind_direction_deg: fix(self.wind_direction_deg),
            tide_state: self.tide_state,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading spots, fetching Open-Meteo data, or
/// scoring against the spot registry.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Scoring was requested for a spot name missing from the registry.
    SpotNotFound(String),
    /// Non-2xx HTTP response from an upstream API.
    HttpError(u16),
    /// The request never produced a response (DNS, TLS, connection reset).
    RequestFailed(String),
    /// A response body or config file could not be deserialized.
    ParseError(String),
    /// An environment value or config file was unusable.
    ConfigError(String),
}

impl std::fmt::Display for ForecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastError::SpotNotFound(name) => write!(f, "Spot '{}' not found in the registry", name),
            ForecastError::HttpError(code) => write!(f, "HTTP error: {}", code),
            ForecastError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            ForecastError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ForecastError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for ForecastError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

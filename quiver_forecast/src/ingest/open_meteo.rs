/// Open-Meteo API Client
///
/// Retrieves the three upstream series behind a spot forecast:
/// - marine hourly (sea surface temperature, wave height/period/direction)
/// - weather hourly (air temperature, 10 m wind speed/direction)
/// - sun daily (sunrise, sunset, max UV index)
///
/// All requests ask for `timezone=auto`, so timestamps come back as naive
/// local times at the spot.
///
/// API Documentation: https://open-meteo.com/en/docs/marine-weather-api
/// Forecast API: https://open-meteo.com/en/docs

use std::thread;

use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::logging::{self, DataSource};
use crate::model::{ForecastError, MarineSeries, SunSeries, WeatherSeries};
use crate::spots::SpotLocation;

pub const MARINE_BASE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";
pub const FORECAST_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

const MARINE_HOURLY_FIELDS: &str = "sea_surface_temperature,wave_height,wave_period,wave_direction";
const WEATHER_HOURLY_FIELDS: &str = "temperature_2m,wind_speed_10m,wind_direction_10m";
const SUN_DAILY_FIELDS: &str = "sunrise,sunset,uv_index_max";

/// Number of upstream requests behind one spot forecast.
const SOURCES_PER_FORECAST: usize = 3;

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct HourlyResponse<T> {
    hourly: T,
}

#[derive(Debug, Deserialize)]
struct DailyResponse<T> {
    daily: T,
}

/// Body Open-Meteo sends with a 4xx, e.g. for coordinates on land.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    reason: String,
}

/// Everything fetched for one spot.
///
/// A source that failed is present as an empty series, with the cause
/// recorded in `failures`.
#[derive(Debug, Clone)]
pub struct SpotForecast {
    pub location: SpotLocation,
    pub marine: MarineSeries,
    pub weather: WeatherSeries,
    pub sun: SunSeries,
    pub failures: Vec<(DataSource, ForecastError)>,
}

impl SpotForecast {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// ============================================================================
// URL Builders
// ============================================================================

/// Marine hourly request for a point.
pub fn build_marine_url(base_url: &str, latitude: f64, longitude: f64) -> String {
    format!(
        "{}?latitude={}&longitude={}&hourly={}&timezone=auto",
        base_url, latitude, longitude, MARINE_HOURLY_FIELDS
    )
}

/// Weather hourly request for a point, `forecast_days` ahead.
pub fn build_weather_url(base_url: &str, latitude: f64, longitude: f64, forecast_days: u32) -> String {
    format!(
        "{}?latitude={}&longitude={}&hourly={}&forecast_days={}&timezone=auto",
        base_url, latitude, longitude, WEATHER_HOURLY_FIELDS, forecast_days
    )
}

/// Sun daily request for a point.
pub fn build_sun_url(base_url: &str, latitude: f64, longitude: f64) -> String {
    format!(
        "{}?latitude={}&longitude={}&daily={}&timezone=auto",
        base_url, latitude, longitude, SUN_DAILY_FIELDS
    )
}

// ============================================================================
// Response Parsers
// ============================================================================

pub fn parse_marine_response(body: &str) -> Result<MarineSeries, ForecastError> {
    let response: HourlyResponse<MarineSeries> = serde_json::from_str(body)
        .map_err(|e| ForecastError::ParseError(format!("marine response: {}", e)))?;
    Ok(response.hourly)
}

pub fn parse_weather_response(body: &str) -> Result<WeatherSeries, ForecastError> {
    let response: HourlyResponse<WeatherSeries> = serde_json::from_str(body)
        .map_err(|e| ForecastError::ParseError(format!("weather response: {}", e)))?;
    Ok(response.hourly)
}

pub fn parse_sun_response(body: &str) -> Result<SunSeries, ForecastError> {
    let response: DailyResponse<SunSeries> = serde_json::from_str(body)
        .map_err(|e| ForecastError::ParseError(format!("sun response: {}", e)))?;
    Ok(response.daily)
}

// ============================================================================
// API Client
// ============================================================================

/// Blocking Open-Meteo client. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: reqwest::blocking::Client,
    marine_url: String,
    forecast_url: String,
    forecast_days: u32,
}

impl OpenMeteoClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ForecastError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ForecastError::ConfigError(format!("cannot build HTTP client: {}", e)))?;

        Ok(OpenMeteoClient {
            http,
            marine_url: config.marine_url.clone(),
            forecast_url: config.forecast_url.clone(),
            forecast_days: config.forecast_days,
        })
    }

    pub fn fetch_marine(&self, location: &SpotLocation) -> Result<MarineSeries, ForecastError> {
        let url = build_marine_url(&self.marine_url, location.latitude, location.longitude);
        let body = self.get_body(DataSource::Marine, location, &url)?;
        parse_marine_response(&body)
    }

    pub fn fetch_weather(&self, location: &SpotLocation) -> Result<WeatherSeries, ForecastError> {
        let url = build_weather_url(&self.forecast_url, location.latitude, location.longitude, self.forecast_days);
        let body = self.get_body(DataSource::Weather, location, &url)?;
        parse_weather_response(&body)
    }

    pub fn fetch_sun(&self, location: &SpotLocation) -> Result<SunSeries, ForecastError> {
        let url = build_sun_url(&self.forecast_url, location.latitude, location.longitude);
        let body = self.get_body(DataSource::Sun, location, &url)?;
        parse_sun_response(&body)
    }

    /// Fetches marine, weather and sun data concurrently.
    ///
    /// Waits for all three requests whatever their outcome. Each failure is
    /// logged and replaced by an empty series; nothing is retried.
    pub fn fetch_spot_forecast(&self, location: &SpotLocation) -> SpotForecast {
        logging::info(DataSource::System, Some(location.name), "Fetching forecast");

        let (marine, weather, sun) = thread::scope(|scope| {
            let marine = scope.spawn(|| self.fetch_marine(location));
            let weather = scope.spawn(|| self.fetch_weather(location));
            let sun = scope.spawn(|| self.fetch_sun(location));
            (join_fetch(marine), join_fetch(weather), join_fetch(sun))
        });

        let mut failures = Vec::new();
        let marine = settle(DataSource::Marine, location, "marine fetch", marine, &mut failures);
        let weather = settle(DataSource::Weather, location, "weather fetch", weather, &mut failures);
        let sun = settle(DataSource::Sun, location, "sun fetch", sun, &mut failures);

        logging::log_fetch_summary(location.name, SOURCES_PER_FORECAST, SOURCES_PER_FORECAST - failures.len());

        SpotForecast {
            location: *location,
            marine,
            weather,
            sun,
            failures,
        }
    }

    fn get_body(&self, source: DataSource, location: &SpotLocation, url: &str) -> Result<String, ForecastError> {
        logging::debug(source, Some(location.name), &format!("GET {}", url));

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ForecastError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if let Some(reason) = response
                .text()
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
            {
                logging::debug(source, Some(location.name), &format!("Open-Meteo says: {}", reason.reason));
            }
            return Err(ForecastError::HttpError(status.as_u16()));
        }

        response
            .text()
            .map_err(|e| ForecastError::RequestFailed(format!("reading body: {}", e)))
    }
}

fn join_fetch<T>(handle: thread::ScopedJoinHandle<'_, Result<T, ForecastError>>) -> Result<T, ForecastError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(ForecastError::RequestFailed("fetch thread panicked".to_string())))
}

/// Unwraps a settled fetch, recording and logging a failure.
fn settle<T: Default>(
    source: DataSource,
    location: &SpotLocation,
    operation: &str,
    result: Result<T, ForecastError>,
    failures: &mut Vec<(DataSource, ForecastError)>,
) -> T {
    match result {
        Ok(series) => series,
        Err(e) => {
            logging::log_fetch_failure(source, location.name, operation, &e);
            failures.push((source, e));
            T::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

/// Runtime configuration for the forecast service
///
/// Every setting comes from a `QUIVER_*` environment variable, optionally
/// seeded from a `.env` file in the working directory. Unset variables fall
/// back to the public Open-Meteo endpoints and console-only logging.
///
/// | Variable                   | Default                                     |
/// |----------------------------|---------------------------------------------|
/// | `QUIVER_LOG_LEVEL`         | `info`                                      |
/// | `QUIVER_LOG_FILE`          | unset (console only)                        |
/// | `QUIVER_LOG_TIMESTAMPS`    | `false`                                     |
/// | `QUIVER_SPOTS_FILE`        | unset (built-in spot registry)              |
/// | `QUIVER_MARINE_URL`        | `https://marine-api.open-meteo.com/v1/marine` |
/// | `QUIVER_FORECAST_URL`      | `https://api.open-meteo.com/v1/forecast`    |
/// | `QUIVER_FORECAST_DAYS`     | `7`                                         |
/// | `QUIVER_HTTP_TIMEOUT_SECS` | `30`                                        |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::ingest::open_meteo::{DEFAULT_FORECAST_DAYS, FORECAST_BASE_URL, MARINE_BASE_URL};
use crate::logging::LogLevel;
use crate::model::ForecastError;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// Open-Meteo serves at most 16 days of hourly forecast.
const MAX_FORECAST_DAYS: u32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub log_level: LogLevel,
    pub log_file: Option<String>,
    pub log_timestamps: bool,
    pub spots_file: Option<PathBuf>,
    pub marine_url: String,
    pub forecast_url: String,
    pub forecast_days: u32,
    pub http_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            log_level: LogLevel::Info,
            log_file: None,
            log_timestamps: false,
            spots_file: None,
            marine_url: MARINE_BASE_URL.to_string(),
            forecast_url: FORECAST_BASE_URL.to_string(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ForecastError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ForecastError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = ServiceConfig::default();

        if let Some(level) = get("QUIVER_LOG_LEVEL") {
            config.log_level = level.parse()?;
        }
        config.log_file = get("QUIVER_LOG_FILE");
        if let Some(flag) = get("QUIVER_LOG_TIMESTAMPS") {
            config.log_timestamps = parse_flag("QUIVER_LOG_TIMESTAMPS", &flag)?;
        }
        config.spots_file = get("QUIVER_SPOTS_FILE").map(PathBuf::from);
        if let Some(url) = get("QUIVER_MARINE_URL") {
            config.marine_url = url;
        }
        if let Some(url) = get("QUIVER_FORECAST_URL") {
            config.forecast_url = url;
        }
        if let Some(days) = get("QUIVER_FORECAST_DAYS") {
            let days: u32 = parse_number("QUIVER_FORECAST_DAYS", &days)?;
            if !(1..=MAX_FORECAST_DAYS).contains(&days) {
                return Err(ForecastError::ConfigError(format!(
                    "QUIVER_FORECAST_DAYS must be between 1 and {}, got {}",
                    MAX_FORECAST_DAYS, days
                )));
            }
            config.forecast_days = days;
        }
        if let Some(secs) = get("QUIVER_HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse_number("QUIVER_HTTP_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(ForecastError::ConfigError(
                    "QUIVER_HTTP_TIMEOUT_SECS must be positive".to_string(),
                ));
            }
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ForecastError> {
    value
        .parse()
        .map_err(|_| ForecastError::ConfigError(format!("{} is not a valid number: '{}'", key, value)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ForecastError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ForecastError::ConfigError(format!("{} is not a valid flag: '{}'", key, value))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServiceConfig, ForecastError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.marine_url, "https://marine-api.open-meteo.com/v1/marine");
        assert_eq!(config.forecast_days, 7);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_all_variables_applied() {
        let config = config_from(&[
            ("QUIVER_LOG_LEVEL", "debug"),
            ("QUIVER_LOG_FILE", "/tmp/quiver.log"),
            ("QUIVER_LOG_TIMESTAMPS", "yes"),
            ("QUIVER_SPOTS_FILE", "spots.toml"),
            ("QUIVER_MARINE_URL", "http://localhost:8080/marine"),
            ("QUIVER_FORECAST_URL", "http://localhost:8080/forecast"),
            ("QUIVER_FORECAST_DAYS", "3"),
            ("QUIVER_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/quiver.log"));
        assert!(config.log_timestamps);
        assert_eq!(config.spots_file, Some(PathBuf::from("spots.toml")));
        assert_eq!(config.marine_url, "http://localhost:8080/marine");
        assert_eq!(config.forecast_url, "http://localhost:8080/forecast");
        assert_eq!(config.forecast_days, 3);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("QUIVER_LOG_FILE", "  "), ("QUIVER_FORECAST_DAYS", "")]).unwrap();
        assert_eq!(config.log_file, None);
        assert_eq!(config.forecast_days, DEFAULT_FORECAST_DAYS);
    }

    #[test]
    fn test_bad_number_is_config_error() {
        let err = config_from(&[("QUIVER_HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, ForecastError::ConfigError(_)));
        assert!(err.to_string().contains("QUIVER_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_forecast_days_out_of_range() {
        assert!(config_from(&[("QUIVER_FORECAST_DAYS", "0")]).is_err());
        assert!(config_from(&[("QUIVER_FORECAST_DAYS", "17")]).is_err());
        assert!(config_from(&[("QUIVER_FORECAST_DAYS", "16")]).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(config_from(&[("QUIVER_HTTP_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_unknown_log_level_and_flag_rejected() {
        assert!(config_from(&[("QUIVER_LOG_LEVEL", "verbose")]).is_err());
        assert!(config_from(&[("QUIVER_LOG_TIMESTAMPS", "maybe")]).is_err());
    }
}

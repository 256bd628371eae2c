/// Structured logging for the forecast service
///
/// Provides context-rich logging with spot identifiers, upstream source
/// tags, timestamps, and severity levels. Supports both console output
/// and file-based logging for long-running use.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::ForecastError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(ForecastError::ConfigError(format!("unknown log level '{}'", other))),
        }
    }
}

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Marine,
    Weather,
    Sun,
    Scoring,
    Config,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Marine => write!(f, "MARINE"),
            DataSource::Weather => write!(f, "WEATHER"),
            DataSource::Sun => write!(f, "SUN"),
            DataSource::Scoring => write!(f, "SCORE"),
            DataSource::Config => write!(f, "CFG"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the provider has no coverage for this location
    Expected,
    /// Unexpected failure - indicates service degradation or a client bug
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn format_entry(level: LogLevel, source: DataSource, spot: Option<&str>, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let spot_part = spot.map(|s| format!(" [{}]", s)).unwrap_or_default();
        format!("{} {} {}{}: {}", timestamp, level, source, spot_part, message)
    }

    fn log(&self, level: LogLevel, source: DataSource, spot: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, source, spot, message);
        let spot_part = spot.map(|s| format!(" [{}]", s)).unwrap_or_default();

        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, spot_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, spot_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, source: DataSource, spot: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, source, spot, message);
        }
    }
}

/// Log a general informational message
pub fn info(source: DataSource, spot: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, source, spot, message);
}

/// Log a warning message
pub fn warn(source: DataSource, spot: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, source, spot, message);
}

/// Log an error message
pub fn error(source: DataSource, spot: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, source, spot, message);
}

/// Log a debug message
pub fn debug(source: DataSource, spot: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, source, spot, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify an upstream fetch failure from its error text.
///
/// Open-Meteo answers 400 for coordinates outside marine model coverage,
/// which is a property of the spot, not an outage.
pub fn classify_fetch_failure(error_message: &str) -> FailureType {
    if error_message.contains("HTTP error: 400") {
        FailureType::Expected
    } else if error_message.contains("HTTP error") || error_message.contains("timed out") {
        FailureType::Unexpected
    } else if error_message.contains("Parse error") {
        // Schema drift on the provider side
        FailureType::Unexpected
    } else {
        FailureType::Unknown
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a fetch failure with automatic classification
pub fn log_fetch_failure(source: DataSource, spot: &str, operation: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_fetch_failure(&error_msg);

    let message = format!("{} failed [{}]: {}", operation, failure_type, error_msg);

    match failure_type {
        FailureType::Expected => debug(source, Some(spot), &message),
        FailureType::Unexpected => error(source, Some(spot), &message),
        FailureType::Unknown => warn(source, Some(spot), &message),
    }
}

// ---------------------------------------------------------------------------
// Fetch Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of one forecast fan-out
pub fn log_fetch_summary(spot: &str, total: usize, successful: usize) {
    let failed = total.saturating_sub(successful);
    let message = format!(
        "Forecast fetch complete: {}/{} sources successful, {} failed",
        successful, total, failed
    );

    if failed == 0 {
        info(DataSource::System, Some(spot), &message);
    } else if successful == 0 {
        error(DataSource::System, Some(spot), &message);
    } else {
        warn(DataSource::System, Some(spot), &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parses_case_insensitively() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(classify_fetch_failure("HTTP error: 400"), FailureType::Expected);
        assert_eq!(classify_fetch_failure("HTTP error: 503"), FailureType::Unexpected);
        assert_eq!(
            classify_fetch_failure("Parse error: missing field `hourly`"),
            FailureType::Unexpected
        );
        assert_eq!(
            classify_fetch_failure("Request failed: connection reset"),
            FailureType::Unknown
        );
    }

    #[test]
    fn test_entry_format_includes_source_and_spot() {
        let entry = Logger::format_entry(LogLevel::Warning, DataSource::Marine, Some("Nitzanim"), "slow");
        assert!(entry.ends_with("WARN MARINE [Nitzanim]: slow"), "got '{}'", entry);
    }

    #[test]
    fn test_file_logging_appends_entries() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("quiver.log");
        let logger = Logger {
            min_level: LogLevel::Info,
            log_file: Some(path.to_string_lossy().into_owned()),
            console_timestamps: true,
        };
        logger.log(LogLevel::Debug, DataSource::System, None, "filtered out");
        logger.log(LogLevel::Info, DataSource::System, None, "first");
        logger.log(LogLevel::Error, DataSource::Sun, Some("Bat Yam"), "second");

        let contents = std::fs::read_to_string(&path).expect("log file written");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO SYS: first"));
        assert!(lines[1].ends_with("ERROR SUN [Bat Yam]: second"));
    }
}

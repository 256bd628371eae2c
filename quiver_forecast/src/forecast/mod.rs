/// Reshaping of raw hourly series into display structures.
///
/// Submodules:
/// - `slots`:   per-day hourly slots and day aggregates.
/// - `daily`:   per-day peak wave height for the chart.
/// - `current`: conditions for the current hour.
///
/// Timestamps are Open-Meteo local times without offset, e.g.
/// `"2025-06-08T06:00"`. They are compared as naive local times throughout.

pub mod current;
pub mod daily;
pub mod slots;

pub use current::current_conditions;
pub use daily::daily_max_wave_heights;
pub use slots::{available_days, build_day_aggregate, build_day_slots, build_forecast_days, display_slots};

use chrono::{DateTime, NaiveDateTime};

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Parses an ISO-8601 hourly timestamp, with or without seconds.
///
/// A `Z` suffix or a UTC offset is accepted and dropped: the result is the
/// wall-clock time as written, so `2025-06-08T09:00+03:00` stays on
/// 2025-06-08 at 09:00.
pub fn parse_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    let stamp = stamp.trim();
    let local = stamp.strip_suffix('Z').unwrap_or(stamp);

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(stamp).ok().map(|t| t.naive_local()))
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(stamp, format).ok())
                .map(|t| t.naive_local())
        })
}

/// `YYYY-MM-DDTHH` key identifying the hour a timestamp falls in.
pub fn hour_key(stamp: &NaiveDateTime) -> String {
    stamp.format("%Y-%m-%dT%H").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_timestamp_accepts_both_precisions() {
        let minutes = parse_timestamp("2025-06-08T06:00").expect("minute precision");
        let seconds = parse_timestamp("2025-06-08T06:00:00").expect("second precision");
        assert_eq!(minutes, seconds);
        assert_eq!(minutes.date(), NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());
        assert_eq!(minutes.hour(), 6);
    }

    #[test]
    fn test_parse_timestamp_keeps_wall_clock_of_offset_stamps() {
        let expected = parse_timestamp("2025-06-08T09:00").unwrap();
        assert_eq!(parse_timestamp("2025-06-08T09:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-08T09:00+03:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-08T09:00:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-08T09:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-08T09:00+0300"), Some(expected));
    }

    #[test]
    fn test_offset_does_not_move_stamp_across_midnight() {
        let stamp = parse_timestamp("2025-06-08T23:00-04:00").unwrap();
        assert_eq!(stamp.date(), NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());
        assert_eq!(hour_key(&stamp), "2025-06-08T23");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2025-06-08").is_none());
        assert!(parse_timestamp("2025-13-08T06:00").is_none());
    }

    #[test]
    fn test_hour_key() {
        let stamp = parse_timestamp("2025-06-08T21:30").unwrap();
        assert_eq!(hour_key(&stamp), "2025-06-08T21");
    }
}

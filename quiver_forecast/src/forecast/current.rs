/// Conditions for the hour containing "now".

use chrono::NaiveDateTime;

use crate::forecast::{hour_key, parse_timestamp};
use crate::model::{CurrentConditions, MarineSeries, SunSeries, WeatherSeries, value_at};

/// Index of the first entry falling in the same hour as `now`.
fn index_for_hour(times: &[String], key: &str) -> Option<usize> {
    times
        .iter()
        .position(|t| parse_timestamp(t).is_some_and(|stamp| hour_key(&stamp) == key))
}

/// Picks the current-hour fields out of each series.
///
/// `now` is a naive local time in the spot's timezone, the same frame the
/// series timestamps use. Sun data always comes from the first daily entry.
pub fn current_conditions(
    marine: &MarineSeries,
    weather: &WeatherSeries,
    sun: &SunSeries,
    now: NaiveDateTime,
) -> CurrentConditions {
    let key = hour_key(&now);
    let marine_index = index_for_hour(&marine.time, &key);
    let weather_index = index_for_hour(&weather.time, &key);

    let marine_value = |values: &[Option<f64>]| marine_index.and_then(|i| value_at(values, i));
    let weather_value = |values: &[Option<f64>]| weather_index.and_then(|i| value_at(values, i));

    CurrentConditions {
        water_temp: marine_value(&marine.sea_surface_temperature),
        air_temp: weather_value(&weather.temperature_2m),
        wave_height: marine_value(&marine.wave_height),
        wave_period: marine_value(&marine.wave_period),
        wave_direction: marine_value(&marine.wave_direction),
        wind_speed: weather_value(&weather.wind_speed_10m),
        wind_direction: weather_value(&weather.wind_direction_10m),
        uv_index: value_at(&sun.uv_index_max, 0),
        sunrise: sun.sunrise.first().cloned().flatten(),
        sunset: sun.sunset.first().cloned().flatten(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(stamp: &str) -> NaiveDateTime {
        parse_timestamp(stamp).unwrap()
    }

    fn marine() -> MarineSeries {
        MarineSeries {
            time: vec!["2025-06-08T09:00".into(), "2025-06-08T10:00".into()],
            sea_surface_temperature: vec![Some(24.0), Some(24.3)],
            wave_height: vec![Some(0.9), Some(1.1)],
            wave_period: vec![Some(6.0), Some(7.0)],
            wave_direction: vec![Some(250.0), Some(260.0)],
        }
    }

    fn weather() -> WeatherSeries {
        WeatherSeries {
            time: vec!["2025-06-08T10:00".into()],
            temperature_2m: vec![Some(28.4)],
            wind_speed_10m: vec![Some(12.0)],
            wind_direction_10m: vec![Some(300.0)],
        }
    }

    fn sun() -> SunSeries {
        SunSeries {
            time: vec!["2025-06-08".into(), "2025-06-09".into()],
            sunrise: vec![Some("2025-06-08T05:32".into()), Some("2025-06-09T05:32".into())],
            sunset: vec![Some("2025-06-08T19:45".into()), None],
            uv_index_max: vec![Some(9.1), Some(8.7)],
        }
    }

    #[test]
    fn test_matches_current_hour_ignoring_minutes() {
        let now = at("2025-06-08T10:47");
        let current = current_conditions(&marine(), &weather(), &sun(), now);
        assert_eq!(current.wave_height, Some(1.1));
        assert_eq!(current.water_temp, Some(24.3));
        assert_eq!(current.wave_period, Some(7.0));
        assert_eq!(current.wave_direction, Some(260.0));
        assert_eq!(current.air_temp, Some(28.4));
        assert_eq!(current.wind_speed, Some(12.0));
        assert_eq!(current.wind_direction, Some(300.0));
    }

    #[test]
    fn test_sun_fields_from_first_daily_entry() {
        let current = current_conditions(&marine(), &weather(), &sun(), at("2025-06-08T10:00"));
        assert_eq!(current.uv_index, Some(9.1));
        assert_eq!(current.sunrise.as_deref(), Some("2025-06-08T05:32"));
        assert_eq!(current.sunset.as_deref(), Some("2025-06-08T19:45"));
    }

    #[test]
    fn test_weather_missing_for_hour_leaves_weather_fields_empty() {
        let current = current_conditions(&marine(), &weather(), &sun(), at("2025-06-08T09:15"));
        assert_eq!(current.wave_height, Some(0.9));
        assert_eq!(current.air_temp, None);
        assert_eq!(current.wind_speed, None);
    }

    #[test]
    fn test_hour_outside_series_is_all_none() {
        let current = current_conditions(
            &MarineSeries::default(),
            &WeatherSeries::default(),
            &SunSeries::default(),
            at("2025-06-10T10:00"),
        );
        assert_eq!(current, CurrentConditions::default());
    }
}

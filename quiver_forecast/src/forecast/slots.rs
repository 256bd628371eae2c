/// Per-day hourly slots.
///
/// The marine series decides which hours exist: every marine timestamp on the
/// requested day becomes a slot, and the atmospheric fields are joined in by
/// identical timestamp. An hour with no weather match keeps its slot with the
/// weather fields empty.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::forecast::{hour_key, parse_timestamp};
use crate::logging::{self, DataSource};
use crate::model::{DayAggregate, HourlySlot, MarineSeries, WeatherSeries, value_at};
use crate::units::round_to;

/// First and last hour shown in the day table.
const DISPLAY_FIRST_HOUR: u32 = 6;
const DISPLAY_LAST_HOUR: u32 = 21;
/// Spacing of the rows shown in the day table.
const DISPLAY_STEP_HOURS: u32 = 3;

/// Builds the hourly slots of `date`, in marine series order.
///
/// Series are assumed chronological and are not re-sorted. A repeated hour
/// keeps its first occurrence; timestamps that do not parse are skipped.
pub fn build_day_slots(marine: &MarineSeries, weather: &WeatherSeries, date: NaiveDate) -> Vec<HourlySlot> {
    let weather_by_time: HashMap<&str, usize> = weather
        .time
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    let mut seen_hours = HashSet::new();
    let mut slots = Vec::new();

    for (i, raw) in marine.time.iter().enumerate() {
        let Some(stamp) = parse_timestamp(raw) else {
            logging::debug(DataSource::Marine, None, &format!("skipping unparseable timestamp '{}'", raw));
            continue;
        };
        if stamp.date() != date || !seen_hours.insert(hour_key(&stamp)) {
            continue;
        }

        let weather_index = weather_by_time.get(raw.as_str()).copied();
        let weather_value = |values: &[Option<f64>]| weather_index.and_then(|w| value_at(values, w));

        slots.push(HourlySlot {
            time: stamp.format("%H:%M").to_string(),
            wave_height: value_at(&marine.wave_height, i).map(|h| round_to(h, 1)),
            period: value_at(&marine.wave_period, i),
            wave_direction: value_at(&marine.wave_direction, i),
            air_temp: weather_value(&weather.temperature_2m),
            wind_speed: weather_value(&weather.wind_speed_10m),
            wind_direction: weather_value(&weather.wind_direction_10m),
        });
    }

    slots
}

/// Slots of `date` together with the day's wave height range.
pub fn build_day_aggregate(marine: &MarineSeries, weather: &WeatherSeries, date: NaiveDate) -> DayAggregate {
    let slots = build_day_slots(marine, weather, date);
    let heights = || slots.iter().filter_map(|s| s.wave_height);
    let max_wave_height = heights().reduce(f64::max);
    let min_wave_height = heights().reduce(f64::min);

    DayAggregate {
        date,
        slots,
        max_wave_height,
        min_wave_height,
    }
}

/// Distinct calendar days present in the marine series, in series order.
pub fn available_days(marine: &MarineSeries) -> Vec<NaiveDate> {
    let mut seen = HashSet::new();
    marine
        .time
        .iter()
        .filter_map(|t| parse_timestamp(t))
        .map(|stamp| stamp.date())
        .filter(|day| seen.insert(*day))
        .collect()
}

/// One aggregate per day of the marine series.
pub fn build_forecast_days(marine: &MarineSeries, weather: &WeatherSeries) -> Vec<DayAggregate> {
    available_days(marine)
        .into_iter()
        .map(|day| build_day_aggregate(marine, weather, day))
        .collect()
}

/// The rows shown in the day table: every third hour from 06:00 to 21:00.
pub fn display_slots(slots: &[HourlySlot]) -> Vec<&HourlySlot> {
    slots
        .iter()
        .filter(|slot| match slot.hour() {
            Some(hour) => {
                (DISPLAY_FIRST_HOUR..=DISPLAY_LAST_HOUR).contains(&hour) && hour % DISPLAY_STEP_HOURS == 0
            }
            None => false,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

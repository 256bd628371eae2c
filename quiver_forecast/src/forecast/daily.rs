/// Daily peak wave height, the data behind the multi-day chart.

use crate::forecast::parse_timestamp;
use crate::model::{DailyPeak, MarineSeries, value_at};
use crate::units::round_to;

/// Highest wave height of each calendar day in the marine series.
///
/// Days come out in order of first appearance. Null and non-finite heights
/// are ignored, and a day with no usable height is left out entirely.
pub fn daily_max_wave_heights(marine: &MarineSeries) -> Vec<DailyPeak> {
    // (day, running max) in first-appearance order; a handful of days at most.
    let mut days: Vec<(String, Option<f64>)> = Vec::new();

    for (i, raw) in marine.time.iter().enumerate() {
        let Some(stamp) = parse_timestamp(raw) else {
            continue;
        };
        let day = stamp.date().format("%Y-%m-%d").to_string();
        let height = value_at(&marine.wave_height, i);

        let index = match days.iter().position(|(d, _)| *d == day) {
            Some(index) => index,
            None => {
                days.push((day, None));
                days.len() - 1
            }
        };
        if let Some(h) = height {
            let max = &mut days[index].1;
            *max = Some(max.map_or(h, |m| m.max(h)));
        }
    }

    days.into_iter()
        .filter_map(|(day, max)| max.map(|m| DailyPeak::new(day, round_to(m, 2))))
        .collect()
}

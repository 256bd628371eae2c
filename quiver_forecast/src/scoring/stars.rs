/// Quick 1–5 star rating for a forecast table row.
///
/// Unlike the quality scorer this needs no spot geometry. Wind from the
/// west (225–315°) earns a star, plus one more at 5–15 km/h. Wind from the
/// east (45–135°) costs a star, plus one more above 20 km/h.

use crate::model::HourlySlot;

/// Stars for one slot, always within `1..=5`. Missing fields count as zero.
pub fn star_rating(slot: &HourlySlot) -> u8 {
    let value = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);
    let wave_height = value(slot.wave_height);
    let period = value(slot.period);
    let wind_direction = value(slot.wind_direction);
    let wind_speed = value(slot.wind_speed);

    let mut rating: i32 = 0;

    if (1.0..=8.0).contains(&wave_height) {
        rating += if (2.0..=6.0).contains(&wave_height) { 2 } else { 1 };
    }

    for threshold in [6.0, 10.0, 14.0] {
        if period >= threshold {
            rating += 1;
        }
    }

    if (225.0..=315.0).contains(&wind_direction) {
        rating += 1;
        if (5.0..=15.0).contains(&wind_speed) {
            rating += 1;
        }
    } else if (45.0..=135.0).contains(&wind_direction) {
        rating -= 1;
        if wind_speed > 20.0 {
            rating -= 1;
        }
    }

    rating.clamp(1, 5) as u8
}

/// Wave quality scorer.
///
/// Turns a spot's geometry and one condition reading into a 0–100 score:
///
/// ```text
/// sps   = swell period score            (stepped, 0–100)
/// shs   = swell height score            (linear ramp to 2.5 m, 0–100)
/// pss   = 0.7·sps + 0.3·shs
/// was   = pss · wind multiplier         (relative direction × strength)
/// final = round2(clamp(was · tide multiplier, 0, 100))
/// ```
///
/// A swell direction outside the spot's window short-circuits to a FLAT
/// rating with the reason recorded in the details.

use serde::Serialize;

use crate::logging::{self, DataSource};
use crate::model::{ConditionReading, ForecastError, TideState};
use crate::scoring::tables::{
    self, RATING_SCALE, VerbalRating, WIND_MULTIPLIER_TABLE, WindKey,
};
use crate::spots::{SpotProfile, SpotRegistry};
use crate::units::round_to;
use crate::wind::{RelativeWind, WindStrength, classify_wind_relative_to_coast, classify_wind_strength};

/// Height at which the swell height score saturates.
const FULL_HEIGHT_M: f64 = 2.5;

/// Heights below this are not surfable and score zero.
const MIN_HEIGHT_M: f64 = 0.4;

const PERIOD_WEIGHT: f64 = 0.7;
const HEIGHT_WEIGHT: f64 = 0.3;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Result of scoring one reading at one spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityRating {
    pub spot_name: String,
    pub final_score: f64,
    pub verbal_rating: VerbalRating,
    pub color_code: &'static str,
    pub description: String,
    pub details: RatingDetails,
}

/// Every intermediate value behind a rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "swell_direction_check")]
pub enum RatingDetails {
    /// The swell direction gate rejected the reading.
    #[serde(rename = "FAILED")]
    DirectionMismatch(GateFailure),
    #[serde(rename = "PASSED")]
    Scored(ScoreBreakdown),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateFailure {
    pub reason: String,
    #[serde(flatten)]
    pub reading: ConditionReading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    #[serde(flatten)]
    pub reading: ConditionReading,
    pub swell_period_score: f64,
    pub swell_height_score: f64,
    pub potential_swell_score: f64,
    pub relative_wind_direction: RelativeWind,
    pub wind_strength_category: WindStrength,
    pub wind_multiplier_key: &'static str,
    pub wind_multiplier: f64,
    pub wind_adjusted_score: f64,
    pub tide_multiplier: f64,
}

impl RatingDetails {
    /// Why the reading was not scored, if it was rejected.
    pub fn reason(&self) -> Option<&str> {
        match self {
            RatingDetails::DirectionMismatch(failure) => Some(&failure.reason),
            RatingDetails::Scored(_) => None,
        }
    }

    pub fn breakdown(&self) -> Option<&ScoreBreakdown> {
        match self {
            RatingDetails::DirectionMismatch(_) => None,
            RatingDetails::Scored(breakdown) => Some(breakdown),
        }
    }
}

// ---------------------------------------------------------------------------
// Component scores
// ---------------------------------------------------------------------------

/// Stepped swell period score.
///
/// Only the exact periods 6, 7, 8 and 9 s earn partial credit; every other
/// period of at least 5 s falls through to 100. So 6.0 s scores 20 while
/// 6.5 s and 5.0 s score 100.
// TODO: replace the exact-match steps with a monotonic ramp once the rating
// history is re-baselined.
pub fn swell_period_score(period_s: f64) -> f64 {
    if period_s < 5.0 {
        0.0
    } else if period_s == 6.0 {
        20.0
    } else if period_s == 7.0 {
        40.0
    } else if period_s == 8.0 {
        60.0
    } else if period_s == 9.0 {
        80.0
    } else {
        100.0
    }
}

/// Linear swell height score, saturating at 2.5 m.
pub fn swell_height_score(height_m: f64) -> f64 {
    if height_m < MIN_HEIGHT_M {
        0.0
    } else {
        (height_m / FULL_HEIGHT_M * 100.0).min(100.0)
    }
}

pub fn potential_swell_score(period_score: f64, height_score: f64) -> f64 {
    period_score * PERIOD_WEIGHT + height_score * HEIGHT_WEIGHT
}

pub fn tide_multiplier(tide: TideState) -> f64 {
    match tide {
        TideState::Slack => tables::TIDE_SLACK_MULTIPLIER,
        TideState::Moving => tables::TIDE_MOVING_MULTIPLIER,
        TideState::Unknown => tables::TIDE_UNKNOWN_MULTIPLIER,
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Scores a reading against the named spot in `registry`.
///
/// Fails only with `SpotNotFound`; every numeric input yields a rating.
pub fn score_wave_quality(
    registry: &SpotRegistry,
    spot_name: &str,
    reading: &ConditionReading,
) -> Result<QualityRating, ForecastError> {
    let spot = registry.find(spot_name)?;
    Ok(rate_conditions(spot, reading))
}

/// Scores a reading against a known spot profile.
pub fn rate_conditions(spot: &SpotProfile, reading: &ConditionReading) -> QualityRating {
    let reading = reading.sanitized();
    let window = spot.optimal_swell_directions;

    if !window.contains(reading.swell_direction_deg) {
        let reason = format!(
            "Swell direction {}° is outside optimal range {}°-{}° for {}.",
            reading.swell_direction_deg, window.min_deg, window.max_deg, spot.name
        );
        logging::debug(DataSource::Scoring, Some(&spot.name), &reason);
        let flat = tables::band_for_score(RATING_SCALE, 0.0);
        return QualityRating {
            spot_name: spot.name.clone(),
            final_score: 0.0,
            verbal_rating: VerbalRating::Flat,
            color_code: flat.color_code,
            description: format!("No surfable waves. {}", reason),
            details: RatingDetails::DirectionMismatch(GateFailure { reason, reading }),
        };
    }

    let sps = swell_period_score(reading.swell_period_s);
    let shs = swell_height_score(reading.swell_height_m);
    let pss = potential_swell_score(sps, shs);

    let relative = classify_wind_relative_to_coast(
        reading.wind_direction_deg,
        spot.coastline_direction_deg,
        &spot.wind_shelter,
    );
    let strength = classify_wind_strength(reading.wind_speed_kmh);
    let key: WindKey = tables::wind_key(relative, strength, reading.wind_speed_kmh);
    let wind_multiplier = tables::lookup_multiplier(WIND_MULTIPLIER_TABLE, relative, key);

    let was = pss * wind_multiplier;
    let tide = tide_multiplier(reading.tide_state);
    let final_score = round_to((was * tide).clamp(0.0, 100.0), 2);

    let band = tables::band_for_score(RATING_SCALE, final_score);

    logging::debug(
        DataSource::Scoring,
        Some(&spot.name),
        &format!(
            "sps={} shs={:.2} pss={:.2} wind={}/{} x{} tide x{} -> {} ({})",
            sps, shs, pss, relative, key.label(), wind_multiplier, tide, final_score, band.verbal_rating
        ),
    );

    QualityRating {
        spot_name: spot.name.clone(),
        final_score,
        verbal_rating: band.verbal_rating,
        color_code: band.color_code,
        description: band.description.to_string(),
        details: RatingDetails::Scored(ScoreBreakdown {
            reading,
            swell_period_score: sps,
            swell_height_score: shs,
            potential_swell_score: round_to(pss, 2),
            relative_wind_direction: relative,
            wind_strength_category: strength,
            wind_multiplier_key: key.label(),
            wind_multiplier,
            wind_adjusted_score: round_to(was, 2),
            tide_multiplier: tide,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

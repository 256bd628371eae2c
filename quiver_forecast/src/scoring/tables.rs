/// Static lookup tables for the wave quality scorer.
///
/// Kept as data rather than branching so every band can be audited and
/// tested on its own.

use serde::Serialize;

use crate::wind::{RelativeWind, WindStrength};

// ---------------------------------------------------------------------------
// Wind multipliers
// ---------------------------------------------------------------------------

/// Column of the wind multiplier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindKey {
    /// A speed band from `classify_wind_strength`.
    Band(WindStrength),
    /// Any wind above 0 km/h. Only cross-shore rows use this column.
    AnyBreeze,
}

impl WindKey {
    pub fn label(&self) -> &'static str {
        match self {
            WindKey::Band(strength) => strength.label(),
            WindKey::AnyBreeze => "> 0 km/h",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindMultiplier {
    pub direction: RelativeWind,
    pub key: WindKey,
    pub multiplier: f64,
}

const fn row(direction: RelativeWind, key: WindKey, multiplier: f64) -> WindMultiplier {
    WindMultiplier { direction, key, multiplier }
}

use RelativeWind::*;
use WindStrength::*;

/// Multiplier applied to the potential swell score for each wind regime.
///
/// Offshore wind grooms the face until it gets strong enough to hold waves
/// up; anything with an onshore component degrades the surf faster the
/// harder it blows. Cross-shore wind is treated as one regime at any speed
/// above calm.
pub static WIND_MULTIPLIER_TABLE: &[WindMultiplier] = &[
    row(Offshore, WindKey::Band(Calm), 1.0),
    row(Offshore, WindKey::Band(Light), 1.0),
    row(Offshore, WindKey::Band(Moderate), 0.9),
    row(Offshore, WindKey::Band(Strong), 0.7),
    row(CrossOffshore, WindKey::Band(Calm), 1.0),
    row(CrossOffshore, WindKey::Band(Light), 0.9),
    row(CrossOffshore, WindKey::Band(Moderate), 0.8),
    row(CrossOffshore, WindKey::Band(Strong), 0.6),
    row(CrossShore, WindKey::Band(Calm), 1.0),
    row(CrossShore, WindKey::AnyBreeze, 0.7),
    row(CrossOnshore, WindKey::Band(Calm), 0.9),
    row(CrossOnshore, WindKey::Band(Light), 0.6),
    row(CrossOnshore, WindKey::Band(Moderate), 0.4),
    row(CrossOnshore, WindKey::Band(Strong), 0.2),
    row(Onshore, WindKey::Band(Calm), 0.8),
    row(Onshore, WindKey::Band(Light), 0.5),
    row(Onshore, WindKey::Band(Moderate), 0.3),
    row(Onshore, WindKey::Band(Strong), 0.1),
];

/// Column used for a wind regime: cross-shore wind above calm collapses into
/// the single `AnyBreeze` column.
pub fn wind_key(direction: RelativeWind, strength: WindStrength, speed_kmh: f64) -> WindKey {
    if direction == CrossShore && speed_kmh > 0.0 {
        WindKey::AnyBreeze
    } else {
        WindKey::Band(strength)
    }
}

/// Looks a multiplier up in `table`. A missing row means full penalty.
pub fn lookup_multiplier(table: &[WindMultiplier], direction: RelativeWind, key: WindKey) -> f64 {
    table
        .iter()
        .find(|r| r.direction == direction && r.key == key)
        .map(|r| r.multiplier)
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tide
// ---------------------------------------------------------------------------

pub const TIDE_SLACK_MULTIPLIER: f64 = 0.95;
pub const TIDE_MOVING_MULTIPLIER: f64 = 1.05;
pub const TIDE_UNKNOWN_MULTIPLIER: f64 = 1.0;

// ---------------------------------------------------------------------------
// Verbal rating scale
// ---------------------------------------------------------------------------

/// Verbal rating, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum VerbalRating {
    #[serde(rename = "FLAT")]
    Flat,
    #[serde(rename = "VERY POOR")]
    VeryPoor,
    #[serde(rename = "POOR")]
    Poor,
    #[serde(rename = "FAIR")]
    Fair,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "VERY GOOD")]
    VeryGood,
    #[serde(rename = "EPIC")]
    Epic,
}

impl VerbalRating {
    pub fn label(&self) -> &'static str {
        match self {
            VerbalRating::Flat => "FLAT",
            VerbalRating::VeryPoor => "VERY POOR",
            VerbalRating::Poor => "POOR",
            VerbalRating::Fair => "FAIR",
            VerbalRating::Good => "GOOD",
            VerbalRating::VeryGood => "VERY GOOD",
            VerbalRating::Epic => "EPIC",
        }
    }
}

impl std::fmt::Display for VerbalRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One band of the rating scale. Bounds are inclusive on both ends; scores
/// carry two decimals, so adjacent bands meet at `x.00` / `x.01`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBand {
    pub min_score: f64,
    pub max_score: f64,
    pub verbal_rating: VerbalRating,
    pub color_code: &'static str,
    pub description: &'static str,
}

impl RatingBand {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min_score && score <= self.max_score
    }
}

pub static RATING_SCALE: &[RatingBand] = &[
    RatingBand {
        min_score: 0.0,
        max_score: 10.0,
        verbal_rating: VerbalRating::Flat,
        color_code: "Gray",
        description: "No surfable waves.",
    },
    RatingBand {
        min_score: 10.01,
        max_score: 25.0,
        verbal_rating: VerbalRating::VeryPoor,
        color_code: "Red",
        description: "Barely rideable, mostly for beginners on big boards.",
    },
    RatingBand {
        min_score: 25.01,
        max_score: 40.0,
        verbal_rating: VerbalRating::Poor,
        color_code: "Orange",
        description: "Small or messy waves with short rides.",
    },
    RatingBand {
        min_score: 40.01,
        max_score: 55.0,
        verbal_rating: VerbalRating::Fair,
        color_code: "Yellow",
        description: "Surfable with some decent sets.",
    },
    RatingBand {
        min_score: 55.01,
        max_score: 70.0,
        verbal_rating: VerbalRating::Good,
        color_code: "LightGreen",
        description: "Clean, consistent waves worth paddling out for.",
    },
    RatingBand {
        min_score: 70.01,
        max_score: 85.0,
        verbal_rating: VerbalRating::VeryGood,
        color_code: "Green",
        description: "Well-shaped waves with good power and period.",
    },
    RatingBand {
        min_score: 85.01,
        max_score: 100.0,
        verbal_rating: VerbalRating::Epic,
        color_code: "Blue",
        description: "Exceptional conditions. Drop everything and go.",
    },
];

/// First band of `scale` containing `score`; the first band when none does.
///
/// Panics only if `scale` is empty, which the shipped scale never is.
pub fn band_for_score(scale: &'static [RatingBand], score: f64) -> &'static RatingBand {
    scale.iter().find(|band| band.contains(score)).unwrap_or(&scale[0])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_regime_has_a_multiplier() {
        let directions = [Offshore, CrossOffshore, CrossShore, CrossOnshore, Onshore];
        let strengths = [Calm, Light, Moderate, Strong];
        for direction in directions {
            for strength in strengths {
                // Representative speed inside each band; 0 keeps calm cross-shore on its band.
                let speed = match strength {
                    Calm => 0.0,
                    Light => 10.0,
                    Moderate => 20.0,
                    Strong => 30.0,
                };
                let key = wind_key(direction, strength, speed);
                assert!(
                    WIND_MULTIPLIER_TABLE.iter().any(|r| r.direction == direction && r.key == key),
                    "no multiplier row for {} / {}",
                    direction,
                    key.label()
                );
            }
        }
    }

    #[test]
    fn test_multipliers_are_fractions() {
        for r in WIND_MULTIPLIER_TABLE {
            assert!((0.0..=1.0).contains(&r.multiplier), "{:?}", r);
        }
    }

    #[test]
    fn test_no_duplicate_rows() {
        for (i, a) in WIND_MULTIPLIER_TABLE.iter().enumerate() {
            for b in &WIND_MULTIPLIER_TABLE[i + 1..] {
                assert!(
                    !(a.direction == b.direction && a.key == b.key),
                    "duplicate row {} / {}",
                    a.direction,
                    a.key.label()
                );
            }
        }
    }

    #[test]
    fn test_cross_shore_breeze_uses_single_column() {
        assert_eq!(wind_key(CrossShore, Strong, 40.0), WindKey::AnyBreeze);
        assert_eq!(wind_key(CrossShore, Light, 8.0), WindKey::AnyBreeze);
        assert_eq!(wind_key(CrossShore, Calm, 3.0), WindKey::AnyBreeze);
        assert_eq!(wind_key(CrossShore, Calm, 0.0), WindKey::Band(Calm));
        assert_eq!(wind_key(Onshore, Light, 8.0), WindKey::Band(Light));
    }

    #[test]
    fn test_missing_row_means_full_penalty() {
        let sparse = [row(Offshore, WindKey::Band(Calm), 1.0)];
        assert_eq!(lookup_multiplier(&sparse, Offshore, WindKey::Band(Calm)), 1.0);
        assert_eq!(lookup_multiplier(&sparse, Onshore, WindKey::Band(Calm)), 0.0);
        assert_eq!(lookup_multiplier(WIND_MULTIPLIER_TABLE, CrossShore, WindKey::Band(Light)), 0.0);
    }

    #[test]
    fn test_offshore_light_is_best_onshore_strong_is_worst() {
        let best = lookup_multiplier(WIND_MULTIPLIER_TABLE, Offshore, WindKey::Band(Light));
        let worst = lookup_multiplier(WIND_MULTIPLIER_TABLE, Onshore, WindKey::Band(Strong));
        assert_eq!(best, 1.0);
        assert_eq!(worst, 0.1);
    }

    #[test]
    fn test_rating_scale_covers_0_to_100_in_order() {
        assert_eq!(RATING_SCALE[0].min_score, 0.0);
        assert_eq!(RATING_SCALE[RATING_SCALE.len() - 1].max_score, 100.0);
        for pair in RATING_SCALE.windows(2) {
            assert!(pair[0].verbal_rating < pair[1].verbal_rating);
            let gap = pair[1].min_score - pair[0].max_score;
            assert!((gap - 0.01).abs() < 1e-9, "gap between {} and {}", pair[0].verbal_rating, pair[1].verbal_rating);
        }
    }

    #[test]
    fn test_every_two_decimal_score_finds_a_band() {
        for hundredths in 0..=10_000 {
            let score = (hundredths as f64) / 100.0;
            assert!(
                RATING_SCALE.iter().any(|band| band.contains(score)),
                "score {} falls between bands",
                score
            );
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_for_score(RATING_SCALE, 10.0).verbal_rating, VerbalRating::Flat);
        assert_eq!(band_for_score(RATING_SCALE, 10.01).verbal_rating, VerbalRating::VeryPoor);
        assert_eq!(band_for_score(RATING_SCALE, 85.0).verbal_rating, VerbalRating::VeryGood);
        assert_eq!(band_for_score(RATING_SCALE, 100.0).verbal_rating, VerbalRating::Epic);
    }

    #[test]
    fn test_unmatched_score_falls_back_to_first_band() {
        assert_eq!(band_for_score(RATING_SCALE, f64::NAN).verbal_rating, VerbalRating::Flat);
        assert_eq!(band_for_score(RATING_SCALE, 10.005).verbal_rating, VerbalRating::Flat);
        assert_eq!(band_for_score(RATING_SCALE, 140.0).verbal_rating, VerbalRating::Flat);
    }

    #[test]
    fn test_verbal_labels() {
        assert_eq!(VerbalRating::VeryGood.to_string(), "VERY GOOD");
        assert_eq!(serde_json::to_string(&VerbalRating::Flat).unwrap(), "\"FLAT\"");
    }
}

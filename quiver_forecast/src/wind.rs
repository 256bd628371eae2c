/// Wind classification relative to a spot's coastline.
///
/// Both classifiers are pure functions of their arguments and feed the wind
/// multiplier lookup in `scoring::tables`.

use serde::Serialize;

use crate::spots::{Octant, ShelterStrength, WindShelter};

/// Circular distance below which a fully sheltered octant neutralizes wind.
const SHELTER_HALF_WIDTH_DEG: f64 = 45.0;

/// Wind direction relative to the shore, from best to worst for surf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelativeWind {
    #[serde(rename = "Offshore")]
    Offshore,
    #[serde(rename = "Cross-Offshore")]
    CrossOffshore,
    #[serde(rename = "Cross-Shore")]
    CrossShore,
    #[serde(rename = "Cross-Onshore")]
    CrossOnshore,
    #[serde(rename = "Onshore")]
    Onshore,
}

impl RelativeWind {
    pub fn label(&self) -> &'static str {
        match self {
            RelativeWind::Offshore => "Offshore",
            RelativeWind::CrossOffshore => "Cross-Offshore",
            RelativeWind::CrossShore => "Cross-Shore",
            RelativeWind::CrossOnshore => "Cross-Onshore",
            RelativeWind::Onshore => "Onshore",
        }
    }
}

impl std::fmt::Display for RelativeWind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Wind speed band in km/h. Each band includes its upper boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WindStrength {
    #[serde(rename = "0-5 km/h")]
    Calm,
    #[serde(rename = "6-15 km/h")]
    Light,
    #[serde(rename = "16-25 km/h")]
    Moderate,
    #[serde(rename = "> 25 km/h")]
    Strong,
}

impl WindStrength {
    pub fn label(&self) -> &'static str {
        match self {
            WindStrength::Calm => "0-5 km/h",
            WindStrength::Light => "6-15 km/h",
            WindStrength::Moderate => "16-25 km/h",
            WindStrength::Strong => "> 25 km/h",
        }
    }
}

impl std::fmt::Display for WindStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Smallest angle between two compass bearings, in `[0, 180]`.
pub fn circular_distance_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Classifies wind direction against the coastline of a spot.
///
/// `coastline_direction_deg` is the bearing the coast faces seaward, so wind
/// blowing *from* the opposite bearing (the land) is offshore. A fully
/// sheltered octant within 45° of the wind direction forces `Offshore`;
/// partial shelter and octants absent from `shelter` fall through to the
/// geometric bands.
pub fn classify_wind_relative_to_coast(
    wind_direction_deg: f64,
    coastline_direction_deg: f64,
    shelter: &WindShelter,
) -> RelativeWind {
    let land_direction_deg = (coastline_direction_deg + 180.0).rem_euclid(360.0);
    let angle_from_land = (wind_direction_deg - land_direction_deg + 360.0).rem_euclid(360.0);

    let sheltered = shelter.iter().any(|(octant, strength)| {
        *strength == ShelterStrength::Full
            && circular_distance_deg(octant.bearing_deg(), wind_direction_deg) < SHELTER_HALF_WIDTH_DEG
    });
    if sheltered {
        return RelativeWind::Offshore;
    }

    // rem_euclid keeps the angle in [0, 360); the 360 case of the
    // (315, 360] band folds into 0.
    if angle_from_land <= 45.0 || angle_from_land > 315.0 {
        RelativeWind::Offshore
    } else if angle_from_land <= 90.0 {
        RelativeWind::CrossOffshore
    } else if angle_from_land < 180.0 {
        RelativeWind::CrossShore
    } else if angle_from_land <= 270.0 {
        RelativeWind::Onshore
    } else {
        RelativeWind::CrossOnshore
    }
}

/// Buckets a wind speed in km/h.
///
/// Total over all inputs: negative speeds land in `Calm` (sensor noise is not
/// worth an error), and NaN compares false everywhere so it lands in `Strong`.
pub fn classify_wind_strength(speed_kmh: f64) -> WindStrength {
    if speed_kmh <= 5.0 {
        WindStrength::Calm
    } else if speed_kmh <= 15.0 {
        WindStrength::Light
    } else if speed_kmh <= 25.0 {
        WindStrength::Moderate
    } else {
        WindStrength::Strong
    }
}

/// Octant whose canonical bearing is nearest to `direction_deg`.
pub fn nearest_octant(direction_deg: f64) -> Octant {
    let index = ((direction_deg.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % 8;
    Octant::ALL[index]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Surf spot registry.
///
/// Two kinds of reference data live here:
///   - `SPOT_LOCATIONS`: every beach offered in the forecast dashboard, with
///     the coordinates used to query Open-Meteo.
///   - `SpotProfile`s: the subset of spots whose geometry is known well
///     enough to run the wave quality scorer (optimal swell window, coastline
///     bearing, wind shelter).
///
/// Profiles ship built in and can be overridden from a TOML file
/// (see `spots.toml` in the package directory).

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::logging::{self, DataSource};
use crate::model::ForecastError;

// ---------------------------------------------------------------------------
// Compass octants and shelter
// ---------------------------------------------------------------------------

/// One of the eight compass octants used as wind-shelter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Octant {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant::N,
        Octant::NE,
        Octant::E,
        Octant::SE,
        Octant::S,
        Octant::SW,
        Octant::W,
        Octant::NW,
    ];

    /// Canonical compass bearing of the octant, in degrees.
    pub fn bearing_deg(&self) -> f64 {
        match self {
            Octant::N => 0.0,
            Octant::NE => 45.0,
            Octant::E => 90.0,
            Octant::SE => 135.0,
            Octant::S => 180.0,
            Octant::SW => 225.0,
            Octant::W => 270.0,
            Octant::NW => 315.0,
        }
    }
}

impl std::str::FromStr for Octant {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(Octant::N),
            "NE" => Ok(Octant::NE),
            "E" => Ok(Octant::E),
            "SE" => Ok(Octant::SE),
            "S" => Ok(Octant::S),
            "SW" => Ok(Octant::SW),
            "W" => Ok(Octant::W),
            "NW" => Ok(Octant::NW),
            other => Err(ForecastError::ConfigError(format!("unknown compass octant '{}'", other))),
        }
    }
}

/// How strongly local geography blocks wind from an octant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterStrength {
    Full,
    Partial,
}

/// Sparse octant → shelter mapping. Octants absent from the map are exposed.
pub type WindShelter = BTreeMap<Octant, ShelterStrength>;

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Inclusive range of swell directions that produce surf at a spot.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct SwellWindow {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl From<(f64, f64)> for SwellWindow {
    fn from((min_deg, max_deg): (f64, f64)) -> Self {
        SwellWindow { min_deg, max_deg }
    }
}

impl SwellWindow {
    pub fn contains(&self, direction_deg: f64) -> bool {
        direction_deg >= self.min_deg && direction_deg <= self.max_deg
    }
}

/// Scoring geometry for one surf spot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpotProfile {
    pub name: String,
    pub optimal_swell_directions: SwellWindow,
    /// Compass bearing the coast faces, looking out to sea.
    #[serde(alias = "coastline_direction")]
    pub coastline_direction_deg: f64,
    #[serde(default, deserialize_with = "deserialize_shelter")]
    pub wind_shelter: WindShelter,
}

/// Reads the shelter table with string keys so that a typo in one octant
/// label drops that entry instead of rejecting the whole file.
fn deserialize_shelter<'de, D>(deserializer: D) -> Result<WindShelter, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, ShelterStrength>::deserialize(deserializer)?;
    let mut shelter = WindShelter::new();
    for (key, strength) in raw {
        match key.parse::<Octant>() {
            Ok(octant) => {
                shelter.insert(octant, strength);
            }
            Err(e) => logging::warn(DataSource::Config, None, &format!("ignoring wind shelter entry: {}", e)),
        }
    }
    Ok(shelter)
}

#[derive(Debug, Deserialize)]
struct SpotFile {
    #[serde(default)]
    spots: Vec<SpotProfile>,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Name-keyed collection of scorable spots.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotRegistry {
    profiles: Vec<SpotProfile>,
}

impl SpotRegistry {
    /// Builds a registry, rejecting duplicate names and inverted swell windows.
    pub fn new(profiles: Vec<SpotProfile>) -> Result<Self, ForecastError> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.name.as_str()) {
                return Err(ForecastError::ConfigError(format!(
                    "duplicate spot name '{}'",
                    profile.name
                )));
            }
            let window = profile.optimal_swell_directions;
            if window.min_deg > window.max_deg {
                return Err(ForecastError::ConfigError(format!(
                    "spot '{}' has inverted swell window {}°-{}°",
                    profile.name, window.min_deg, window.max_deg
                )));
            }
        }
        Ok(SpotRegistry { profiles })
    }

    /// The profiles shipped with the service.
    pub fn builtin() -> Self {
        SpotRegistry { profiles: builtin_profiles() }
    }

    /// Parses a registry from TOML text containing `[[spots]]` tables.
    pub fn from_toml_str(text: &str) -> Result<Self, ForecastError> {
        let file: SpotFile =
            toml::from_str(text).map_err(|e| ForecastError::ParseError(e.to_string()))?;
        Self::new(file.spots)
    }

    /// Loads a registry from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, ForecastError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let registry = Self::from_toml_str(&text)?;
        logging::info(
            DataSource::Config,
            None,
            &format!("Loaded {} spot profiles from {}", registry.len(), path.display()),
        );
        Ok(registry)
    }

    /// Looks up a spot by exact name.
    pub fn find(&self, name: &str) -> Result<&SpotProfile, ForecastError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ForecastError::SpotNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn profile(
    name: &str,
    window: (f64, f64),
    coastline_direction_deg: f64,
    shelter: &[(Octant, ShelterStrength)],
) -> SpotProfile {
    SpotProfile {
        name: name.to_string(),
        optimal_swell_directions: SwellWindow::from(window),
        coastline_direction_deg,
        wind_shelter: shelter.iter().copied().collect(),
    }
}

/// Southern Israeli beach breaks with surveyed geometry.
fn builtin_profiles() -> Vec<SpotProfile> {
    use Octant::*;
    use ShelterStrength::*;
    vec![
        profile("Ashdod Lido", (180.0, 220.0), 270.0, &[(N, Partial), (NE, Full)]),
        profile("Nitzanim", (190.0, 230.0), 280.0, &[(NW, Partial), (W, Full)]),
        profile("Ashkelon Delila", (170.0, 210.0), 260.0, &[(SW, Full)]),
    ]
}

// ---------------------------------------------------------------------------
// Forecast locations
// ---------------------------------------------------------------------------

/// A beach offered in the forecast dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLocation {
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

/// Every beach in the spot selector, south to north along the coast
/// where practical. The first entry is the dashboard default.
pub static SPOT_LOCATIONS: &[SpotLocation] = &[
    SpotLocation { name: "Ashdod Lido", latitude: 31.81235932977217, longitude: 34.63863686370215 },
    SpotLocation { name: "Nitzanim", latitude: 31.74508167590466, longitude: 34.60026661380782 },
    SpotLocation { name: "Ashkelon Delila", latitude: 31.67828848931909, longitude: 34.553989449671946 },
    SpotLocation { name: "Tel Aviv Hilton Beach", latitude: 32.079899, longitude: 34.787588 },
    SpotLocation { name: "Tel Aviv Maravi Beach", latitude: 32.051, longitude: 34.747 },
    SpotLocation { name: "Tel Aviv Dolphinarium", latitude: 32.0892, longitude: 34.7824 },
    SpotLocation { name: "Haifa Bat Galim (Backdoor)", latitude: 32.02394786679634, longitude: 34.73921728398227 },
    SpotLocation { name: "Bat Yam", latitude: 32.0465, longitude: 34.7572 },
    SpotLocation { name: "Michmoret", latitude: 32.40704135644245, longitude: 34.867655753317344 },
    SpotLocation { name: "Caesarea Arubot", latitude: 32.51305476470064, longitude: 34.8955653808597 },
];

/// The location selected when the dashboard opens.
pub fn default_location() -> &'static SpotLocation {
    &SPOT_LOCATIONS[0]
}

/// Looks up a forecast location by name, ignoring ASCII case.
pub fn find_location(name: &str) -> Option<&'static SpotLocation> {
    SPOT_LOCATIONS.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_TOML: &str = r#"
        [[spots]]
        name = "Test Point"
        optimal_swell_directions = [200, 260]
        coastline_direction = 250

        [spots.wind_shelter]
        ne = "full"
        S = "partial"
        NNE = "full"

        [[spots]]
        name = "Open Beach"
        optimal_swell_directions = [180.5, 215.0]
        coastline_direction_deg = 265.0
    "#;

    #[test]
    fn test_builtin_registry_contains_scorable_spots() {
        let registry = SpotRegistry::builtin();
        assert_eq!(registry.names(), vec!["Ashdod Lido", "Nitzanim", "Ashkelon Delila"]);
        let ashdod = registry.find("Ashdod Lido").expect("Ashdod should be registered");
        assert_eq!(ashdod.optimal_swell_directions, SwellWindow { min_deg: 180.0, max_deg: 220.0 });
        assert_eq!(ashdod.coastline_direction_deg, 270.0);
        assert_eq!(ashdod.wind_shelter.get(&Octant::NE), Some(&ShelterStrength::Full));
        assert_eq!(ashdod.wind_shelter.get(&Octant::S), None);
    }

    #[test]
    fn test_find_unknown_spot_is_spot_not_found() {
        let registry = SpotRegistry::builtin();
        assert_eq!(
            registry.find("Mavericks"),
            Err(ForecastError::SpotNotFound("Mavericks".to_string()))
        );
    }

    #[test]
    fn test_builtin_windows_are_ordered() {
        // Re-running validation over the shipped data guards hand edits.
        assert!(SpotRegistry::new(builtin_profiles()).is_ok());
    }

    #[test]
    fn test_every_profile_has_a_forecast_location() {
        for name in SpotRegistry::builtin().names() {
            assert!(find_location(name).is_some(), "profile '{}' has no coordinates", name);
        }
    }

    #[test]
    fn test_no_duplicate_location_names() {
        let mut seen = HashSet::new();
        for location in SPOT_LOCATIONS {
            assert!(seen.insert(location.name), "duplicate location '{}'", location.name);
        }
    }

    #[test]
    fn test_locations_lie_on_the_israeli_coast() {
        for location in SPOT_LOCATIONS {
            assert!((31.0..33.5).contains(&location.latitude), "{} latitude", location.name);
            assert!((34.0..35.5).contains(&location.longitude), "{} longitude", location.name);
        }
    }

    #[test]
    fn test_find_location_ignores_case() {
        assert_eq!(find_location("bat yam").map(|l| l.name), Some("Bat Yam"));
        assert!(find_location("Nazaré").is_none());
        assert_eq!(default_location().name, "Ashdod Lido");
    }

    #[test]
    fn test_octant_parsing() {
        assert_eq!("nw".parse::<Octant>(), Ok(Octant::NW));
        assert_eq!(" E ".parse::<Octant>(), Ok(Octant::E));
        assert!("NNE".parse::<Octant>().is_err());
        assert_eq!(Octant::SW.bearing_deg(), 225.0);
    }

    #[test]
    fn test_toml_registry_parses_sparse_shelter_and_skips_unknown_octants() {
        let registry = SpotRegistry::from_toml_str(SAMPLE_TOML).expect("valid toml");
        assert_eq!(registry.len(), 2);

        let point = registry.find("Test Point").unwrap();
        assert_eq!(point.coastline_direction_deg, 250.0);
        assert_eq!(point.wind_shelter.len(), 2, "NNE should be dropped");
        assert_eq!(point.wind_shelter.get(&Octant::NE), Some(&ShelterStrength::Full));
        assert_eq!(point.wind_shelter.get(&Octant::S), Some(&ShelterStrength::Partial));

        let open = registry.find("Open Beach").unwrap();
        assert!(open.wind_shelter.is_empty());
        assert_eq!(open.optimal_swell_directions.min_deg, 180.5);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let text = r#"
            [[spots]]
            name = "Twin"
            optimal_swell_directions = [180, 220]
            coastline_direction = 270

            [[spots]]
            name = "Twin"
            optimal_swell_directions = [180, 220]
            coastline_direction = 270
        "#;
        assert!(matches!(
            SpotRegistry::from_toml_str(text),
            Err(ForecastError::ConfigError(_))
        ));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let text = r#"
            [[spots]]
            name = "Backwards"
            optimal_swell_directions = [220, 180]
            coastline_direction = 270
        "#;
        assert!(matches!(
            SpotRegistry::from_toml_str(text),
            Err(ForecastError::ConfigError(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(
            SpotRegistry::from_toml_str("[[spots]\nname = "),
            Err(ForecastError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE_TOML.as_bytes()).expect("write sample");
        let registry = SpotRegistry::load(file.path()).expect("load from disk");
        assert!(registry.find("Open Beach").is_ok());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = SpotRegistry::load(Path::new("/nonexistent/quiver/spots.toml"));
        assert!(matches!(result, Err(ForecastError::ConfigError(_))));
    }

    #[test]
    fn test_swell_window_is_inclusive() {
        let window = SwellWindow { min_deg: 180.0, max_deg: 220.0 };
        assert!(window.contains(180.0));
        assert!(window.contains(220.0));
        assert!(!window.contains(179.99));
        assert!(!window.contains(220.01));
    }
}

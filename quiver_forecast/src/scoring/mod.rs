/// Surf quality scoring.
///
/// Submodules:
/// - `tables`:  wind multiplier table and verbal rating scale.
/// - `quality`: the 0–100 wave quality scorer.
/// - `stars`:   quick 1–5 star rating for table rows.

pub mod quality;
pub mod stars;
pub mod tables;

pub use quality::{QualityRating, RatingDetails, rate_conditions, score_wave_quality};
pub use stars::star_rating;
pub use tables::VerbalRating;

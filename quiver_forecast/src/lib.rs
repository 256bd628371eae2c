/// Quiver surf forecast core
///
/// Turns Open-Meteo marine and weather series into the data behind a surf
/// forecast dashboard: per-hour slots, daily wave peaks, current conditions,
/// and a 0–100 wave quality rating for each configured spot.
///
/// - `model`:    shared domain types and `ForecastError`
/// - `units`:    unit conversions and display formatting
/// - `spots`:    spot profiles (scoring geometry) and forecast locations
/// - `wind`:     wind direction relative to the coast, wind strength bands
/// - `scoring`:  wave quality scorer and quick star rating
/// - `forecast`: slot builder, daily aggregator, current conditions
/// - `ingest`:   Open-Meteo client
/// - `config`:   environment-driven service configuration
/// - `logging`:  structured console/file logging

pub mod config;
pub mod forecast;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod scoring;
pub mod spots;
pub mod units;
pub mod wind;

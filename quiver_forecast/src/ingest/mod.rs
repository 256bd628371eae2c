/// Upstream data acquisition.
///
/// - `open_meteo`: Open-Meteo marine and forecast API client.

pub mod open_meteo;

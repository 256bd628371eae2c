/// quiver_forecast: print a surf forecast for one spot
///
/// Usage: quiver_forecast [SPOT_NAME] [YYYY-MM-DD]
///
/// Without arguments, shows today at the default spot. If the requested day
/// is outside the forecast range, the first forecast day is shown instead.

use std::error::Error;

use chrono::{Local, NaiveDate};

use quiver_forecast::config::ServiceConfig;
use quiver_forecast::forecast::{
    build_day_aggregate, available_days, current_conditions, daily_max_wave_heights, display_slots,
};
use quiver_forecast::ingest::open_meteo::OpenMeteoClient;
use quiver_forecast::logging::{self, DataSource};
use quiver_forecast::model::{ConditionReading, ForecastError, TideState};
use quiver_forecast::scoring::{rate_conditions, star_rating};
use quiver_forecast::spots::{SPOT_LOCATIONS, SpotRegistry, default_location, find_location};
use quiver_forecast::units::{
    HeightUnit, MISSING_DASH, TempUnit, convert_height, convert_temp, format_value, wind_speed_kph,
};
use quiver_forecast::wind::nearest_octant;

fn main() -> Result<(), Box<dyn Error>> {
    let config = ServiceConfig::from_env()?;
    logging::init_logger(config.log_level, config.log_file.as_deref(), config.log_timestamps);

    let mut args = std::env::args().skip(1);
    let spot_arg = args.next();
    let date_arg = args
        .next()
        .map(|d| {
            NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .map_err(|_| ForecastError::ConfigError(format!("date must be YYYY-MM-DD, got '{}'", d)))
        })
        .transpose()?;

    let registry = match &config.spots_file {
        Some(path) => SpotRegistry::load(path)?,
        None => SpotRegistry::builtin(),
    };

    let location = match spot_arg.as_deref() {
        Some(name) => find_location(name).ok_or_else(|| {
            let known: Vec<_> = SPOT_LOCATIONS.iter().map(|l| l.name).collect();
            logging::error(DataSource::Config, None, &format!("known spots: {}", known.join(", ")));
            ForecastError::SpotNotFound(name.to_string())
        })?,
        None => default_location(),
    };
    let profile = registry.find(location.name).ok();
    if profile.is_none() {
        logging::info(
            DataSource::Scoring,
            Some(location.name),
            "No spot profile; showing star ratings only",
        );
    }

    let client = OpenMeteoClient::new(&config)?;
    let forecast = client.fetch_spot_forecast(location);

    // Open-Meteo answers in the spot's local time; the host clock is assumed
    // to run in the same zone.
    let now = Local::now().naive_local();

    println!();
    println!("{} ({:.4}, {:.4})", location.name, location.latitude, location.longitude);
    for (source, err) in &forecast.failures {
        println!("  ⚠ {} data unavailable: {}", source, err);
    }

    // Current conditions
    let current = current_conditions(&forecast.marine, &forecast.weather, &forecast.sun, now);
    println!();
    println!("Now ({})", now.format("%H:%M"));
    println!(
        "  Water {}   Air {}",
        temp_label(current.water_temp),
        temp_label(current.air_temp)
    );
    println!(
        "  Waves {} @ {} from {}",
        format_value(current.wave_height, 1, " m"),
        format_value(current.wave_period, 0, " s"),
        compass_label(current.wave_direction)
    );
    println!(
        "  Wind  {} km/h from {}",
        wind_speed_kph(current.wind_speed),
        compass_label(current.wind_direction)
    );
    println!(
        "  UV {}   Sunrise {}   Sunset {}",
        format_value(current.uv_index, 1, ""),
        clock_label(current.sunrise.as_deref()),
        clock_label(current.sunset.as_deref())
    );

    // Multi-day chart data
    println!();
    println!("Daily peak wave height");
    for peak in daily_max_wave_heights(&forecast.marine) {
        println!("  {}  {} m", peak.day, peak.wave);
    }

    // Day table
    let days = available_days(&forecast.marine);
    let requested = date_arg.unwrap_or_else(|| now.date());
    let Some(day) = days.iter().copied().find(|d| *d == requested).or_else(|| days.first().copied()) else {
        println!();
        println!("No marine forecast available.");
        return Ok(());
    };
    if day != requested {
        logging::warn(
            DataSource::Marine,
            Some(location.name),
            &format!("{} is outside the forecast range, showing {}", requested, day),
        );
    }

    let aggregate = build_day_aggregate(&forecast.marine, &forecast.weather, day);
    println!();
    println!(
        "{}   waves {} to {}",
        day.format("%A %Y-%m-%d"),
        format_value(aggregate.min_wave_height, 1, " m"),
        format_value(aggregate.max_wave_height, 1, " m")
    );

    for slot in display_slots(&aggregate.slots) {
        let stars = "★".repeat(star_rating(slot) as usize);
        let quality = profile
            .map(|p| {
                let rating = rate_conditions(p, &ConditionReading::from_slot(slot, TideState::Moving));
                format!("{:>6.2} {}", rating.final_score, rating.verbal_rating)
            })
            .unwrap_or_default();

        println!(
            "  {}  {:>6} {:>5}  wind {:>3} km/h {:<2}  {:<5} {}",
            slot.time,
            convert_height(slot.wave_height, HeightUnit::Meters)
                .map(|h| format!("{} {}", h, HeightUnit::Meters.label()))
                .unwrap_or_else(|| MISSING_DASH.to_string()),
            format_value(slot.period, 0, "s"),
            wind_speed_kph(slot.wind_speed),
            compass_label(slot.wind_direction),
            stars,
            quality
        );
    }

    Ok(())
}

fn temp_label(celsius: Option<f64>) -> String {
    convert_temp(celsius, TempUnit::Celsius)
        .map(|t| format!("{}°{}", t, TempUnit::Celsius.label()))
        .unwrap_or_else(|| MISSING_DASH.to_string())
}

fn compass_label(direction_deg: Option<f64>) -> String {
    match direction_deg {
        Some(deg) if deg.is_finite() => format!("{:?}", nearest_octant(deg)),
        _ => MISSING_DASH.to_string(),
    }
}

/// "2025-06-08T05:32" -> "05:32"
fn clock_label(stamp: Option<&str>) -> String {
    stamp
        .and_then(|s| s.split_once('T'))
        .map(|(_, time)| time.to_string())
        .unwrap_or_else(|| MISSING_DASH.to_string())
}

//! Synthetic flight-operations log generation.
//!
//! Lets the tool be demonstrated (and the engine exercised) without a real
//! operations export. Generation is fully deterministic for a given seed.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::Dataset;
use crate::domain::{DelayCategory, EventRecord, TimeOfDay};
use crate::error::AppError;

/// Destination pool for the generated log.
const ARRIVALS: [&str; 6] = ["SVO", "LED", "KZN", "AER", "OVB", "SVX"];

/// Generator parameters.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Last generated day; becomes the dataset's anchor date.
    pub anchor: NaiveDate,
    /// Number of calendar days, ending at `anchor`.
    pub days: u32,
    pub seed: u64,
    /// Mean flights per day before weekday seasonality.
    pub flights_per_day: f64,
}

/// Generate a synthetic operations log.
pub fn generate_log(config: &SampleConfig) -> Result<Dataset, AppError> {
    if config.days == 0 {
        return Err(AppError::new(2, "Sample day count must be > 0."));
    }
    if !(config.flights_per_day.is_finite() && config.flights_per_day >= 1.0) {
        return Err(AppError::new(2, "Flights per day must be a number >= 1."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let volume_noise = Normal::new(0.0, config.flights_per_day * 0.12)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let passenger_dist: Normal<f64> = Normal::new(150.0, 40.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let cargo_dist: Normal<f64> = Normal::new(2400.0, 500.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let start = config.anchor - Duration::days(i64::from(config.days) - 1);
    let mut records = Vec::new();

    let mut date = start;
    while date <= config.anchor {
        let base = config.flights_per_day * weekday_factor(date.weekday());
        let n = (base + volume_noise.sample(&mut rng)).round().max(1.0) as usize;

        for _ in 0..n {
            let hour = sample_hour(&mut rng);
            let passengers = passenger_dist.sample(&mut rng).round().clamp(20.0, 320.0) as u32;
            let cargo_kg = cargo_dist.sample(&mut rng).max(200.0);

            records.push(EventRecord {
                date,
                hour,
                passengers,
                cargo_kg,
                delay: sample_delay(&mut rng),
                cancelled: rng.gen_bool(0.02),
                arrival: ARRIVALS[rng.gen_range(0..ARRIVALS.len())].to_string(),
                time_of_day: TimeOfDay::from_hour(hour),
            });
        }
        date += Duration::days(1);
    }

    Ok(Dataset::from_records(records))
}

/// Weekend peaks, quiet Tuesdays: enough structure to make the
/// week-over-week comparisons interesting.
fn weekday_factor(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Mon => 1.0,
        Weekday::Tue => 0.85,
        Weekday::Wed => 0.9,
        Weekday::Thu => 1.0,
        Weekday::Fri => 1.15,
        Weekday::Sat => 0.95,
        Weekday::Sun => 1.15,
    }
}

/// Hours cluster around morning and evening banks.
fn sample_hour(rng: &mut StdRng) -> u8 {
    let bank: f64 = if rng.gen_bool(0.5) { 9.0 } else { 19.0 };
    let spread = 3.0 * (rng.r#gen::<f64>() - 0.5) * 2.0;
    (bank + spread).round().clamp(0.0, 23.0) as u8
}

fn sample_delay(rng: &mut StdRng) -> DelayCategory {
    let roll: f64 = rng.r#gen();
    if roll < 0.70 {
        DelayCategory::OnTime
    } else if roll < 0.88 {
        DelayCategory::Minor
    } else if roll < 0.96 {
        DelayCategory::Moderate
    } else {
        DelayCategory::Severe
    }
}

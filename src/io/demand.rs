// src/io/demand.rs

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use std::f64::consts::PI;

/// Generates a schedule where every day has the same demand.
/// Useful for replaying a known series through `ResetOptions`.
pub fn generate_constant_demand(days: usize, value: u32) -> Vec<u32> {
    vec![value; days]
}

/// Mean of the seasonal demand curve on day `t`.
pub fn seasonal_mean(t: usize, base: f64, amplitude: f64) -> f64 {
    base + amplitude * (2.0 * PI * t as f64 / 365.0).sin()
}

/// Generates daily demand as independent Poisson draws whose mean follows a
/// yearly sine curve.
///
/// # Arguments
/// * `rng` - The episode's random source.
/// * `days` - Number of days, including any buffer past the horizon.
/// * `base` - Mean demand level (e.g., 20.0).
/// * `amplitude` - Seasonal swing around the base (e.g., 10.0).
pub fn generate_seasonal_poisson<R: Rng + ?Sized>(
    rng: &mut R,
    days: usize,
    base: f64,
    amplitude: f64,
) -> Vec<u32> {
    let mut schedule = Vec::with_capacity(days);

    for t in 0..days {
        let mean = seasonal_mean(t, base, amplitude);

        // Poisson needs a positive rate; a curve dipping to zero means no demand.
        match Poisson::new(mean) {
            Ok(poisson) => {
                let draw: f64 = poisson.sample(rng);
                schedule.push(draw as u32);
            }
            Err(_) => schedule.push(0),
        }
    }

    schedule
}

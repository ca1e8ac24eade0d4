//! Ensemble diagnostics that only need a particle slice.

use crate::core::particle::Particle;
use crate::error::{Error, Result};
use crate::BOLTZMANN;
use serde::{Deserialize, Serialize};

/// One-shot summary of the gas state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub time: f64,
    pub total_energy: f64,
    pub temperature: f64,
    pub pressure: f64,
    pub mean_speed: f64,
    pub particle_count: usize,
}

/// A periodic sample recorded during `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub time: f64,
    pub total_energy: f64,
    pub temperature: f64,
    pub pressure: f64,
}

/// 2D kinetic temperature: mean of the per-particle m v^2 / (2 k_B). Zero for an empty ensemble.
pub fn kinetic_temperature(particles: &[Particle]) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    particles.iter().map(Particle::equivalent_temperature).sum::<f64>() / particles.len() as f64
}

pub fn mean_speed(particles: &[Particle]) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    particles.iter().map(Particle::speed).sum::<f64>() / particles.len() as f64
}

/// Histogram of particle speeds.
///
/// Returns `(edges, counts)` with `edges.len() == bins + 1`. With `range = None` the bins
/// span `[0, max speed]`. Speeds outside an explicit range are dropped; the top edge is
/// inclusive.
pub fn speed_histogram(
    particles: &[Particle],
    bins: usize,
    range: Option<(f64, f64)>,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if bins == 0 {
        return Err(Error::InvalidParam("bins must be > 0".into()));
    }
    let (lo, hi) = match range {
        Some((lo, hi)) => {
            if !lo.is_finite() || !hi.is_finite() || hi <= lo {
                return Err(Error::InvalidParam(
                    "histogram range must be finite with max > min".into(),
                ));
            }
            (lo, hi)
        }
        None => {
            let max = particles.iter().map(Particle::speed).fold(0.0_f64, f64::max);
            // All particles at rest still get a non-empty range.
            (0.0, if max > 0.0 { max } else { 1.0 })
        }
    };

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|b| lo + width * b as f64).collect();
    let mut counts = vec![0.0_f64; bins];
    for s in particles.iter().map(Particle::speed) {
        if s < lo || s > hi {
            continue;
        }
        let b = (((s - lo) / width) as usize).min(bins - 1);
        counts[b] += 1.0;
    }
    Ok((edges, counts))
}

/// 2D Maxwell-Boltzmann (Rayleigh) speed density at `temperature` for particles of `mass`.
pub fn rayleigh_density(speed: f64, temperature: f64, mass: f64) -> f64 {
    if speed < 0.0 || temperature <= 0.0 || mass <= 0.0 {
        return 0.0;
    }
    let sigma_sq = BOLTZMANN * temperature / mass;
    speed / sigma_sq * (-speed * speed / (2.0 * sigma_sq)).exp()
}

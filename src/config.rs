//! Construction parameters for a [`Simulation`](crate::core::Simulation).
//!
//! Every field only affects initialization or the default step size; nothing here can be
//! changed once the simulation exists.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default box edge (m).
pub const DEFAULT_BOX_SIZE: f64 = 1e-8;
/// Default number of particles.
pub const DEFAULT_PARTICLE_COUNT: usize = 10;
/// Default mean speed (m/s).
pub const DEFAULT_MEAN_SPEED: f64 = 1000.0;
/// Default integration step (s).
pub const DEFAULT_DT: f64 = 1e-13;
/// Default particle mass (kg), roughly one N2 molecule.
pub const DEFAULT_PARTICLE_MASS: f64 = 4.65e-26;
/// Default particle radius (m).
pub const DEFAULT_PARTICLE_RADIUS: f64 = 1e-10;

/// How initial speeds are drawn. Directions are always uniform on the circle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedDistribution {
    /// Every particle moves at exactly `mean_speed`.
    Fixed,
    /// Speed uniform in `mean_speed * (1 ± spread)`, `0 <= spread < 1`.
    Uniform { spread: f64 },
    /// Gaussian velocity components whose Rayleigh-distributed speed has mean `mean_speed`.
    #[default]
    MaxwellBoltzmann,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Box width (m, > 0).
    pub box_width: f64,
    /// Box height (m, > 0).
    pub box_height: f64,
    pub particle_count: usize,
    /// Mean initial speed (m/s, > 0).
    pub mean_speed: f64,
    /// Step size used by `Simulation::run` (s, > 0).
    pub dt: f64,
    /// Mass shared by every particle (kg, > 0).
    pub particle_mass: f64,
    /// Radius shared by every particle (m, >= 0, at most half the smaller box side).
    pub particle_radius: f64,
    pub speed_distribution: SpeedDistribution,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Keep a log of every realized collision.
    pub record_events: bool,
    /// Steps between history samples; 0 disables history.
    pub history_interval: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            box_width: DEFAULT_BOX_SIZE,
            box_height: DEFAULT_BOX_SIZE,
            particle_count: DEFAULT_PARTICLE_COUNT,
            mean_speed: DEFAULT_MEAN_SPEED,
            dt: DEFAULT_DT,
            particle_mass: DEFAULT_PARTICLE_MASS,
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            speed_distribution: SpeedDistribution::default(),
            seed: None,
            record_events: false,
            history_interval: 0,
        }
    }
}

impl SimConfig {
    /// Check every constraint, returning `Error::Configuration` on the first violation.
    pub fn validate(&self) -> Result<()> {
        validate_box(self.box_width, self.box_height)?;
        validate_dt(self.dt)?;
        if !self.mean_speed.is_finite() || self.mean_speed <= 0.0 {
            return Err(Error::Configuration(
                "mean_speed must be finite and > 0".into(),
            ));
        }
        if !self.particle_mass.is_finite() || self.particle_mass <= 0.0 {
            return Err(Error::Configuration(
                "particle_mass must be finite and > 0".into(),
            ));
        }
        validate_radius(self.particle_radius, self.box_width, self.box_height)?;
        if let SpeedDistribution::Uniform { spread } = self.speed_distribution {
            if !spread.is_finite() || !(0.0..1.0).contains(&spread) {
                return Err(Error::Configuration(
                    "uniform speed spread must lie in [0, 1)".into(),
                ));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_box(width: f64, height: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(Error::Configuration(
            "box_width must be finite and > 0".into(),
        ));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::Configuration(
            "box_height must be finite and > 0".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_dt(dt: f64) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::Configuration("dt must be finite and > 0".into()));
    }
    Ok(())
}

pub(crate) fn validate_radius(radius: f64, width: f64, height: f64) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(Error::Configuration(
            "particle_radius must be finite and >= 0".into(),
        ));
    }
    if 2.0 * radius > width.min(height) {
        return Err(Error::Configuration(
            "particle diameter must not exceed the smaller box side".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() -> Result<()> {
        SimConfig::default().validate()
    }

    #[test]
    fn non_positive_box_rejected() {
        let cfg = SimConfig {
            box_height: 0.0,
            ..SimConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("box_height"));
    }

    #[test]
    fn oversized_radius_rejected() {
        let cfg = SimConfig {
            particle_radius: 0.6e-8,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn bad_uniform_spread_rejected() {
        let cfg = SimConfig {
            speed_distribution: SpeedDistribution::Uniform { spread: 1.0 },
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{
            "particle_count": 50,
            "speed_distribution": { "kind": "uniform", "spread": 0.1 }
        }"#;
        let cfg: SimConfig = serde_json::from_str(json).expect("valid config json");
        assert_eq!(cfg.particle_count, 50);
        assert_eq!(
            cfg.speed_distribution,
            SpeedDistribution::Uniform { spread: 0.1 }
        );
        assert_eq!(cfg.box_width, DEFAULT_BOX_SIZE);
        assert_eq!(cfg.dt, DEFAULT_DT);
        assert!(cfg.validate().is_ok());
    }
}

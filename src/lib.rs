//! Time-stepped simulation of a 2D ideal gas of hard disks in a rectangular box.
//!
//! Each step moves every disk in free flight, reflects disks off the walls and resolves
//! overlapping pairs with an elastic impulse. Kinetic energy, temperature and pressure
//! are derived from the resulting microstate.
//!
//! ```no_run
//! use gassim2d::{SimConfig, Simulation};
//!
//! # fn main() -> gassim2d::Result<()> {
//! let mut sim = Simulation::new(&SimConfig {
//!     particle_count: 50,
//!     seed: Some(7),
//!     ..SimConfig::default()
//! })?;
//! sim.run(1_000)?;
//! println!("T = {:.1} K, P = {:e} Pa", sim.temperature(), sim.pressure());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;

pub use crate::config::{SimConfig, SpeedDistribution};
pub use crate::core::{Particle, Simulation};
pub use crate::error::{Error, Result};

/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380649e-23;

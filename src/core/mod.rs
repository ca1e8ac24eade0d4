//! Hard-disk gas engine: particles, the two collision resolvers and the time-stepped
//! simulation that drives them.

pub mod collision;
pub mod event;
pub mod particle;
pub mod sim;
pub mod stats;
pub mod wall;

pub use collision::{overlapping, resolve_pair, PairOutcome};
pub use event::{Event, EventKind};
pub use particle::{Particle, DIM};
pub use sim::{default_particle, Simulation};
pub use stats::{rayleigh_density, speed_histogram, HistorySample, Statistics};
pub use wall::{resolve_wall_contacts, wall_axis_side, WallHit, NUM_WALLS};

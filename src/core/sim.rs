use crate::config::{validate_box, validate_dt, validate_radius, SimConfig, SpeedDistribution};
use crate::config::{DEFAULT_DT, DEFAULT_PARTICLE_MASS, DEFAULT_PARTICLE_RADIUS};
use crate::core::collision::{overlapping, resolve_pair, PairOutcome};
use crate::core::particle::{dot, sub, DIM};
use crate::core::stats::{self, HistorySample, Statistics};
use crate::core::wall::{resolve_wall_contacts, wall_axis_side, NUM_WALLS};
use crate::core::{Event, EventKind, Particle};
use crate::error::{Error, Result};
use crate::BOLTZMANN;
use log::{debug, info, warn};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::collections::HashSet;
use std::f64::consts::{FRAC_2_PI, TAU};

/// Rejection-sampling budget per particle before placement gives up on non-overlap.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Time-stepped hard-disk gas in a static axis-aligned 2D box.
///
/// Each step runs free flight for every particle, then wall reflection for every particle,
/// then one pass over all unordered pairs in ascending index order. The pair pass is
/// O(N^2); this engine targets tens to low hundreds of particles.
///
/// Walls are indexed as in [`wall_axis_side`]: 0/1 are the x min/max walls, 2/3 the y
/// min/max walls.
#[derive(Debug)]
pub struct Simulation {
    time_now: f64,
    box_size: [f64; DIM],
    particles: Vec<Particle>,
    dt: f64,
    /// Impulse delivered to the walls since `window_start`.
    wall_impulse: f64,
    window_start: f64,
    steps_taken: u64,
    wall_bounces: u64,
    pair_collisions: u64,
    record_events: bool,
    events: Vec<Event>,
    history_interval: usize,
    history: Vec<HistorySample>,
}

impl Simulation {
    /// Create a gas of `config.particle_count` identical disks at random positions.
    ///
    /// Positions are rejection sampled inside `[radius, L - radius]` on each axis to avoid
    /// overlap with already placed disks. When the attempt budget runs out the last
    /// candidate is kept anyway and a warning is logged. Directions are uniform; speeds
    /// follow `config.speed_distribution`.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let box_size = [config.box_width, config.box_height];
        let radius = config.particle_radius;

        let mut rng: StdRng = match config.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        let sampler = VelocitySampler::new(config.mean_speed, config.speed_distribution)?;

        let count = u32::try_from(config.particle_count)
            .map_err(|_| Error::Configuration("particle_count exceeds u32 ids".into()))?;
        let mut particles: Vec<Particle> = Vec::with_capacity(config.particle_count);
        for id in 0..count {
            let mut attempts = 0usize;
            let r = loop {
                attempts += 1;
                let mut r = [0.0_f64; DIM];
                for (k, r_k) in r.iter_mut().enumerate() {
                    *r_k = rng.random_range(radius..=box_size[k] - radius);
                }
                if !overlaps_existing(&particles, &r, radius) {
                    break r;
                }
                if attempts >= MAX_PLACEMENT_ATTEMPTS {
                    warn!(
                        "particle {} placed with overlap after {} attempts; box may be too crowded",
                        id, attempts
                    );
                    break r;
                }
            };
            let v = sampler.sample(&mut rng);
            particles.push(Particle::new(id, r, v, radius, config.particle_mass)?);
        }

        let sim = Self::assemble(box_size, particles, config.dt)
            .with_event_recording(config.record_events)
            .with_history_interval(config.history_interval);
        info!(
            "initialized gas: n={}, box={:?}, T={:.3} K",
            sim.num_particles(),
            sim.box_size,
            sim.temperature()
        );
        Ok(sim)
    }

    /// Shorthand for [`Simulation::new`] with default mass, radius and step size.
    pub fn initialize_random_gas(
        n: usize,
        width: f64,
        height: f64,
        mean_speed: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        Self::new(&SimConfig {
            box_width: width,
            box_height: height,
            particle_count: n,
            mean_speed,
            seed,
            ..SimConfig::default()
        })
    }

    /// Build a simulation around explicitly constructed particles.
    ///
    /// Every particle must fit inside the box: `radius <= r_k <= L_k - radius`. All
    /// particles share one mass and ids must be unique.
    pub fn from_particles(width: f64, height: f64, particles: Vec<Particle>) -> Result<Self> {
        validate_box(width, height)?;
        let box_size = [width, height];
        let mut ids = HashSet::with_capacity(particles.len());
        for p in &particles {
            if !ids.insert(p.id) {
                return Err(Error::Configuration(format!("duplicate particle id {}", p.id)));
            }
            if p.mass != particles[0].mass {
                return Err(Error::Configuration(format!(
                    "particle {} has mass {:e}; all particles must share mass {:e}",
                    p.id, p.mass, particles[0].mass
                )));
            }
            validate_radius(p.radius, width, height)?;
            for k in 0..DIM {
                if p.r[k] < p.radius || p.r[k] > box_size[k] - p.radius {
                    return Err(Error::Configuration(format!(
                        "particle {} lies outside the box on axis {}",
                        p.id, k
                    )));
                }
            }
        }
        Ok(Self::assemble(box_size, particles, DEFAULT_DT))
    }

    fn assemble(box_size: [f64; DIM], particles: Vec<Particle>, dt: f64) -> Self {
        Self {
            time_now: 0.0,
            box_size,
            particles,
            dt,
            wall_impulse: 0.0,
            window_start: 0.0,
            steps_taken: 0,
            wall_bounces: 0,
            pair_collisions: 0,
            record_events: false,
            events: Vec::new(),
            history_interval: 0,
            history: Vec::new(),
        }
    }

    /// Record every realized collision into [`Simulation::events`].
    pub fn with_event_recording(mut self, on: bool) -> Self {
        self.record_events = on;
        self
    }

    /// Append a [`HistorySample`] every `interval` steps (0 disables).
    pub fn with_history_interval(mut self, interval: usize) -> Self {
        self.history_interval = interval;
        self
    }

    /// Returns elapsed simulated time.
    pub fn elapsed_time(&self) -> f64 {
        self.time_now
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.v).collect()
    }

    pub fn box_size(&self) -> [f64; DIM] {
        self.box_size
    }

    pub fn area(&self) -> f64 {
        self.box_size.iter().product()
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * self.box_size.iter().sum::<f64>()
    }

    /// Configured step size used by [`Simulation::run`].
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Steps completed since construction.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Realized (wall bounces, pair collisions) since construction.
    pub fn collision_counts(&self) -> (u64, u64) {
        (self.wall_bounces, self.pair_collisions)
    }

    /// Advance `steps` steps of size `dt`.
    ///
    /// Errors: `Error::Configuration` if `dt` is not finite and > 0. Nothing is mutated
    /// in that case.
    pub fn advance(&mut self, steps: usize, dt: f64) -> Result<()> {
        validate_dt(dt)?;
        debug!(
            "advance: steps={}, dt={:e}, t={:e}",
            steps, dt, self.time_now
        );
        for _ in 0..steps {
            self.step(dt)?;
        }
        Ok(())
    }

    /// Advance `steps` steps of the configured size.
    pub fn run(&mut self, steps: usize) -> Result<()> {
        self.advance(steps, self.dt)
    }

    /// Total kinetic energy (J).
    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total linear momentum (kg m/s).
    pub fn total_momentum(&self) -> [f64; DIM] {
        let mut total = [0.0_f64; DIM];
        for p in &self.particles {
            for (tk, pk) in total.iter_mut().zip(p.linear_momentum()) {
                *tk += pk;
            }
        }
        total
    }

    /// Kinetic temperature of a 2D gas: m <v^2> / (2 k_B).
    pub fn temperature(&self) -> f64 {
        stats::kinetic_temperature(&self.particles)
    }

    pub fn mean_speed(&self) -> f64 {
        stats::mean_speed(&self.particles)
    }

    /// Mechanical pressure from wall impulses: impulse delivered to all four walls since
    /// the last [`Simulation::reset_pressure_tally`] divided by perimeter times the elapsed
    /// window. Zero until time has advanced in the window.
    pub fn pressure(&self) -> f64 {
        let window = self.time_now - self.window_start;
        if window <= 0.0 {
            return 0.0;
        }
        self.wall_impulse / (self.perimeter() * window)
    }

    /// Pressure implied by the ideal-gas law at the current temperature: N k_B T / A.
    pub fn ideal_gas_pressure(&self) -> f64 {
        self.num_particles() as f64 * BOLTZMANN * self.temperature() / self.area()
    }

    /// Start a new pressure measurement window at the current time.
    pub fn reset_pressure_tally(&mut self) {
        self.wall_impulse = 0.0;
        self.window_start = self.time_now;
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            time: self.time_now,
            total_energy: self.total_kinetic_energy(),
            temperature: self.temperature(),
            pressure: self.pressure(),
            mean_speed: self.mean_speed(),
            particle_count: self.num_particles(),
        }
    }

    pub fn history(&self) -> &[HistorySample] {
        &self.history
    }

    /// Recorded collisions in time order. Empty unless event recording is on.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// `(time, impulse, wall_id)` for recorded wall bounces, optionally limited to the
    /// trailing `window`.
    pub fn wall_impulse_history(&self, window: Option<f64>) -> Result<Vec<(f64, f64, u32)>> {
        let start = match window {
            Some(w) => self.window_start_index(w)?,
            None => 0,
        };
        Ok(self.events[start..]
            .iter()
            .filter_map(|e| e.wall_id().map(|w| (e.time_f64(), e.impulse_f64(), w)))
            .collect())
    }

    /// Windowed pressure on a single wall from recorded bounces: impulse on `wall_id` during
    /// the trailing `window` divided by wall length times the covered time, which is `window`
    /// or the elapsed time if that is shorter.
    ///
    /// Errors:
    /// - `Error::InvalidParam` for a bad window or wall id.
    /// - `Error::DiagnosticInsufficientSamples` if recording is off or the wall saw no bounce.
    pub fn mechanical_pressure(&self, window: f64, wall_id: u32) -> Result<f64> {
        if wall_id >= NUM_WALLS {
            return Err(Error::InvalidParam(format!(
                "wall_id must be in [0, {}), got {}",
                NUM_WALLS, wall_id
            )));
        }
        if !self.record_events {
            return Err(Error::DiagnosticInsufficientSamples(
                "event recording is disabled".into(),
            ));
        }
        let start = self.window_start_index(window)?;
        let mut impulse = 0.0;
        let mut hits = 0usize;
        for e in &self.events[start..] {
            if e.wall_id() == Some(wall_id) {
                impulse += e.impulse_f64();
                hits += 1;
            }
        }
        if hits == 0 {
            return Err(Error::DiagnosticInsufficientSamples(format!(
                "no bounces on wall {} in the last {:e} s",
                wall_id, window
            )));
        }
        let (axis, _) = wall_axis_side(wall_id);
        let length: f64 = self
            .box_size
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != axis)
            .map(|(_, &l)| l)
            .product();
        Ok(impulse / (length * window.min(self.time_now)))
    }

    /// Multiply every velocity by `factor`. Temperature scales with `factor^2`.
    pub fn scale_velocities(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(Error::InvalidParam(
                "velocity scale factor must be finite and >= 0".into(),
            ));
        }
        for p in &mut self.particles {
            p.v.iter_mut().for_each(|x| *x *= factor);
        }
        Ok(())
    }

    /// Verify `radius <= r_k <= L_k - radius` for every particle.
    pub fn check_confinement(&self) -> Result<()> {
        for p in &self.particles {
            for k in 0..DIM {
                if p.r[k] < p.radius || p.r[k] > self.box_size[k] - p.radius {
                    return Err(Error::OutOfBounds(format!(
                        "particle {} at {:?} outside box {:?}",
                        p.id, p.r, self.box_size
                    )));
                }
            }
        }
        Ok(())
    }

    // ============ Internal helpers ============

    fn step(&mut self, dt: f64) -> Result<()> {
        let t_end = self.time_now + dt;
        let batch = self.events.len();

        for p in &mut self.particles {
            p.advance_free_flight(dt);
        }

        for p in &mut self.particles {
            for hit in resolve_wall_contacts(p, &self.box_size).into_iter().flatten() {
                self.wall_impulse += hit.impulse;
                self.wall_bounces += 1;
                if self.record_events {
                    let kind = EventKind::P2W {
                        i: p.id,
                        wall_id: hit.wall_id,
                    };
                    self.events.push(Event::new(t_end, kind, hit.impulse)?);
                }
            }
        }

        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.particles.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if !overlapping(a, b) {
                    continue;
                }
                if let PairOutcome::Resolved { impulse } = resolve_pair(a, b) {
                    self.pair_collisions += 1;
                    if self.record_events {
                        let kind = EventKind::P2P { i: a.id, j: b.id };
                        self.events.push(Event::new(t_end, kind, impulse)?);
                    }
                }
            }
        }

        // Every event of this step shares `t_end`; order the batch by kind and ids.
        self.events[batch..].sort();

        self.time_now = t_end;
        self.steps_taken += 1;
        if self.history_interval > 0 && self.steps_taken % self.history_interval as u64 == 0 {
            self.history.push(HistorySample {
                time: self.time_now,
                total_energy: self.total_kinetic_energy(),
                temperature: self.temperature(),
                pressure: self.pressure(),
            });
        }
        Ok(())
    }

    /// Index of the first event strictly inside the trailing `window`.
    fn window_start_index(&self, window: f64) -> Result<usize> {
        if !window.is_finite() || window <= 0.0 {
            return Err(Error::InvalidParam(
                "window must be a positive finite float".into(),
            ));
        }
        let cutoff = self.time_now - window;
        Ok(self.events.partition_point(|e| e.time_f64() <= cutoff))
    }
}

/// Draws initial velocities with a uniformly random direction.
#[derive(Debug)]
enum VelocitySampler {
    Speed { lo: f64, hi: f64 },
    Gaussian(Normal<f64>),
}

impl VelocitySampler {
    fn new(mean_speed: f64, dist: SpeedDistribution) -> Result<Self> {
        Ok(match dist {
            SpeedDistribution::Fixed => VelocitySampler::Speed {
                lo: mean_speed,
                hi: mean_speed,
            },
            SpeedDistribution::Uniform { spread } => VelocitySampler::Speed {
                lo: mean_speed * (1.0 - spread),
                hi: mean_speed * (1.0 + spread),
            },
            SpeedDistribution::MaxwellBoltzmann => {
                // Rayleigh mean speed is sigma * sqrt(pi / 2).
                let sigma = mean_speed * FRAC_2_PI.sqrt();
                let normal = Normal::new(0.0, sigma)
                    .map_err(|e| Error::Configuration(format!("speed distribution: {e}")))?;
                VelocitySampler::Gaussian(normal)
            }
        })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; DIM] {
        match self {
            VelocitySampler::Speed { lo, hi } => {
                let speed = rng.random_range(*lo..=*hi);
                let angle = rng.random_range(0.0..TAU);
                [speed * angle.cos(), speed * angle.sin()]
            }
            VelocitySampler::Gaussian(normal) => [normal.sample(rng), normal.sample(rng)],
        }
    }
}

fn overlaps_existing(existing: &[Particle], r: &[f64; DIM], radius: f64) -> bool {
    let min_sq = (2.0 * radius) * (2.0 * radius);
    existing.iter().any(|p| {
        let d = sub(r, &p.r);
        dot(&d, &d) < min_sq
    })
}

/// A single particle with default mass and radius; handy for deterministic scenarios.
pub fn default_particle(id: u32, r: [f64; DIM], v: [f64; DIM]) -> Result<Particle> {
    Particle::new(id, r, v, DEFAULT_PARTICLE_RADIUS, DEFAULT_PARTICLE_MASS)
}

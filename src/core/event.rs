use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// Kinds of realized collisions recorded during a step.
///
/// Tie-breaking for deterministic ordering prefers `P2P` < `P2W` when times are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Particle-to-particle collision between particles `i` and `j`.
    P2P { i: u32, j: u32 },
    /// Particle-to-wall collision for particle `i` and wall `wall_id`.
    P2W { i: u32, wall_id: u32 },
}

impl EventKind {
    #[inline]
    fn order_key(&self) -> (u8, u32, u32) {
        match *self {
            EventKind::P2P { i, j } => (0, i, j),
            EventKind::P2W { i, wall_id } => (1, i, wall_id),
        }
    }
}

/// A recorded collision.
///
/// - `time`: end-of-step time at which the collision was resolved (finite, non-NaN).
/// - `kind`: event kind and participants.
/// - `impulse`: magnitude of the momentum exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: NotNan<f64>,
    pub kind: EventKind,
    pub impulse: NotNan<f64>,
}

impl Event {
    /// Create a new event, validating that time and impulse are finite.
    pub fn new(time: f64, kind: EventKind, impulse: f64) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidParam("event time must be finite".into()));
        }
        if !impulse.is_finite() {
            return Err(Error::InvalidParam("event impulse must be finite".into()));
        }
        let time = NotNan::new(time)
            .map_err(|_| Error::InvalidParam("event time cannot be NaN".into()))?;
        let impulse = NotNan::new(impulse)
            .map_err(|_| Error::InvalidParam("event impulse cannot be NaN".into()))?;
        Ok(Self {
            time,
            kind,
            impulse,
        })
    }

    /// Returns the raw f64 event time.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }

    #[inline]
    pub fn impulse_f64(&self) -> f64 {
        self.impulse.into_inner()
    }

    /// Wall id if this is a wall bounce.
    #[inline]
    pub fn wall_id(&self) -> Option<u32> {
        match self.kind {
            EventKind::P2W { wall_id, .. } => Some(wall_id),
            EventKind::P2P { .. } => None,
        }
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => match self.kind.order_key().cmp(&other.kind.order_key()) {
                Ordering::Equal => self.impulse.cmp(&other.impulse),
                o => o,
            },
            o => o,
        }
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

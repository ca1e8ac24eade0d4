use crate::error::{Error, Result};
use crate::BOLTZMANN;
use serde::{Deserialize, Serialize};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// A hard disk.
///
/// Fields:
/// - `id`: stable identifier, bookkeeping only
/// - `r`: position vector [x, y] (m)
/// - `v`: velocity vector [vx, vy] (m/s)
/// - `radius`: disk radius (>= 0, m)
/// - `mass`: particle mass (> 0, kg)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Stable particle identifier.
    pub id: u32,
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Disk radius (>= 0).
    pub radius: f64,
    /// Mass (> 0).
    pub mass: f64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `mass` is non-positive, `radius` is negative, or any value is NaN/inf.
    pub fn new(id: u32, r: [f64; DIM], v: [f64; DIM], radius: f64, mass: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParam("radius must be finite and >= 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            id,
            r,
            v,
            radius,
            mass,
        })
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.speed_squared()
    }

    /// Temperature this particle alone would imply in 2D: m |v|^2 / (2 k_B).
    #[inline]
    pub fn equivalent_temperature(&self) -> f64 {
        self.mass * self.speed_squared() / (2.0 * BOLTZMANN)
    }

    /// Returns the linear momentum m v.
    #[inline]
    pub fn linear_momentum(&self) -> [f64; DIM] {
        scale(&self.v, self.mass)
    }

    #[inline]
    pub fn speed_squared(&self) -> f64 {
        dot(&self.v, &self.v)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed_squared().sqrt()
    }

    /// Ballistic motion: r += v dt. No boundary or contact handling happens here.
    #[inline]
    pub fn advance_free_flight(&mut self, dt: f64) {
        for (rk, &vk) in self.r.iter_mut().zip(self.v.iter()) {
            *rk += vk * dt;
        }
    }

    /// Distance between the two centers.
    #[inline]
    pub fn distance_to(&self, other: &Particle) -> f64 {
        let d = sub(&other.r, &self.r);
        dot(&d, &d).sqrt()
    }

    /// Set position (validated as finite).
    pub fn set_position(&mut self, r: [f64; DIM]) -> Result<()> {
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        self.r = r;
        Ok(())
    }

    /// Set velocity (validated as finite).
    pub fn set_velocity(&mut self, v: [f64; DIM]) -> Result<()> {
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        self.v = v;
        Ok(())
    }
}

// ============ Vector helpers ============

#[inline]
pub(crate) fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub(crate) fn sub(a: &[f64; DIM], b: &[f64; DIM]) -> [f64; DIM] {
    let mut out = [0.0_f64; DIM];
    for ((ok, &ak), &bk) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *ok = ak - bk;
    }
    out
}

#[inline]
pub(crate) fn scale(a: &[f64; DIM], s: f64) -> [f64; DIM] {
    let mut out = *a;
    out.iter_mut().for_each(|x| *x *= s);
    out
}

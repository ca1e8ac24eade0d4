//! Specular reflection against the four static walls of the box.
//!
//! Walls are indexed like planes of an axis-aligned box: for axis k, wall_id = 2*k is the
//! min wall (x_k = 0) and wall_id = 2*k+1 is the max wall (x_k = L_k).

use crate::core::particle::{Particle, DIM};

/// A realized bounce on one wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub wall_id: u32,
    /// Momentum delivered to the wall: m |Δv_n| = 2 m |v_n|.
    pub impulse: f64,
}

/// Enforce confinement of `p` after free flight.
///
/// Each axis is checked on its own so a corner overshoot reflects on both axes in one call.
/// An overshooting particle is clamped onto the contact plane; its normal velocity is set
/// to point back into the box. Only a particle that was moving outward bounces (and reports
/// an impulse); one already heading inward is clamped without touching its velocity.
///
/// Precondition: `2 * p.radius <= box_size[k]` for every axis.
pub fn resolve_wall_contacts(p: &mut Particle, box_size: &[f64; DIM]) -> [Option<WallHit>; DIM] {
    let mut hits = [None; DIM];
    for (k, hit) in hits.iter_mut().enumerate() {
        let lo = p.radius;
        let hi = box_size[k] - p.radius;
        if p.r[k] < lo {
            p.r[k] = lo;
            if p.v[k] < 0.0 {
                *hit = Some(bounce(p, k, 2 * k as u32));
            }
        } else if p.r[k] > hi {
            p.r[k] = hi;
            if p.v[k] > 0.0 {
                *hit = Some(bounce(p, k, 2 * k as u32 + 1));
            }
        }
    }
    hits
}

#[inline]
fn bounce(p: &mut Particle, axis: usize, wall_id: u32) -> WallHit {
    let impulse = 2.0 * p.mass * p.v[axis].abs();
    p.v[axis] = -p.v[axis];
    WallHit { wall_id, impulse }
}

/// Map a wall id to (axis, is_max).
#[inline]
pub fn wall_axis_side(wall_id: u32) -> (usize, bool) {
    let axis = (wall_id / 2) as usize;
    let is_max = wall_id % 2 == 1;
    (axis, is_max)
}

/// Number of walls of the box.
pub const NUM_WALLS: u32 = 2 * DIM as u32;

//! Elastic hard-disk collisions between two particles.

use crate::core::particle::{dot, sub, Particle, DIM};

/// Restitution coefficient; 1 means perfectly elastic.
const RESTITUTION: f64 = 1.0;

/// Outcome of [`resolve_pair`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Centers coincide; the contact normal is undefined and nothing was changed.
    Coincident,
    /// The pair is already moving apart along the normal; nothing was changed.
    Receding,
    /// Velocities were updated by an impulse of magnitude `impulse` along the normal.
    Resolved { impulse: f64 },
}

/// True when the centers are no farther apart than the sum of the radii.
#[inline]
pub fn overlapping(a: &Particle, b: &Particle) -> bool {
    let d = sub(&b.r, &a.r);
    let r_sum = a.radius + b.radius;
    dot(&d, &d) <= r_sum * r_sum
}

/// Exchange the normal impulse of an elastic collision between `a` and `b`.
///
/// The normal points from `a` to `b`; tangential components are untouched. Geometry is
/// not checked here, callers test [`overlapping`] first. Positions are never modified.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle) -> PairOutcome {
    let mut n = sub(&b.r, &a.r);
    let dist = dot(&n, &n).sqrt();
    if dist == 0.0 {
        return PairOutcome::Coincident;
    }
    n.iter_mut().for_each(|nk| *nk /= dist);

    let u = sub(&b.v, &a.v);
    let u_n = dot(&u, &n);
    if u_n >= 0.0 {
        return PairOutcome::Receding;
    }

    let j = -(1.0 + RESTITUTION) * u_n / (1.0 / a.mass + 1.0 / b.mass);
    let (fa, fb) = (j / a.mass, j / b.mass);
    for k in 0..DIM {
        a.v[k] -= fa * n[k];
        b.v[k] += fb * n[k];
    }
    PairOutcome::Resolved { impulse: j }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn pair(
        ra: [f64; DIM],
        va: [f64; DIM],
        rb: [f64; DIM],
        vb: [f64; DIM],
        mb: f64,
    ) -> Result<(Particle, Particle)> {
        Ok((
            Particle::new(0, ra, va, 1e-10, 1e-26)?,
            Particle::new(1, rb, vb, 1e-10, mb)?,
        ))
    }

    #[test]
    fn head_on_equal_masses_swap_velocities() -> Result<()> {
        let (mut a, mut b) = pair(
            [0.2e-8, 0.5e-8],
            [100.0, 0.0],
            [0.3e-8, 0.5e-8],
            [-100.0, 0.0],
            1e-26,
        )?;
        let e0 = a.kinetic_energy() + b.kinetic_energy();
        let out = resolve_pair(&mut a, &mut b);
        assert!(matches!(out, PairOutcome::Resolved { .. }));
        let e1 = a.kinetic_energy() + b.kinetic_energy();
        assert!((e1 - e0).abs() < 1e-20);
        assert!((a.v[0] + 100.0).abs() < 1e-9 && a.v[1].abs() < 1e-9);
        assert!((b.v[0] - 100.0).abs() < 1e-9 && b.v[1].abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn oblique_unequal_masses_conserve_momentum_and_energy() -> Result<()> {
        let (mut a, mut b) = pair(
            [0.0, 0.0],
            [300.0, 40.0],
            [1.5e-10, 0.8e-10],
            [-20.0, -90.0],
            3e-26,
        )?;
        assert!(overlapping(&a, &b));
        let p0 = [
            a.linear_momentum()[0] + b.linear_momentum()[0],
            a.linear_momentum()[1] + b.linear_momentum()[1],
        ];
        let e0 = a.kinetic_energy() + b.kinetic_energy();
        let out = resolve_pair(&mut a, &mut b);
        assert!(matches!(out, PairOutcome::Resolved { impulse } if impulse > 0.0));
        let p1 = [
            a.linear_momentum()[0] + b.linear_momentum()[0],
            a.linear_momentum()[1] + b.linear_momentum()[1],
        ];
        let e1 = a.kinetic_energy() + b.kinetic_energy();
        assert!((p1[0] - p0[0]).abs() < 1e-35);
        assert!((p1[1] - p0[1]).abs() < 1e-35);
        assert!(((e1 - e0) / e0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn tangential_component_untouched() -> Result<()> {
        // Normal along x; the y components must survive the exchange.
        let (mut a, mut b) = pair([0.0, 0.0], [50.0, 7.0], [1e-10, 0.0], [-50.0, -3.0], 1e-26)?;
        resolve_pair(&mut a, &mut b);
        assert!((a.v[1] - 7.0).abs() < 1e-12);
        assert!((b.v[1] + 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn receding_pair_is_skipped() -> Result<()> {
        let (mut a, mut b) = pair([0.0, 0.0], [-10.0, 0.0], [1e-10, 0.0], [10.0, 0.0], 1e-26)?;
        let before = (a.v, b.v);
        assert_eq!(resolve_pair(&mut a, &mut b), PairOutcome::Receding);
        assert_eq!((a.v, b.v), before);
        Ok(())
    }

    #[test]
    fn coincident_centers_are_skipped() -> Result<()> {
        let (mut a, mut b) = pair([1e-9, 1e-9], [10.0, 0.0], [1e-9, 1e-9], [-10.0, 0.0], 1e-26)?;
        assert!(overlapping(&a, &b));
        assert_eq!(resolve_pair(&mut a, &mut b), PairOutcome::Coincident);
        assert_eq!(a.v, [10.0, 0.0]);
        assert_eq!(b.v, [-10.0, 0.0]);
        Ok(())
    }

    #[test]
    fn overlap_detection_uses_radius_sum() -> Result<()> {
        let (a, b) = pair([0.0, 0.0], [0.0, 0.0], [2e-10, 0.0], [0.0, 0.0], 1e-26)?;
        assert!(overlapping(&a, &b));
        let (c, d) = pair([0.0, 0.0], [0.0, 0.0], [2.1e-10, 0.0], [0.0, 0.0], 1e-26)?;
        assert!(!overlapping(&c, &d));
        Ok(())
    }
}

use gassim2d::core::{default_particle, resolve_pair, PairOutcome, Particle};
use gassim2d::{Result, SimConfig, Simulation};

/// Total kinetic energy stays within 1% over many steps of a 50-particle gas.
#[test]
fn energy_conserved_over_many_steps() -> Result<()> {
    let mut sim = Simulation::new(&SimConfig {
        particle_count: 50,
        mean_speed: 1000.0,
        seed: Some(12345),
        ..SimConfig::default()
    })?;
    let e0 = sim.total_kinetic_energy();
    assert!(e0 > 0.0, "initial energy must be positive");

    for _ in 0..20 {
        sim.advance(100, 1e-13)?;
        let e = sim.total_kinetic_energy();
        let rel = ((e - e0) / e0).abs();
        assert!(rel < 0.01, "relative energy drift {rel} (E0={e0}, E={e})");
    }
    let (walls, pairs) = sim.collision_counts();
    assert!(walls > 0, "expected wall bounces over 2e-10 s");
    assert!(pairs > 0, "expected pair collisions in a 50-particle gas");
    Ok(())
}

/// Two particles far from every wall collide once; momentum is unchanged.
#[test]
fn momentum_conserved_in_isolated_pair_collision() -> Result<()> {
    let a = default_particle(0, [0.3e-8, 0.5e-8], [200.0, 10.0])?;
    let b = default_particle(1, [0.7e-8, 0.5e-8], [-200.0, 0.0])?;
    let mut sim = Simulation::from_particles(1e-8, 1e-8, vec![a, b])?;
    let p0 = sim.total_momentum();
    let scale = sim.particles()[0].mass * 200.0;
    let e0 = sim.total_kinetic_energy();

    sim.advance(2_000, 1e-14)?;

    assert_eq!(sim.collision_counts(), (0, 1), "expected exactly one pair collision");
    let p1 = sim.total_momentum();
    for k in 0..2 {
        assert!(
            (p1[k] - p0[k]).abs() < 1e-20,
            "momentum component {k} changed: {} -> {}",
            p0[k],
            p1[k]
        );
        assert!((p1[k] - p0[k]).abs() <= 1e-12 * scale);
    }
    assert!(((sim.total_kinetic_energy() - e0) / e0).abs() < 1e-12);
    Ok(())
}

/// Head-on collision of equal masses exchanges velocities exactly.
#[test]
fn head_on_collision_swaps_velocities() -> Result<()> {
    let mut a = Particle::new(0, [0.2e-8, 0.5e-8], [100.0, 0.0], 1e-10, 1e-26)?;
    let mut b = Particle::new(1, [0.3e-8, 0.5e-8], [-100.0, 0.0], 1e-10, 1e-26)?;
    let e0 = a.kinetic_energy() + b.kinetic_energy();

    let outcome = resolve_pair(&mut a, &mut b);
    assert!(matches!(outcome, PairOutcome::Resolved { .. }));

    let e1 = a.kinetic_energy() + b.kinetic_energy();
    assert!((e1 - e0).abs() < 1e-20, "energy changed: {e0} -> {e1}");
    assert!((a.v[0] + 100.0).abs() < 1e-9 && a.v[1] == 0.0, "a.v = {:?}", a.v);
    assert!((b.v[0] - 100.0).abs() < 1e-9 && b.v[1] == 0.0, "b.v = {:?}", b.v);
    Ok(())
}

/// Wall bounces keep kinetic energy.
#[test]
fn wall_collisions_are_elastic() -> Result<()> {
    let p = Particle::new(0, [1e-8 - 2e-10, 0.5e-8], [100.0, 0.0], 1e-10, 1e-26)?;
    let mut sim = Simulation::from_particles(1e-8, 1e-8, vec![p])?;
    let e0 = sim.total_kinetic_energy();
    sim.advance(10, 1e-12)?;
    let (walls, _) = sim.collision_counts();
    assert_eq!(walls, 1);
    assert!((sim.total_kinetic_energy() - e0).abs() < 1e-20);
    assert!(sim.particles()[0].v[0] < 0.0);
    Ok(())
}

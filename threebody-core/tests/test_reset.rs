//! Tests for reset and initial configuration

use threebody_core::tests::test_helpers::{approx_eq, same_trajectory, seeded_config};
use threebody_core::{RunState, SimConfig, Simulation, Viewport};

#[test]
fn test_new_simulation_sits_on_viewport_circle() {
    let sim = Simulation::new(seeded_config(3), Viewport::new(800.0, 600.0)).unwrap();
    let center = sim.viewport().center();

    for (body, mass) in sim.bodies().iter().zip([1.0, 0.9, 0.7]) {
        assert_eq!(body.mass, mass);
        assert!(approx_eq(body.pos.distance(center), 600.0 * 0.18, 1e-9));
        assert!(body.trail().is_empty());
    }
}

#[test]
fn test_reset_yields_three_fresh_bodies() {
    let mut sim = Simulation::new(seeded_config(11), Viewport::default()).unwrap();
    sim.integrate(2.0);

    for _ in 0..20 {
        sim.reset();
        let bodies = sim.bodies();
        assert_eq!(bodies.len(), 3);
        for body in bodies {
            assert!(body.mass > 0.0);
            assert!(body.trail().is_empty());
        }
        assert_eq!(sim.elapsed(), 0.0);
    }
}

#[test]
fn test_reset_keeps_run_state() {
    let mut sim = Simulation::new(seeded_config(5), Viewport::default()).unwrap();

    sim.stop();
    sim.reset();
    assert_eq!(sim.run_state(), RunState::Stopped);

    sim.start();
    sim.reset();
    assert_eq!(sim.run_state(), RunState::Running);
}

#[test]
fn test_resets_explore_different_states() {
    let mut sim = Simulation::new(seeded_config(8), Viewport::default()).unwrap();
    let first = sim.bodies().clone();

    sim.reset();

    // same positions on the circle, different velocity perturbations
    for (a, b) in first.iter().zip(sim.bodies().iter()) {
        assert_eq!(a.pos, b.pos);
        assert_ne!(a.vel, b.vel);
    }
}

#[test]
fn test_same_seed_same_resets() {
    let mut a = Simulation::new(seeded_config(42), Viewport::default()).unwrap();
    let mut b = Simulation::new(seeded_config(42), Viewport::default()).unwrap();
    assert!(same_trajectory(a.bodies(), b.bodies()));

    a.reset();
    b.reset();
    assert!(same_trajectory(a.bodies(), b.bodies()));
}

#[test]
fn test_resize_applies_on_next_reset() {
    let mut sim = Simulation::new(seeded_config(1), Viewport::new(400.0, 400.0)).unwrap();
    let before = sim.bodies()[0].pos;

    sim.resize(Viewport::new(1000.0, 500.0));
    assert_eq!(sim.bodies()[0].pos, before);

    sim.reset();
    let center = sim.viewport().center();
    assert!(approx_eq(sim.bodies()[0].pos.distance(center), 500.0 * 0.18, 1e-9));
}

#[test]
fn test_zero_perturbation_is_repeatable_without_seed() {
    let config = SimConfig {
        perturbation: 0.0,
        ..SimConfig::default()
    };
    let a = Simulation::new(config.clone(), Viewport::default()).unwrap();
    let b = Simulation::new(config, Viewport::default()).unwrap();
    assert!(same_trajectory(a.bodies(), b.bodies()));
}

//! Determinism tests - identical inputs produce identical trajectories

use threebody_core::tests::test_helpers::{same_trajectory, seeded_config, unperturbed_simulation};
use threebody_core::{Simulation, Viewport};

/// Irregular host frame times, in seconds
const FRAMES: [f64; 8] = [0.016, 0.017, 0.033, 0.004, 0.016, 0.120, 0.016, 0.05];

#[test]
fn test_same_state_same_frames() {
    let mut a = unperturbed_simulation(50.0);
    let mut b = unperturbed_simulation(50.0);

    for _ in 0..50 {
        for dt in FRAMES {
            a.advance(dt, 0.7);
            b.advance(dt, 0.7);
        }
    }

    assert!(same_trajectory(a.bodies(), b.bodies()));
}

#[test]
fn test_multiple_runs_determinism() {
    let run = || {
        let mut sim = Simulation::new(seeded_config(2024), Viewport::new(1920.0, 1080.0)).unwrap();
        for _ in 0..30 {
            for dt in FRAMES {
                sim.advance_frame(dt);
            }
        }
        sim.reset();
        sim.integrate(3.0);
        sim
    };

    let first = run();
    for i in 1..5 {
        let other = run();
        assert!(
            same_trajectory(first.bodies(), other.bodies()),
            "Run {} should match run 0",
            i
        );
    }
}

#[test]
fn test_stop_start_does_not_perturb_trajectory() {
    let mut a = unperturbed_simulation(50.0);
    let mut b = unperturbed_simulation(50.0);

    for dt in FRAMES {
        a.advance(dt, 1.0);

        b.stop();
        b.advance(dt, 1.0);
        b.start();
        b.advance(dt, 1.0);
    }

    assert!(same_trajectory(a.bodies(), b.bodies()));
}

//! Configurations and states the simulator must refuse or survive

use glam::DVec2;
use threebody_core::tests::test_helpers::{seeded_config, unperturbed_bodies};
use threebody_core::{Body, Rgb, SimConfig, SimError, Simulation, Viewport};

fn with_mass(index: usize, mass: f64) -> [Body; 3] {
    let mut bodies = unperturbed_bodies(50.0);
    bodies[index].mass = mass;
    bodies
}

#[test]
fn test_zero_mass_is_rejected() {
    let err = Simulation::from_bodies(with_mass(1, 0.0), seeded_config(0), Viewport::default())
        .unwrap_err();
    assert_eq!(err, SimError::NonPositiveMass { index: 1, mass: 0.0 });
}

#[test]
fn test_negative_and_nan_mass_are_rejected() {
    let err = Simulation::from_bodies(with_mass(2, -1.0), seeded_config(0), Viewport::default())
        .unwrap_err();
    assert!(matches!(err, SimError::NonPositiveMass { index: 2, .. }));

    let err =
        Simulation::from_bodies(with_mass(0, f64::NAN), seeded_config(0), Viewport::default())
            .unwrap_err();
    assert!(matches!(err, SimError::NonPositiveMass { index: 0, .. }));
}

#[test]
fn test_non_finite_state_is_rejected() {
    let mut bodies = unperturbed_bodies(50.0);
    bodies[2].vel = DVec2::new(f64::INFINITY, 0.0);

    let err = Simulation::from_bodies(bodies, seeded_config(0), Viewport::default()).unwrap_err();
    assert_eq!(err, SimError::NonFiniteState { index: 2 });
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimConfig {
        masses: [1.0, 0.9, -0.7],
        ..SimConfig::default()
    };
    let err = Simulation::new(config, Viewport::default()).unwrap_err();
    assert!(matches!(err, SimError::NonPositiveMass { index: 2, .. }));

    let config = SimConfig {
        gravity: 0.0,
        ..SimConfig::default()
    };
    let err = Simulation::new(config, Viewport::default()).unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter { name: "gravity", .. }));
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = SimError::NonPositiveMass { index: 1, mass: -2.0 };
    assert!(err.to_string().contains("body 1"));

    let err = SimError::InvalidParameter {
        name: "softening",
        value: 0.0,
    };
    assert!(err.to_string().contains("softening"));
}

#[test]
fn test_coincident_bodies_stay_finite() {
    let color = Rgb(0, 0, 0);
    let bodies = [
        Body::new(1.0, DVec2::new(10.0, 10.0), DVec2::ZERO, color, 8),
        Body::new(1.0, DVec2::new(10.0, 10.0), DVec2::ZERO, color, 8),
        Body::new(1.0, DVec2::new(10.0, 10.0 + 1e-4), DVec2::ZERO, color, 8),
    ];
    let mut sim = Simulation::from_bodies(bodies, seeded_config(0), Viewport::default()).unwrap();

    sim.integrate(0.1);

    for body in sim.bodies() {
        assert!(body.pos.is_finite());
        assert!(body.vel.is_finite());
    }
}
